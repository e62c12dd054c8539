use tracing::debug;

use super::{Command, CommandState, EntityId};
use crate::math::Point2;
use crate::topology::{GraphStore, RemovedVertex, Vertex, VertexId};

/// Adds a free-standing vertex.
#[derive(Debug, Clone)]
pub struct AddVertexCommand {
    vertex: Vertex,
    applied: bool,
}

impl AddVertexCommand {
    #[must_use]
    pub fn new(vertex: Vertex) -> Self {
        Self {
            vertex,
            applied: false,
        }
    }

    /// Places a vertex at `point` under the next free id of `graph`.
    #[must_use]
    pub fn at(graph: &GraphStore, point: Point2) -> Self {
        Self::new(Vertex::at(graph.next_vertex_id(), point))
    }

    #[must_use]
    pub fn vertex_id(&self) -> VertexId {
        self.vertex.id
    }
}

impl Command for AddVertexCommand {
    fn execute(&mut self, state: &CommandState) -> CommandState {
        let mut graph = state.graph.clone();
        match graph.add_vertex(self.vertex.clone()) {
            Ok(_) => {
                self.applied = true;
                state.with_graph(graph)
            }
            Err(err) => {
                debug!(%err, "add vertex skipped");
                self.applied = false;
                state.clone()
            }
        }
    }

    fn undo(&mut self, state: &CommandState) -> CommandState {
        if !self.applied {
            return state.clone();
        }
        let mut graph = state.graph.clone();
        graph.take_vertex(self.vertex.id);
        let mut next = state.with_graph(graph);
        next.prune_selection();
        next
    }

    fn description(&self) -> String {
        format!("Add vertex {}", self.vertex.id)
    }
}

/// Removes a vertex together with its incident edges.
#[derive(Debug, Clone)]
pub struct RemoveVertexCommand {
    vertex_id: VertexId,
    removed: Option<RemovedVertex>,
    deselected: Vec<EntityId>,
}

impl RemoveVertexCommand {
    #[must_use]
    pub fn new(vertex_id: VertexId) -> Self {
        Self {
            vertex_id,
            removed: None,
            deselected: Vec::new(),
        }
    }
}

impl Command for RemoveVertexCommand {
    fn execute(&mut self, state: &CommandState) -> CommandState {
        let mut graph = state.graph.clone();
        let Some(removed) = graph.remove_vertex(self.vertex_id) else {
            debug!(vertex = %self.vertex_id, "remove vertex skipped: not found");
            self.removed = None;
            self.deselected.clear();
            return state.clone();
        };
        self.removed = Some(removed);
        let mut next = state.with_graph(graph);
        self.deselected = next.prune_selection();
        next
    }

    fn undo(&mut self, state: &CommandState) -> CommandState {
        let Some(removed) = &self.removed else {
            return state.clone();
        };
        let mut graph = state.graph.clone();
        graph.restore_vertex(removed.vertex.clone());
        for edge in &removed.edges {
            graph.restore_edge(edge.clone());
        }
        graph.restore_surfaces(removed.surfaces_before.clone());
        let mut next = state.with_graph(graph);
        next.selected_ids.extend(self.deselected.iter().copied());
        next
    }

    fn description(&self) -> String {
        format!("Remove vertex {}", self.vertex_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::two_rooms;
    use crate::topology::{EdgeId, SurfaceId};

    #[test]
    fn add_vertex_round_trip() {
        let state = CommandState::new(two_rooms().into_store());
        let mut cmd = AddVertexCommand::at(&state.graph, Point2::new(500.0, 500.0));
        assert_eq!(cmd.vertex_id(), VertexId(7));

        let next = cmd.execute(&state);
        assert_eq!(next.graph.vertex_count(), 7);
        assert_eq!(next.graph.surface_count(), 2);
        assert_eq!(cmd.undo(&next), state);
    }

    #[test]
    fn add_duplicate_vertex_is_noop() {
        let state = CommandState::new(two_rooms().into_store());
        let mut cmd = AddVertexCommand::new(Vertex::new(VertexId(1), 9.0, 9.0));
        let next = cmd.execute(&state);
        assert_eq!(next, state);
        assert_eq!(cmd.undo(&next), state);
    }

    #[test]
    fn remove_vertex_round_trip_restores_surfaces_and_selection() {
        let mut state = CommandState::new(two_rooms().into_store());
        state.selected_ids.insert(EntityId::Vertex(VertexId(2)));
        state.selected_ids.insert(EntityId::Edge(EdgeId(6)));
        state.selected_ids.insert(EntityId::Surface(SurfaceId(1)));
        state.selected_ids.insert(EntityId::Vertex(VertexId(6)));

        let mut cmd = RemoveVertexCommand::new(VertexId(2));
        let next = cmd.execute(&state);
        assert!(!next.graph.contains_vertex(VertexId(2)));
        assert_eq!(next.graph.edge_count(), 4);
        assert_eq!(next.graph.surface_count(), 0);
        assert_eq!(
            next.selected_ids.iter().copied().collect::<Vec<_>>(),
            vec![EntityId::Vertex(VertexId(6))]
        );

        assert_eq!(cmd.undo(&next), state);
    }

    #[test]
    fn remove_missing_vertex_is_noop() {
        let state = CommandState::new(two_rooms().into_store());
        let mut cmd = RemoveVertexCommand::new(VertexId(42));
        let next = cmd.execute(&state);
        assert_eq!(next, state);
        assert_eq!(cmd.undo(&next), state);
    }

    #[test]
    fn redo_after_undo_reproduces_state() {
        let state = CommandState::new(two_rooms().into_store());
        let mut cmd = RemoveVertexCommand::new(VertexId(5));
        let executed = cmd.execute(&state);
        let undone = cmd.undo(&executed);
        assert_eq!(cmd.execute(&undone), executed);
    }
}
