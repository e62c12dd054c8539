use tracing::debug;

use super::{Command, CommandState, EntityId};
use crate::math::Point2;
use crate::topology::{Edge, EdgeId, GraphStore, Surface, VertexId};

/// Adds an edge between two existing vertices and re-detects surfaces.
#[derive(Debug, Clone)]
pub struct AddEdgeCommand {
    edge: Edge,
    surfaces_before: Option<Vec<Surface>>,
}

impl AddEdgeCommand {
    #[must_use]
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            surfaces_before: None,
        }
    }

    /// A default edge from `start` to `end` under the next free id of `graph`.
    #[must_use]
    pub fn between(graph: &GraphStore, start: VertexId, end: VertexId) -> Self {
        Self::new(Edge::new(graph.next_edge_id(), start, end))
    }

    #[must_use]
    pub fn edge_id(&self) -> EdgeId {
        self.edge.id
    }
}

impl Command for AddEdgeCommand {
    fn execute(&mut self, state: &CommandState) -> CommandState {
        let mut graph = state.graph.clone();
        let before = graph.surfaces_snapshot();
        match graph.add_edge(self.edge.clone()) {
            Ok(created) => {
                debug!(edge = %self.edge.id, created = created.len(), "edge added");
                self.surfaces_before = Some(before);
                state.with_graph(graph)
            }
            Err(err) => {
                debug!(%err, "add edge skipped");
                self.surfaces_before = None;
                state.clone()
            }
        }
    }

    fn undo(&mut self, state: &CommandState) -> CommandState {
        let Some(before) = &self.surfaces_before else {
            return state.clone();
        };
        let mut graph = state.graph.clone();
        graph.take_edge(self.edge.id);
        graph.restore_surfaces(before.clone());
        let mut next = state.with_graph(graph);
        next.prune_selection();
        next
    }

    fn description(&self) -> String {
        format!("Add edge {}", self.edge.id)
    }
}

/// Removes an edge and re-detects surfaces.
#[derive(Debug, Clone)]
pub struct RemoveEdgeCommand {
    edge_id: EdgeId,
    removed: Option<(Edge, Vec<Surface>)>,
    deselected: Vec<EntityId>,
}

impl RemoveEdgeCommand {
    #[must_use]
    pub fn new(edge_id: EdgeId) -> Self {
        Self {
            edge_id,
            removed: None,
            deselected: Vec::new(),
        }
    }
}

impl Command for RemoveEdgeCommand {
    fn execute(&mut self, state: &CommandState) -> CommandState {
        self.removed = None;
        self.deselected.clear();
        let Ok(edge) = state.graph.edge(self.edge_id).cloned() else {
            debug!(edge = %self.edge_id, "remove edge skipped: not found");
            return state.clone();
        };

        let mut graph = state.graph.clone();
        let before = graph.surfaces_snapshot();
        graph.remove_edge(self.edge_id);
        self.removed = Some((edge, before));

        let mut next = state.with_graph(graph);
        self.deselected = next.prune_selection();
        next
    }

    fn undo(&mut self, state: &CommandState) -> CommandState {
        let Some((edge, before)) = &self.removed else {
            return state.clone();
        };
        let mut graph = state.graph.clone();
        graph.restore_edge(edge.clone());
        graph.restore_surfaces(before.clone());
        let mut next = state.with_graph(graph);
        next.selected_ids.extend(self.deselected.iter().copied());
        next
    }

    fn description(&self) -> String {
        format!("Remove edge {}", self.edge_id)
    }
}

/// Splits an edge in two by inserting a vertex on it.
///
/// The new vertex and both halves get their ids at construction, so a redo
/// reproduces them exactly.
#[derive(Debug, Clone)]
pub struct SplitEdgeCommand {
    edge_id: EdgeId,
    point: Point2,
    vertex_id: VertexId,
    halves: [EdgeId; 2],
    applied: Option<(Edge, Vec<Surface>)>,
    deselected: Vec<EntityId>,
}

impl SplitEdgeCommand {
    /// Splits `edge_id` at the projection of `point`, taking fresh ids from
    /// `graph`.
    #[must_use]
    pub fn new(graph: &GraphStore, edge_id: EdgeId, point: Point2) -> Self {
        let first = graph.next_edge_id();
        Self {
            edge_id,
            point,
            vertex_id: graph.next_vertex_id(),
            halves: [first, first.next()],
            applied: None,
            deselected: Vec::new(),
        }
    }

    /// The vertex inserted by the split.
    #[must_use]
    pub fn vertex_id(&self) -> VertexId {
        self.vertex_id
    }

    /// The edges replacing the original, start half first.
    #[must_use]
    pub fn halves(&self) -> [EdgeId; 2] {
        self.halves
    }
}

impl Command for SplitEdgeCommand {
    fn execute(&mut self, state: &CommandState) -> CommandState {
        self.applied = None;
        self.deselected.clear();

        let mut graph = state.graph.clone();
        let before = graph.surfaces_snapshot();
        let [first, second] = self.halves;
        match graph.split_edge(self.edge_id, self.vertex_id, &self.point, first, second) {
            Ok(outcome) => {
                self.applied = Some((outcome.original, before));
                let mut next = state.with_graph(graph);
                self.deselected = next.prune_selection();
                next
            }
            Err(err) => {
                debug!(%err, edge = %self.edge_id, "split edge skipped");
                state.clone()
            }
        }
    }

    fn undo(&mut self, state: &CommandState) -> CommandState {
        let Some((original, before)) = &self.applied else {
            return state.clone();
        };
        let mut graph = state.graph.clone();
        for half in self.halves {
            graph.take_edge(half);
        }
        graph.take_vertex(self.vertex_id);
        graph.restore_edge(original.clone());
        graph.restore_surfaces(before.clone());

        let mut next = state.with_graph(graph);
        next.prune_selection();
        next.selected_ids.extend(self.deselected.iter().copied());
        next
    }

    fn description(&self) -> String {
        format!("Split edge {}", self.edge_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::test_support::two_rooms;
    use crate::topology::{SurfaceId, SurfaceUpdate};

    fn open_two_rooms() -> CommandState {
        // Two rooms without the shared wall: a single 200×100 room.
        let mut graph = two_rooms().into_store();
        graph.remove_edge(EdgeId(6));
        CommandState::new(graph)
    }

    #[test]
    fn add_edge_splits_room_and_undo_restores_identity() {
        let mut state = open_two_rooms();
        let room = state.graph.surfaces().next().unwrap().id;
        state.graph.update_surface(room, &SurfaceUpdate::rename("Hall")).unwrap();

        let mut cmd = AddEdgeCommand::new(Edge::new(EdgeId(6), VertexId(2), VertexId(5)));
        let next = cmd.execute(&state);
        assert_eq!(next.graph.surface_count(), 2);
        assert!(next.graph.surfaces().all(|s| s.name != "Hall"));

        let undone = cmd.undo(&next);
        assert_eq!(undone, state);
        assert_eq!(undone.graph.surface(room).unwrap().name, "Hall");
    }

    #[test]
    fn add_invalid_edge_is_noop() {
        let state = CommandState::new(two_rooms().into_store());
        let mut cmd = AddEdgeCommand::between(&state.graph, VertexId(1), VertexId(99));
        assert_eq!(cmd.edge_id(), EdgeId(8));
        let next = cmd.execute(&state);
        assert_eq!(next, state);
        assert_eq!(cmd.undo(&next), state);
    }

    #[test]
    fn remove_shared_edge_round_trip() {
        let mut state = CommandState::new(two_rooms().into_store());
        state.selected_ids.insert(EntityId::Edge(EdgeId(6)));
        state.selected_ids.insert(EntityId::Surface(SurfaceId(2)));

        let mut cmd = RemoveEdgeCommand::new(EdgeId(6));
        let next = cmd.execute(&state);
        assert_eq!(next.graph.surface_count(), 1);
        assert_eq!(next.graph.surfaces().next().unwrap().edge_ids.len(), 6);
        assert!(next.selected_ids.is_empty());

        assert_eq!(cmd.undo(&next), state);
    }

    #[test]
    fn remove_missing_edge_is_noop() {
        let state = CommandState::new(two_rooms().into_store());
        let mut cmd = RemoveEdgeCommand::new(EdgeId(77));
        let next = cmd.execute(&state);
        assert_eq!(next, state);
        assert_eq!(cmd.undo(&next), state);
    }

    #[test]
    fn split_edge_round_trip() {
        let mut state = CommandState::new(two_rooms().into_store());
        state.selected_ids.insert(EntityId::Edge(EdgeId(1)));

        let mut cmd = SplitEdgeCommand::new(&state.graph, EdgeId(1), Point2::new(25.0, 0.0));
        assert_eq!(cmd.vertex_id(), VertexId(7));
        assert_eq!(cmd.halves(), [EdgeId(8), EdgeId(9)]);

        let next = cmd.execute(&state);
        assert!(!next.graph.contains_edge(EdgeId(1)));
        let v = next.graph.vertex(VertexId(7)).unwrap();
        assert_relative_eq!(v.x(), 25.0);
        assert_eq!(next.graph.surface_count(), 2);
        assert!(next.selected_ids.is_empty());

        assert_eq!(cmd.undo(&next), state);
    }

    #[test]
    fn split_at_endpoint_is_noop() {
        let state = CommandState::new(two_rooms().into_store());
        let mut cmd = SplitEdgeCommand::new(&state.graph, EdgeId(1), Point2::new(0.0, 0.0));
        let next = cmd.execute(&state);
        assert_eq!(next, state);
        assert_eq!(cmd.undo(&next), state);
    }

    #[test]
    fn split_past_the_last_edge_id_is_noop() {
        let mut graph = two_rooms().into_store();
        graph
            .add_edge(Edge::new(EdgeId(u64::MAX - 1), VertexId(1), VertexId(5)))
            .unwrap();
        let state = CommandState::new(graph);
        let mut cmd = SplitEdgeCommand::new(&state.graph, EdgeId(1), Point2::new(50.0, 0.0));
        assert_eq!(cmd.halves(), [EdgeId::RESERVED, EdgeId::RESERVED]);
        let next = cmd.execute(&state);
        assert_eq!(next, state);
        assert_eq!(cmd.undo(&next), state);
    }

    #[test]
    fn redo_after_undo_reproduces_state() {
        let state = CommandState::new(two_rooms().into_store());
        let mut cmd = SplitEdgeCommand::new(&state.graph, EdgeId(6), Point2::new(100.0, 40.0));
        let executed = cmd.execute(&state);
        let undone = cmd.undo(&executed);
        assert_eq!(undone, state);
        assert_eq!(cmd.execute(&undone), executed);
    }
}
