//! Single owner of the editing state.

use crate::command::{Command, CommandHistory, CommandState, EntityId};
use crate::topology::GraphStore;

/// Owns the current [`CommandState`] and the [`CommandHistory`] that
/// produced it.
///
/// All edits go through [`Editor::apply`]; selection changes are not
/// recorded in the history.
#[derive(Debug, Default)]
pub struct Editor {
    state: CommandState,
    history: CommandHistory,
}

impl Editor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing an existing graph.
    #[must_use]
    pub fn with_graph(graph: GraphStore) -> Self {
        Self {
            state: CommandState::new(graph),
            history: CommandHistory::new(),
        }
    }

    /// Replaces the history, e.g. to use a different capacity.
    #[must_use]
    pub fn with_history(mut self, history: CommandHistory) -> Self {
        self.history = history;
        self
    }

    /// Executes a command and records it.
    pub fn apply(&mut self, command: impl Command + 'static) {
        self.state = self.history.execute(Box::new(command), &self.state);
    }

    /// Returns `true` if a command was undone.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        self.state = self.history.undo(&self.state);
        true
    }

    /// Returns `true` if a command was redone.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        self.state = self.history.redo(&self.state);
        true
    }

    #[must_use]
    pub fn state(&self) -> &CommandState {
        &self.state
    }

    #[must_use]
    pub fn graph(&self) -> &GraphStore {
        &self.state.graph
    }

    #[must_use]
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Adds an entity to the selection. Returns `false` if it does not exist.
    pub fn select(&mut self, id: EntityId) -> bool {
        if !self.state.contains(id) {
            return false;
        }
        self.state.selected_ids.insert(id);
        true
    }

    pub fn deselect(&mut self, id: EntityId) -> bool {
        self.state.selected_ids.remove(&id)
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_ids.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::command::{
        DrawEdgeCommand, RemoveEdgeCommand, SplitEdgeCommand, UpdateSurfaceCommand,
    };
    use crate::math::Point2;
    use crate::test_support::two_rooms;
    use crate::topology::{EdgeId, SurfaceId, VertexId};

    fn draw(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
        let cmd = DrawEdgeCommand::new(
            editor.graph(),
            Point2::new(from.0, from.1),
            Point2::new(to.0, to.1),
        );
        editor.apply(cmd);
    }

    #[test]
    fn drawing_rooms_step_by_step() {
        let mut editor = Editor::new();
        draw(&mut editor, (0.0, 0.0), (300.0, 0.0));
        draw(&mut editor, (300.0, 0.0), (300.0, 200.0));
        draw(&mut editor, (300.0, 200.0), (0.0, 200.0));
        assert_eq!(editor.graph().surface_count(), 0);
        draw(&mut editor, (0.0, 200.0), (0.0, 0.0));
        assert_eq!(editor.graph().surface_count(), 1);

        // Split the bottom and top walls, then join the new vertices.
        let bottom = editor
            .graph()
            .find_edge_between(VertexId(1), VertexId(2))
            .unwrap()
            .id;
        editor.apply(SplitEdgeCommand::new(editor.graph(), bottom, Point2::new(100.0, 0.0)));
        let top = editor
            .graph()
            .find_edge_between(VertexId(3), VertexId(4))
            .unwrap()
            .id;
        editor.apply(SplitEdgeCommand::new(editor.graph(), top, Point2::new(100.0, 200.0)));
        assert_eq!(editor.graph().surface_count(), 1);

        draw(&mut editor, (100.0, 0.0), (100.0, 200.0));
        assert_eq!(editor.graph().surface_count(), 2);
        assert_eq!(editor.graph().vertex_count(), 6);

        assert!(editor.undo());
        assert_eq!(editor.graph().surface_count(), 1);
        assert!(editor.redo());
        assert_eq!(editor.graph().surface_count(), 2);
        assert!(!editor.redo());
    }

    #[test]
    fn undo_everything_returns_to_empty() {
        let mut editor = Editor::new();
        draw(&mut editor, (0.0, 0.0), (100.0, 0.0));
        draw(&mut editor, (100.0, 0.0), (50.0, 80.0));
        draw(&mut editor, (50.0, 80.0), (0.0, 0.0));
        assert_eq!(editor.graph().surface_count(), 1);

        while editor.undo() {}
        assert!(editor.graph().is_empty());
        assert_eq!(editor.history().cursor(), 0);
        assert_eq!(editor.history().len(), 3);
    }

    #[test]
    fn selection_follows_the_graph() {
        let mut editor = Editor::with_graph(two_rooms().into_store());
        assert!(editor.select(EntityId::Edge(EdgeId(6))));
        assert!(!editor.select(EntityId::Edge(EdgeId(60))));

        editor.apply(RemoveEdgeCommand::new(EdgeId(6)));
        assert!(editor.state().selected_ids.is_empty());
        editor.undo();
        assert!(editor.state().selected_ids.contains(&EntityId::Edge(EdgeId(6))));

        assert!(editor.deselect(EntityId::Edge(EdgeId(6))));
        assert!(!editor.deselect(EntityId::Edge(EdgeId(6))));
        editor.select(EntityId::Surface(SurfaceId(1)));
        editor.clear_selection();
        assert!(editor.state().selected_ids.is_empty());
    }

    #[test]
    fn renamed_room_keeps_name_until_its_walls_change() {
        let mut editor = Editor::with_graph(two_rooms().into_store());
        editor.apply(UpdateSurfaceCommand::rename(SurfaceId(1), "Office"));
        draw(&mut editor, (200.0, 0.0), (260.0, -40.0));
        assert_eq!(editor.graph().surface(SurfaceId(1)).unwrap().name, "Office");

        editor.apply(RemoveEdgeCommand::new(EdgeId(6)));
        assert!(editor.graph().surfaces().all(|s| s.name != "Office"));
        editor.undo();
        assert_eq!(editor.graph().surface(SurfaceId(1)).unwrap().name, "Office");
    }
}
