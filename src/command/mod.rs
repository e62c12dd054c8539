//! Undoable edit commands.
//!
//! Every command works on a [`CommandState`]: `execute` clones the graph,
//! mutates the clone and returns the new state; `undo` takes that state and
//! returns one structurally equal to the original. Side effects of
//! detection (created, renamed or dropped surfaces) are remembered by the
//! command and written back verbatim on undo rather than re-derived.
//!
//! Commands never fail. One that targets a missing id, or whose input is
//! rejected by the store, returns its input state unchanged and its undo is
//! a no-op as well.

mod draw;
mod edge;
mod graph;
mod history;
mod surface;
mod vertex;

pub use draw::{DrawEdgeCommand, DEFAULT_SNAP_DISTANCE};
pub use edge::{AddEdgeCommand, RemoveEdgeCommand, SplitEdgeCommand};
pub use graph::{ClearAllCommand, DetectSurfacesCommand};
pub use history::{CommandHistory, DEFAULT_HISTORY_CAPACITY};
pub use surface::{AddSurfaceCommand, RemoveSurfaceCommand, UpdateSurfaceCommand};
pub use vertex::{AddVertexCommand, RemoveVertexCommand};

use std::collections::BTreeSet;
use std::fmt;

use crate::topology::{EdgeId, GraphStore, SurfaceId, VertexId};

/// Id of any selectable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityId {
    Vertex(VertexId),
    Edge(EdgeId),
    Surface(SurfaceId),
}

/// The state a command operates on: a graph snapshot plus the selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandState {
    pub graph: GraphStore,
    pub selected_ids: BTreeSet<EntityId>,
}

impl CommandState {
    /// Wraps a graph with an empty selection.
    #[must_use]
    pub fn new(graph: GraphStore) -> Self {
        Self {
            graph,
            selected_ids: BTreeSet::new(),
        }
    }

    /// Same selection, different graph.
    #[must_use]
    pub fn with_graph(&self, graph: GraphStore) -> Self {
        Self {
            graph,
            selected_ids: self.selected_ids.clone(),
        }
    }

    /// Returns `true` if the entity exists in the graph.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        entity_exists(&self.graph, id)
    }

    /// Drops selected ids that no longer exist in the graph and returns
    /// them.
    pub fn prune_selection(&mut self) -> Vec<EntityId> {
        let dropped: Vec<EntityId> = self
            .selected_ids
            .iter()
            .copied()
            .filter(|&id| !entity_exists(&self.graph, id))
            .collect();
        for id in &dropped {
            self.selected_ids.remove(id);
        }
        dropped
    }
}

fn entity_exists(graph: &GraphStore, id: EntityId) -> bool {
    match id {
        EntityId::Vertex(v) => graph.contains_vertex(v),
        EntityId::Edge(e) => graph.contains_edge(e),
        EntityId::Surface(s) => graph.contains_surface(s),
    }
}

/// An undoable edit.
pub trait Command: fmt::Debug {
    /// Applies the edit to a copy of `state` and returns the result.
    fn execute(&mut self, state: &CommandState) -> CommandState;

    /// Reverts a previous `execute`, given the state it produced.
    fn undo(&mut self, state: &CommandState) -> CommandState;

    /// Human-readable label, e.g. for an "Undo ..." menu entry.
    fn description(&self) -> String;
}
