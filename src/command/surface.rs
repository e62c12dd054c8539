use tracing::{debug, warn};

use super::{Command, CommandState, EntityId};
use crate::topology::{Surface, SurfaceId, SurfaceUpdate};

/// Inserts a surface by hand.
///
/// The surface is validated like any other insertion. It lives until the
/// next detection pass that does not produce a face with its signature.
#[derive(Debug, Clone)]
pub struct AddSurfaceCommand {
    surface: Surface,
    applied: bool,
}

impl AddSurfaceCommand {
    #[must_use]
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            applied: false,
        }
    }
}

impl Command for AddSurfaceCommand {
    fn execute(&mut self, state: &CommandState) -> CommandState {
        let mut graph = state.graph.clone();
        match graph.insert_surface(self.surface.clone()) {
            Ok(()) => {
                self.applied = true;
                state.with_graph(graph)
            }
            Err(err) => {
                debug!(%err, "add surface skipped");
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
        graph.remove_surface(self.surface.id);
        let mut next = state.with_graph(graph);
        next.prune_selection();
        next
    }

    fn description(&self) -> String {
        format!("Add surface \"{}\"", self.surface.name)
    }
}

/// Changes the name and/or fill of a surface.
#[derive(Debug, Clone)]
pub struct UpdateSurfaceCommand {
    surface_id: SurfaceId,
    update: SurfaceUpdate,
    previous: Option<SurfaceUpdate>,
}

impl UpdateSurfaceCommand {
    #[must_use]
    pub fn new(surface_id: SurfaceId, update: SurfaceUpdate) -> Self {
        Self {
            surface_id,
            update,
            previous: None,
        }
    }

    #[must_use]
    pub fn rename(surface_id: SurfaceId, name: impl Into<String>) -> Self {
        Self::new(surface_id, SurfaceUpdate::rename(name))
    }
}

impl Command for UpdateSurfaceCommand {
    fn execute(&mut self, state: &CommandState) -> CommandState {
        self.previous = None;
        if self.update.is_empty() {
            return state.clone();
        }
        let mut graph = state.graph.clone();
        match graph.update_surface(self.surface_id, &self.update) {
            Ok(previous) => {
                self.previous = Some(previous);
                state.with_graph(graph)
            }
            Err(err) => {
                debug!(%err, "update surface skipped");
                state.clone()
            }
        }
    }

    fn undo(&mut self, state: &CommandState) -> CommandState {
        let Some(previous) = &self.previous else {
            return state.clone();
        };
        let mut graph = state.graph.clone();
        if let Err(err) = graph.update_surface(self.surface_id, previous) {
            warn!(%err, "surface update could not be reverted");
            return state.clone();
        }
        state.with_graph(graph)
    }

    fn description(&self) -> String {
        match &self.update.name {
            Some(name) => format!("Rename surface {} to \"{name}\"", self.surface_id),
            None => format!("Update surface {}", self.surface_id),
        }
    }
}

/// Removes a surface from the collection.
#[derive(Debug, Clone)]
pub struct RemoveSurfaceCommand {
    surface_id: SurfaceId,
    removed: Option<Surface>,
    deselected: Vec<EntityId>,
}

impl RemoveSurfaceCommand {
    #[must_use]
    pub fn new(surface_id: SurfaceId) -> Self {
        Self {
            surface_id,
            removed: None,
            deselected: Vec::new(),
        }
    }
}

impl Command for RemoveSurfaceCommand {
    fn execute(&mut self, state: &CommandState) -> CommandState {
        self.deselected.clear();
        let mut graph = state.graph.clone();
        self.removed = graph.remove_surface(self.surface_id);
        if self.removed.is_none() {
            debug!(surface = %self.surface_id, "remove surface skipped: not found");
            return state.clone();
        }
        let mut next = state.with_graph(graph);
        self.deselected = next.prune_selection();
        next
    }

    fn undo(&mut self, state: &CommandState) -> CommandState {
        let Some(surface) = &self.removed else {
            return state.clone();
        };
        let mut graph = state.graph.clone();
        graph.restore_surface(surface.clone());
        let mut next = state.with_graph(graph);
        next.selected_ids.extend(self.deselected.iter().copied());
        next
    }

    fn description(&self) -> String {
        format!("Remove surface {}", self.surface_id)
    }
}
