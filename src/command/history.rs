use tracing::debug;

use super::{Command, CommandState};

/// Number of commands kept when no capacity is given.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Linear undo/redo stack.
///
/// Commands below the cursor are undoable; commands at or above it are
/// redoable. Executing a new command discards the redo tail. When full, the
/// oldest command is dropped.
#[derive(Debug)]
pub struct CommandHistory {
    commands: Vec<Box<dyn Command>>,
    cursor: usize,
    capacity: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// A history holding at most `capacity` commands (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Executes `command` on `state`, records it and returns the new state.
    pub fn execute(&mut self, mut command: Box<dyn Command>, state: &CommandState) -> CommandState {
        let next = command.execute(state);
        self.commands.truncate(self.cursor);
        self.commands.push(command);
        if self.commands.len() > self.capacity {
            let dropped = self.commands.remove(0);
            debug!(command = %dropped.description(), "history full, oldest command dropped");
        }
        self.cursor = self.commands.len();
        next
    }

    /// Undoes the command before the cursor. Returns `state` unchanged if
    /// there is nothing to undo.
    pub fn undo(&mut self, state: &CommandState) -> CommandState {
        if !self.can_undo() {
            return state.clone();
        }
        self.cursor -= 1;
        self.commands[self.cursor].undo(state)
    }

    /// Re-executes the command at the cursor. Returns `state` unchanged if
    /// there is nothing to redo.
    pub fn redo(&mut self, state: &CommandState) -> CommandState {
        if !self.can_redo() {
            return state.clone();
        }
        let next = self.commands[self.cursor].execute(state);
        self.cursor += 1;
        next
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// Number of recorded commands, undoable and redoable.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of undoable commands.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forgets every recorded command.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
    }

    /// Description of the command `undo` would revert.
    #[must_use]
    pub fn undo_description(&self) -> Option<String> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.commands.get(i))
            .map(|c| c.description())
    }

    /// Description of the command `redo` would re-apply.
    #[must_use]
    pub fn redo_description(&self) -> Option<String> {
        self.commands.get(self.cursor).map(|c| c.description())
    }
}
