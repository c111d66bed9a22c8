//! Linear undo/redo over guess snapshots.

use crate::guesses::Guesses;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Undo and redo stacks of [`Guesses`] snapshots.
///
/// The stacks hold whole snapshots rather than diffs; a snapshot is two
/// 26-entry arrays, so copying is cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    undo_stack: Vec<Guesses>,
    redo_stack: Vec<Guesses>,
}

impl History {
    /// Creates empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the state from before a new move.
    ///
    /// A new move forks away from any redo branch, so the redo stack is
    /// cleared unconditionally.
    #[instrument(skip(self, before), fields(undo_len = self.undo_stack.len()))]
    pub fn record_move(&mut self, before: Guesses) {
        self.undo_stack.push(before);
        if !self.redo_stack.is_empty() {
            debug!(dropped = self.redo_stack.len(), "Discarding redo branch");
        }
        self.redo_stack.clear();
    }

    /// Steps back one move.
    ///
    /// Pushes `current` onto the redo stack and returns the snapshot to
    /// restore, or `None` (leaving both stacks untouched) if there is
    /// nothing to undo.
    #[instrument(skip(self, current), fields(undo_len = self.undo_stack.len()))]
    pub fn undo(&mut self, current: Guesses) -> Option<Guesses> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Steps forward one move; the mirror image of [`History::undo`].
    #[instrument(skip(self, current), fields(redo_len = self.redo_stack.len()))]
    pub fn redo(&mut self, current: Guesses) -> Option<Guesses> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    /// True if there is a move to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// True if there is a move to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Depth of the undo stack.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Depth of the redo stack.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drops both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
