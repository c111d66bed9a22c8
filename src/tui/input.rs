//! Keyboard mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use cryptoquote_core::Letter;

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Select a letter in the current selection slot.
    Letter(Letter),
    /// Undo the last move.
    Undo,
    /// Redo the last undone move.
    Redo,
    /// Drop the current selection.
    ClearSelection,
    /// Send the next letter to the ciphertext slot.
    CipherSlot,
    /// Remove the guess for the selected plaintext letter.
    ClearGuess,
    /// Discard this puzzle and fetch another.
    NewPuzzle,
    /// Leave the game.
    Quit,
}

/// Maps a key event to a command; unmapped keys yield `None`.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('n') => Some(Command::NewPuzzle),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(',') => Some(Command::Undo),
        KeyCode::Char('.') => Some(Command::Redo),
        KeyCode::Esc => Some(Command::ClearSelection),
        KeyCode::Tab => Some(Command::CipherSlot),
        KeyCode::Backspace | KeyCode::Delete => Some(Command::ClearGuess),
        KeyCode::Char(c) => Letter::from_char(c).ok().map(Command::Letter),
        _ => None,
    }
}
