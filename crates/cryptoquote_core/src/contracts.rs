//! Contract-based validation for puzzle moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} move {Q}.

use crate::action::Move;
use crate::invariants::{InvariantSet, PuzzleInvariants};
use crate::session::{PuzzleSession, SessionError};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), SessionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), SessionError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: a puzzle has been loaded.
pub struct PuzzleLoaded;

impl PuzzleLoaded {
    /// Fails with [`SessionError::NotLoaded`] while the session is loading.
    #[instrument(skip(session))]
    pub fn check(session: &PuzzleSession) -> Result<(), SessionError> {
        if session.puzzle().is_none() {
            warn!("Move attempted before a puzzle was loaded");
            Err(SessionError::NotLoaded)
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for guess mutations.
///
/// Preconditions:
/// - A puzzle is loaded
///
/// Postconditions:
/// - Cipher, one-to-one and reverse-map invariants hold
/// - Exactly one snapshot was pushed onto the undo stack
pub struct MoveContract;

impl Contract<PuzzleSession, Move> for MoveContract {
    fn pre(session: &PuzzleSession, _action: &Move) -> Result<(), SessionError> {
        PuzzleLoaded::check(session)
    }

    fn post(before: &PuzzleSession, after: &PuzzleSession) -> Result<(), SessionError> {
        let puzzle = after.puzzle().ok_or(SessionError::NotLoaded)?;
        PuzzleInvariants::check_all(puzzle).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            SessionError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let expected = before.history().undo_len() + 1;
        let actual = after.history().undo_len();
        if actual != expected {
            warn!(expected, actual, "Move did not record history");
            return Err(SessionError::InvariantViolation(format!(
                "Postcondition failed: undo depth {} after move, expected {}",
                actual, expected
            )));
        }
        Ok(())
    }
}
