//! Puzzle session state machine.
//!
//! A [`PuzzleSession`] owns the current puzzle, the player's selections, the
//! undo/redo history and the win flag. Every mutation goes through its
//! methods; a presentation layer reads the view accessors and forwards input.
//!
//! Pairing a plaintext letter with a ciphertext letter is two-phase: the
//! selection that completes a pair returns [`Selection::Pending`], and the
//! move only lands when [`PuzzleSession::commit_pending`] is called. The
//! caller decides how long to wait in between.

use crate::action::Move;
use crate::contracts::{Contract, MoveContract, PuzzleLoaded};
use crate::history::History;
use crate::letter::Letter;
use crate::puzzle::Puzzle;
use crate::quote::Quote;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Lifecycle phase of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Phase {
    /// Waiting for quote data.
    Loading,
    /// Puzzle in play.
    Active,
    /// Puzzle solved. Moves are still accepted.
    Solved,
}

/// Result of selecting a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The letter is selected and waits for its counterpart.
    Selected,
    /// The selection completed a pair; call `commit_pending` to apply it.
    Pending(Move),
}

/// Errors returned by session commands.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// No puzzle has been loaded yet.
    #[display("No puzzle loaded")]
    NotLoaded,

    /// A postcondition failed after a move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for SessionError {}

/// One play-through of a quote puzzle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PuzzleSession {
    puzzle: Option<Puzzle>,
    history: History,
    selected_plain: Option<Letter>,
    selected_cipher: Option<Letter>,
    pending: Option<Move>,
    is_winner: bool,
    moves_made: usize,
}

impl PuzzleSession {
    /// Creates a session in the [`Phase::Loading`] phase.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────
    //  Loading
    // ─────────────────────────────────────────────────────────────

    /// Starts a new puzzle for `quote` with a freshly generated cipher.
    ///
    /// Valid from any phase. Resets guesses, selections, history and the win
    /// flag.
    #[instrument(skip(self, quote, rng), fields(author = %quote.author, category = %quote.category))]
    pub fn load<R: Rng>(&mut self, quote: &Quote, rng: &mut R) -> &Puzzle {
        self.load_puzzle(Puzzle::generate(quote, rng))
    }

    /// Starts play on an already built puzzle.
    #[instrument(skip_all)]
    pub fn load_puzzle(&mut self, puzzle: Puzzle) -> &Puzzle {
        self.history.clear();
        self.selected_plain = None;
        self.selected_cipher = None;
        self.pending = None;
        self.is_winner = false;
        self.moves_made = 0;

        let puzzle = self.puzzle.insert(puzzle);
        let solved = puzzle.is_solved();
        info!(
            letters = puzzle.letters_in_play().len(),
            solved, "Puzzle loaded"
        );
        self.is_winner = solved;
        puzzle
    }

    // ─────────────────────────────────────────────────────────────
    //  Selection protocol
    // ─────────────────────────────────────────────────────────────

    /// Selects a plaintext letter.
    ///
    /// Completes a pair if a ciphertext letter is already selected. Any
    /// pending move is committed first.
    #[instrument(skip(self))]
    pub fn select_plain(&mut self, plain: Letter) -> Result<Selection, SessionError> {
        PuzzleLoaded::check(self)?;
        self.commit_pending()?;

        self.selected_plain = Some(plain);
        Ok(self.pair_selection())
    }

    /// Selects a ciphertext letter; the mirror image of
    /// [`PuzzleSession::select_plain`].
    #[instrument(skip(self))]
    pub fn select_cipher(&mut self, cipher: Letter) -> Result<Selection, SessionError> {
        PuzzleLoaded::check(self)?;
        self.commit_pending()?;

        self.selected_cipher = Some(cipher);
        Ok(self.pair_selection())
    }

    fn pair_selection(&mut self) -> Selection {
        match (self.selected_plain, self.selected_cipher) {
            (Some(plain), Some(cipher)) => {
                let mv = Move::new(plain, cipher);
                debug!(%mv, "Move pending");
                self.pending = Some(mv);
                Selection::Pending(mv)
            }
            _ => Selection::Selected,
        }
    }

    /// Keyboard routing for a typed letter.
    ///
    /// With a plaintext letter selected the letter picks the ciphertext half
    /// of the pair; otherwise it picks a plaintext letter.
    #[instrument(skip(self))]
    pub fn type_letter(&mut self, letter: Letter) -> Result<Selection, SessionError> {
        PuzzleLoaded::check(self)?;
        self.commit_pending()?;

        if self.selected_plain.is_some() {
            self.select_cipher(letter)
        } else {
            self.select_plain(letter)
        }
    }

    /// Applies the pending move, if any, and clears both selections.
    ///
    /// Returns the committed move. Without a pending move this is a no-op.
    #[instrument(skip(self))]
    pub fn commit_pending(&mut self) -> Result<Option<Move>, SessionError> {
        let Some(mv) = self.pending.take() else {
            return Ok(None);
        };
        self.selected_plain = None;
        self.selected_cipher = None;
        self.apply_move(mv)?;
        Ok(Some(mv))
    }

    /// Drops both selections and any pending move.
    #[instrument(skip(self))]
    pub fn clear_selection(&mut self) {
        if let Some(mv) = self.pending.take() {
            debug!(%mv, "Discarding pending move");
        }
        self.selected_plain = None;
        self.selected_cipher = None;
    }

    // ─────────────────────────────────────────────────────────────
    //  Mutations
    // ─────────────────────────────────────────────────────────────

    /// Applies a move immediately, bypassing the selection protocol.
    ///
    /// Records the prior guesses for undo, clears redo, and re-checks the
    /// win condition.
    #[instrument(skip(self), fields(moves_made = self.moves_made))]
    pub fn apply_move(&mut self, mv: Move) -> Result<(), SessionError> {
        MoveContract::pre(self, &mv)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let Some(puzzle) = self.puzzle.as_mut() else {
            return Err(SessionError::NotLoaded);
        };
        let current = *puzzle.guesses();
        self.history.record_move(current);
        puzzle.set_guesses(current.apply_move(mv));
        self.moves_made += 1;
        info!(%mv, guessed = puzzle.guesses().len(), "Move applied");

        #[cfg(debug_assertions)]
        if let Err(e) = MoveContract::post(&before, self) {
            warn!(%mv, error = %e, "Rolling back move that broke a postcondition");
            *self = before;
            return Err(e);
        }

        self.check_win();
        Ok(())
    }

    /// Removes the guess for `plain` as an undoable step.
    ///
    /// Returns `false` (recording nothing) if `plain` had no guess.
    #[instrument(skip(self))]
    pub fn clear_guess(&mut self, plain: Letter) -> Result<bool, SessionError> {
        PuzzleLoaded::check(self)?;
        let Some(puzzle) = self.puzzle.as_mut() else {
            return Err(SessionError::NotLoaded);
        };

        let current = *puzzle.guesses();
        if current.guess_for(plain).is_none() {
            debug!("No guess to clear");
            return Ok(false);
        }
        self.history.record_move(current);
        puzzle.set_guesses(current.clear_guess(plain));
        info!(%plain, "Guess cleared");

        self.check_win();
        Ok(true)
    }

    /// Restores the guesses from before the last move.
    ///
    /// Returns `false` if there was nothing to undo. A pending move is left
    /// untouched.
    #[instrument(skip(self), fields(undo_len = self.history.undo_len()))]
    pub fn undo(&mut self) -> Result<bool, SessionError> {
        PuzzleLoaded::check(self)?;
        let Some(puzzle) = self.puzzle.as_mut() else {
            return Err(SessionError::NotLoaded);
        };

        match self.history.undo(*puzzle.guesses()) {
            Some(previous) => {
                puzzle.set_guesses(previous);
                info!("Undid move");
                self.check_win();
                Ok(true)
            }
            None => {
                debug!("Nothing to undo");
                Ok(false)
            }
        }
    }

    /// Re-applies the last undone move.
    #[instrument(skip(self), fields(redo_len = self.history.redo_len()))]
    pub fn redo(&mut self) -> Result<bool, SessionError> {
        PuzzleLoaded::check(self)?;
        let Some(puzzle) = self.puzzle.as_mut() else {
            return Err(SessionError::NotLoaded);
        };

        match self.history.redo(*puzzle.guesses()) {
            Some(next) => {
                puzzle.set_guesses(next);
                info!("Redid move");
                self.check_win();
                Ok(true)
            }
            None => {
                debug!("Nothing to redo");
                Ok(false)
            }
        }
    }

    /// Sets the win flag the first time the puzzle is solved.
    ///
    /// The flag is monotonic: it stays set until the next load.
    fn check_win(&mut self) {
        if self.is_winner {
            return;
        }
        if let Some(puzzle) = &self.puzzle
            && puzzle.is_solved()
        {
            info!(moves = self.moves_made, "Puzzle solved");
            self.is_winner = true;
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  View
    // ─────────────────────────────────────────────────────────────

    /// Current phase, derived from the loaded puzzle and the win flag.
    pub fn phase(&self) -> Phase {
        match (&self.puzzle, self.is_winner) {
            (None, _) => Phase::Loading,
            (Some(_), false) => Phase::Active,
            (Some(_), true) => Phase::Solved,
        }
    }

    /// The loaded puzzle, if any.
    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    /// Undo/redo stacks.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Selected plaintext letter.
    pub fn selected_plain(&self) -> Option<Letter> {
        self.selected_plain
    }

    /// Selected ciphertext letter.
    pub fn selected_cipher(&self) -> Option<Letter> {
        self.selected_cipher
    }

    /// Move waiting for `commit_pending`.
    pub fn pending_move(&self) -> Option<Move> {
        self.pending
    }

    /// True once the current puzzle has been solved.
    pub fn is_winner(&self) -> bool {
        self.is_winner
    }

    /// True if there is a move to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// True if there is a move to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Moves applied since the current puzzle loaded.
    pub fn moves_made(&self) -> usize {
        self.moves_made
    }
}
