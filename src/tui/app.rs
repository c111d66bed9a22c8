//! Application state and logic.

use super::input::Command;
use cryptoquote_core::{Phase, PuzzleSession, Quote, Selection, SessionError};
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

/// Messages delivered to the UI loop from background tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The provider returned a quote.
    QuoteLoaded(Quote),
    /// The provider gave up.
    QuoteFailed(String),
    /// The commit delay for the move with this token has elapsed.
    CommitMove(u64),
}

/// Work the UI loop has to start on behalf of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Leave the game.
    Quit,
    /// Spawn a quote fetch.
    Fetch,
    /// Send `AppEvent::CommitMove(token)` after the commit delay.
    ScheduleCommit(u64),
}

/// Main application state.
pub struct App {
    session: PuzzleSession,
    rng: StdRng,
    status_message: String,
    fetching: bool,
    commit_token: u64,
    cipher_slot: bool,
}

impl App {
    /// Creates an app waiting for its first quote.
    pub fn new(rng: StdRng) -> Self {
        Self {
            session: PuzzleSession::new(),
            rng,
            status_message: "Fetching a quote...".to_string(),
            fetching: true,
            commit_token: 0,
            cipher_slot: false,
        }
    }

    /// The puzzle session.
    pub fn session(&self) -> &PuzzleSession {
        &self.session
    }

    /// Current status line.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True if the next letter goes to the ciphertext slot.
    pub fn is_cipher_slot(&self) -> bool {
        self.cipher_slot
    }

    /// True while a fetch is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Handles a key command.
    #[instrument(skip(self))]
    pub fn handle_command(&mut self, command: Command) -> Effect {
        match command {
            Command::Quit => {
                info!("User quit");
                Effect::Quit
            }
            Command::NewPuzzle => self.request_puzzle(),
            Command::Letter(letter) => {
                if self.session.phase() == Phase::Loading {
                    return Effect::None;
                }
                let outcome = if std::mem::take(&mut self.cipher_slot) {
                    self.session.select_cipher(letter)
                } else {
                    self.session.type_letter(letter)
                };
                self.after_selection(outcome)
            }
            Command::CipherSlot => {
                if self.session.phase() == Phase::Loading {
                    return Effect::None;
                }
                self.cipher_slot = !self.cipher_slot;
                self.status_message = if self.cipher_slot {
                    "Type a ciphertext letter".to_string()
                } else {
                    "Type a plaintext letter".to_string()
                };
                Effect::None
            }
            Command::ClearGuess => self.clear_guess(),
            Command::Undo => {
                let outcome = self.session.undo();
                self.report_history(outcome, "Undid last move", "Nothing to undo")
            }
            Command::Redo => {
                let outcome = self.session.redo();
                self.report_history(outcome, "Redid move", "Nothing to redo")
            }
            Command::ClearSelection => {
                self.cipher_slot = false;
                self.session.clear_selection();
                self.status_message = "Selection cleared".to_string();
                Effect::None
            }
        }
    }

    /// Handles a message from a background task.
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: AppEvent) -> Effect {
        match event {
            AppEvent::QuoteLoaded(quote) => {
                self.fetching = false;
                let category = quote.category;
                self.session.load(&quote, &mut self.rng);
                self.status_message = if self.session.is_winner() {
                    "Nothing to decode in this one. Ctrl+N for another.".to_string()
                } else {
                    format!("New {} quote. Type a letter to start.", category)
                };
                Effect::None
            }
            AppEvent::QuoteFailed(reason) => {
                self.fetching = false;
                warn!(%reason, "Quote unavailable");
                self.status_message =
                    format!("Could not load a quote: {}. Press Ctrl+N to retry.", reason);
                Effect::None
            }
            AppEvent::CommitMove(token) if token == self.commit_token => {
                let was_winner = self.session.is_winner();
                match self.session.commit_pending() {
                    Ok(Some(mv)) => {
                        self.status_message = if !was_winner && self.session.is_winner() {
                            format!("Solved in {} moves! Ctrl+N for a new quote.", self.session.moves_made())
                        } else {
                            format!("Guessed {}", mv)
                        };
                    }
                    Ok(None) => debug!("Pending move already committed"),
                    Err(e) => self.report_error(e),
                }
                Effect::None
            }
            AppEvent::CommitMove(token) => {
                debug!(token, current = self.commit_token, "Ignoring stale commit");
                Effect::None
            }
        }
    }

    fn request_puzzle(&mut self) -> Effect {
        if self.fetching {
            debug!("Fetch already in flight");
            return Effect::None;
        }
        self.fetching = true;
        self.status_message = "Fetching a new quote...".to_string();
        Effect::Fetch
    }

    fn clear_guess(&mut self) -> Effect {
        let Some(plain) = self.session.selected_plain() else {
            self.status_message = "Select a plaintext letter to clear".to_string();
            return Effect::None;
        };
        match self.session.clear_guess(plain) {
            Ok(true) => {
                self.session.clear_selection();
                self.status_message = format!("Cleared guess for {}", plain);
            }
            Ok(false) => self.status_message = format!("{} has no guess", plain),
            Err(e) => self.report_error(e),
        }
        Effect::None
    }

    fn after_selection(&mut self, outcome: Result<Selection, SessionError>) -> Effect {
        match outcome {
            Ok(Selection::Pending(mv)) => {
                self.commit_token += 1;
                self.status_message = mv.to_string();
                Effect::ScheduleCommit(self.commit_token)
            }
            Ok(Selection::Selected) => {
                self.status_message = match (
                    self.session.selected_plain(),
                    self.session.selected_cipher(),
                ) {
                    (Some(plain), _) => format!("{} is encrypted as ...", plain),
                    (None, Some(cipher)) => format!("? is encrypted as {}", cipher),
                    (None, None) => "Pick a plaintext letter".to_string(),
                };
                Effect::None
            }
            Err(e) => {
                self.report_error(e);
                Effect::None
            }
        }
    }

    fn report_history(
        &mut self,
        outcome: Result<bool, SessionError>,
        done: &str,
        noop: &str,
    ) -> Effect {
        match outcome {
            Ok(true) => self.status_message = done.to_string(),
            Ok(false) => self.status_message = noop.to_string(),
            Err(e) => self.report_error(e),
        }
        Effect::None
    }

    fn report_error(&mut self, error: SessionError) {
        warn!(%error, "Session command failed");
        self.status_message = error.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptoquote_core::{Category, Letter};
    use rand::SeedableRng;

    fn letter(c: char) -> Command {
        Command::Letter(Letter::from_char(c).unwrap())
    }

    fn loaded_app() -> App {
        let mut app = App::new(StdRng::seed_from_u64(11));
        let quote = Quote::new("Yoda", Category::Movies, "Do or do not");
        app.handle_event(AppEvent::QuoteLoaded(quote));
        app
    }

    #[test]
    fn test_letters_ignored_while_loading() {
        let mut app = App::new(StdRng::seed_from_u64(1));
        assert_eq!(app.handle_command(letter('A')), Effect::None);
        assert_eq!(app.session().phase(), Phase::Loading);
    }

    #[test]
    fn test_pair_schedules_commit() {
        let mut app = loaded_app();
        assert!(!app.is_fetching());
        assert_eq!(app.handle_command(letter('D')), Effect::None);
        assert_eq!(app.handle_command(letter('X')), Effect::ScheduleCommit(1));
        assert_eq!(app.status_message(), "D is encrypted as X");

        app.handle_event(AppEvent::CommitMove(1));
        assert_eq!(app.session().moves_made(), 1);
        assert!(app.session().can_undo());
    }

    #[test]
    fn test_stale_commit_is_ignored() {
        let mut app = loaded_app();
        app.handle_command(letter('D'));
        app.handle_command(letter('X'));
        // Typing on commits the first pair and forms a second one.
        app.handle_command(letter('O'));
        assert_eq!(app.handle_command(letter('Y')), Effect::ScheduleCommit(2));
        assert_eq!(app.session().moves_made(), 1);

        app.handle_event(AppEvent::CommitMove(1));
        assert!(app.session().pending_move().is_some());
        app.handle_event(AppEvent::CommitMove(2));
        assert_eq!(app.session().moves_made(), 2);
    }

    #[test]
    fn test_failed_fetch_keeps_loading_and_allows_retry() {
        let mut app = App::new(StdRng::seed_from_u64(2));
        assert_eq!(app.handle_command(Command::NewPuzzle), Effect::None);

        app.handle_event(AppEvent::QuoteFailed("timed out".to_string()));
        assert_eq!(app.session().phase(), Phase::Loading);
        assert!(app.status_message().contains("timed out"));
        assert_eq!(app.handle_command(Command::NewPuzzle), Effect::Fetch);
    }

    #[test]
    fn test_undo_with_empty_history() {
        let mut app = loaded_app();
        app.handle_command(Command::Undo);
        assert_eq!(app.status_message(), "Nothing to undo");
    }

    #[test]
    fn test_cipher_slot_pairs_from_ciphertext_side() {
        let mut app = loaded_app();
        assert_eq!(app.handle_command(Command::CipherSlot), Effect::None);
        assert!(app.is_cipher_slot());

        assert_eq!(app.handle_command(letter('X')), Effect::None);
        assert!(!app.is_cipher_slot());
        assert_eq!(app.status_message(), "? is encrypted as X");

        assert_eq!(app.handle_command(letter('D')), Effect::ScheduleCommit(1));
        let pending = app.session().pending_move().unwrap();
        assert_eq!(pending.plain, Letter::from_char('D').unwrap());
        assert_eq!(pending.cipher, Letter::from_char('X').unwrap());
    }

    #[test]
    fn test_cipher_slot_toggles_off() {
        let mut app = loaded_app();
        app.handle_command(Command::CipherSlot);
        app.handle_command(Command::CipherSlot);
        assert!(!app.is_cipher_slot());
        app.handle_command(letter('D'));
        assert_eq!(app.session().selected_plain(), Some(Letter::from_char('D').unwrap()));
    }

    #[test]
    fn test_clear_guess_for_selected_letter() {
        let mut app = loaded_app();
        app.handle_command(letter('D'));
        app.handle_command(letter('X'));
        app.handle_event(AppEvent::CommitMove(1));

        app.handle_command(letter('D'));
        assert_eq!(app.handle_command(Command::ClearGuess), Effect::None);
        assert_eq!(app.status_message(), "Cleared guess for D");

        let d = Letter::from_char('D').unwrap();
        let guesses = app.session().puzzle().unwrap().guesses();
        assert_eq!(guesses.guess_for(d), None);
        assert_eq!(app.session().selected_plain(), None);
        assert_eq!(app.session().history().undo_len(), 2);
    }

    #[test]
    fn test_clear_guess_without_selection() {
        let mut app = loaded_app();
        app.handle_command(Command::ClearGuess);
        assert_eq!(app.status_message(), "Select a plaintext letter to clear");
    }

    #[test]
    fn test_quit() {
        let mut app = loaded_app();
        assert_eq!(app.handle_command(Command::Quit), Effect::Quit);
    }
}
