//! First-class move type.
//!
//! A move is the player's claim that one plaintext letter is encrypted as one
//! ciphertext letter. Moves are plain values: they can be logged, compared and
//! replayed independently of the session that produced them.

use crate::letter::{Letter, LetterError};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A proposed pairing of a plaintext letter with a ciphertext letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The plaintext letter being guessed.
    pub plain: Letter,
    /// The ciphertext letter the player believes `plain` encrypts to.
    pub cipher: Letter,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(plain: Letter, cipher: Letter) -> Self {
        Self { plain, cipher }
    }

    /// Parses a move from two characters, rejecting anything outside `A`-`Z`.
    ///
    /// This is the validation boundary: once a `Move` exists both halves are
    /// known to be letters.
    #[instrument]
    pub fn from_chars(plain: char, cipher: char) -> Result<Self, LetterError> {
        Ok(Self::new(Letter::from_char(plain)?, Letter::from_char(cipher)?))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is encrypted as {}", self.plain, self.cipher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_chars_normalizes_case() {
        let mv = Move::from_chars('a', 'x').unwrap();
        assert_eq!(mv.plain.as_char(), 'A');
        assert_eq!(mv.cipher.as_char(), 'X');
        assert_eq!(mv.to_string(), "A is encrypted as X");
    }

    #[test]
    fn test_from_chars_rejects_punctuation() {
        assert_eq!(
            Move::from_chars('A', '!'),
            Err(LetterError::NotALetter('!'))
        );
        assert_eq!(
            Move::from_chars(' ', 'B'),
            Err(LetterError::NotALetter(' '))
        );
    }
}
