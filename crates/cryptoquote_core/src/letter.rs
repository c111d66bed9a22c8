//! The 26-letter alphabet every cipher and guess is expressed in.

use serde::{Deserialize, Serialize};

/// Number of letters in the alphabet.
pub const ALPHABET_LEN: usize = 26;

/// An uppercase ASCII letter `A`-`Z`.
///
/// Only encryptable characters can become a `Letter`. Everything else in a
/// quote (spaces, punctuation, digits) stays a literal `char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(u8);

/// Error returned when a character is not an encryptable letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum LetterError {
    /// The character is outside `A`-`Z` (case-insensitive).
    #[display("{:?} is not a letter A-Z", _0)]
    NotALetter(char),
}

impl std::error::Error for LetterError {}

impl Letter {
    /// All 26 letters in alphabetical order.
    pub const ALPHABET: [Letter; ALPHABET_LEN] = {
        let mut letters = [Letter(0); ALPHABET_LEN];
        let mut i = 0;
        while i < ALPHABET_LEN {
            letters[i] = Letter(i as u8);
            i += 1;
        }
        letters
    };

    /// Parses a character, upper-casing ASCII lowercase input.
    ///
    /// Called for every character of every frame, so it is not instrumented.
    pub fn from_char(c: char) -> Result<Self, LetterError> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Ok(Self(upper as u8 - b'A'))
        } else {
            Err(LetterError::NotALetter(c))
        }
    }

    /// Returns the alphabet index (`A` = 0, `Z` = 25).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the uppercase character.
    pub fn as_char(self) -> char {
        (b'A' + self.0) as char
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Letter {
    type Error = LetterError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c)
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        letter.as_char()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_is_ordered() {
        let chars: String = Letter::ALPHABET.iter().map(|l| l.as_char()).collect();
        assert_eq!(chars, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }

    #[test]
    fn test_lowercase_is_normalized() {
        assert_eq!(Letter::from_char('q'), Letter::from_char('Q'));
        assert_eq!(Letter::from_char('q').unwrap().as_char(), 'Q');
    }

    #[test]
    fn test_non_letters_rejected() {
        for c in [' ', ',', '.', '7', '\'', 'É', 'ß'] {
            assert_eq!(Letter::from_char(c), Err(LetterError::NotALetter(c)));
        }
    }

    #[test]
    fn test_index() {
        let z = Letter::from_char('Z').unwrap();
        assert_eq!(z.index(), 25);
        assert_eq!(Letter::ALPHABET[z.index()], z);
    }

    #[test]
    fn test_serde_as_char() {
        let letter = Letter::from_char('K').unwrap();
        let json = serde_json::to_string(&letter).unwrap();
        assert_eq!(json, "\"K\"");
        let back: Letter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, letter);
        assert!(serde_json::from_str::<Letter>("\"!\"").is_err());
    }
}
