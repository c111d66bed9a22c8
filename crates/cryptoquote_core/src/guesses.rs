//! The player's guesses and their inverse, kept consistent as one value.

use crate::action::Move;
use crate::letter::{ALPHABET_LEN, Letter};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Partial plaintext → ciphertext mapping guessed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuessMap([Option<Letter>; ALPHABET_LEN]);

/// Ciphertext → plaintext mapping derived from a [`GuessMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReverseGuessMap([Option<Letter>; ALPHABET_LEN]);

impl GuessMap {
    /// Guessed ciphertext letter for `plain`, if any.
    pub fn get(&self, plain: Letter) -> Option<Letter> {
        self.0[plain.index()]
    }

    /// Iterates the populated `(plain, cipher)` entries.
    pub fn entries(&self) -> impl Iterator<Item = (Letter, Letter)> + '_ {
        Letter::ALPHABET
            .into_iter()
            .filter_map(|plain| self.get(plain).map(|cipher| (plain, cipher)))
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.0.iter().flatten().count()
    }

    /// True if nothing has been guessed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn set(&mut self, plain: Letter, cipher: Option<Letter>) {
        self.0[plain.index()] = cipher;
    }
}

impl ReverseGuessMap {
    /// Plaintext letter currently backed by `cipher`, if any.
    pub fn get(&self, cipher: Letter) -> Option<Letter> {
        self.0[cipher.index()]
    }

    /// Iterates the populated `(cipher, plain)` entries.
    pub fn entries(&self) -> impl Iterator<Item = (Letter, Letter)> + '_ {
        Letter::ALPHABET
            .into_iter()
            .filter_map(|cipher| self.get(cipher).map(|plain| (cipher, plain)))
    }
}

/// Inverts every populated entry of `guesses`.
///
/// Pure derivation; the reverse map is always rebuilt from scratch rather
/// than patched.
pub fn invert(guesses: &GuessMap) -> ReverseGuessMap {
    let mut reverse = ReverseGuessMap::default();
    for (plain, cipher) in guesses.entries() {
        reverse.0[cipher.index()] = Some(plain);
    }
    reverse
}

/// A guess map together with its inverse.
///
/// This is also the unit stored by the undo/redo history.
///
/// Only the forward map is serialized; the reverse map is rebuilt on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "GuessMap", into = "GuessMap")]
pub struct Guesses {
    guess_map: GuessMap,
    reverse: ReverseGuessMap,
}

/// Error returned when a guess map cannot be inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GuessError {
    /// The ciphertext letter is guessed for two plaintext letters.
    #[display("{} is guessed for more than one letter", _0)]
    DuplicateCipher(Letter),
}

impl std::error::Error for GuessError {}

impl TryFrom<GuessMap> for Guesses {
    type Error = GuessError;

    fn try_from(guess_map: GuessMap) -> Result<Self, Self::Error> {
        let mut seen = [false; ALPHABET_LEN];
        for (_, cipher) in guess_map.entries() {
            if seen[cipher.index()] {
                return Err(GuessError::DuplicateCipher(cipher));
            }
            seen[cipher.index()] = true;
        }
        Ok(Self::from_guess_map(guess_map))
    }
}

impl From<Guesses> for GuessMap {
    fn from(guesses: Guesses) -> Self {
        guesses.guess_map
    }
}

impl Guesses {
    /// Empty guesses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a consistent pair from a forward map alone.
    ///
    /// The caller guarantees no ciphertext letter appears twice; use
    /// [`Guesses::try_from`] for untrusted maps.
    pub fn from_guess_map(guess_map: GuessMap) -> Self {
        Self {
            reverse: invert(&guess_map),
            guess_map,
        }
    }

    /// Assembles a pair without re-deriving the reverse map.
    #[cfg(test)]
    pub(crate) fn from_parts(guess_map: GuessMap, reverse: ReverseGuessMap) -> Self {
        Self { guess_map, reverse }
    }

    /// Returns the forward map.
    pub fn guess_map(&self) -> &GuessMap {
        &self.guess_map
    }

    /// Returns the reverse map.
    pub fn reverse(&self) -> &ReverseGuessMap {
        &self.reverse
    }

    /// Guessed ciphertext letter for `plain`.
    pub fn guess_for(&self, plain: Letter) -> Option<Letter> {
        self.guess_map.get(plain)
    }

    /// Plaintext letter currently paired with `cipher`.
    pub fn plain_for(&self, cipher: Letter) -> Option<Letter> {
        self.reverse.get(cipher)
    }

    /// Number of guessed letters.
    pub fn len(&self) -> usize {
        self.guess_map.len()
    }

    /// True if nothing has been guessed.
    pub fn is_empty(&self) -> bool {
        self.guess_map.is_empty()
    }

    /// Applies a move, returning the new consistent pair.
    ///
    /// If `mv.cipher` already backs another plaintext letter, that letter's
    /// guess is cleared first so a ciphertext letter never backs two
    /// plaintext letters at once.
    #[instrument(skip(self))]
    pub fn apply_move(&self, mv: Move) -> Self {
        let mut guess_map = self.guess_map;

        if let Some(previous) = self.reverse.get(mv.cipher)
            && previous != mv.plain
        {
            debug!(%previous, cipher = %mv.cipher, "Clearing earlier owner of ciphertext letter");
            guess_map.set(previous, None);
        }
        guess_map.set(mv.plain, Some(mv.cipher));

        Self::from_guess_map(guess_map)
    }

    /// Removes the guess for `plain`, if there is one.
    #[instrument(skip(self))]
    pub fn clear_guess(&self, plain: Letter) -> Self {
        let mut guess_map = self.guess_map;
        guess_map.set(plain, None);
        Self::from_guess_map(guess_map)
    }
}
