//! Random substitution ciphers with no fixed points.

use crate::letter::{ALPHABET_LEN, Letter};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The hidden plaintext → ciphertext substitution for one puzzle.
///
/// Always a bijection over the alphabet and always a derangement: no letter
/// encrypts to itself. Built once by [`EncryptMap::generate`] and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[Letter; ALPHABET_LEN]", into = "[Letter; ALPHABET_LEN]")]
pub struct EncryptMap {
    forward: [Letter; ALPHABET_LEN],
}

/// Error returned when a substitution table is not a valid puzzle cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum CipherError {
    /// Some ciphertext letter is the target of two plaintext letters.
    #[display("{} is the ciphertext for more than one letter", _0)]
    Duplicate(Letter),
    /// A letter encrypts to itself.
    #[display("{} encrypts to itself", _0)]
    FixedPoint(Letter),
}

impl std::error::Error for CipherError {}

impl TryFrom<[Letter; ALPHABET_LEN]> for EncryptMap {
    type Error = CipherError;

    fn try_from(forward: [Letter; ALPHABET_LEN]) -> Result<Self, Self::Error> {
        let mut seen = [false; ALPHABET_LEN];
        for (plain, cipher) in Letter::ALPHABET.into_iter().zip(forward) {
            if plain == cipher {
                return Err(CipherError::FixedPoint(plain));
            }
            if seen[cipher.index()] {
                return Err(CipherError::Duplicate(cipher));
            }
            seen[cipher.index()] = true;
        }
        Ok(Self { forward })
    }
}

impl From<EncryptMap> for [Letter; ALPHABET_LEN] {
    fn from(map: EncryptMap) -> Self {
        map.forward
    }
}

impl EncryptMap {
    /// Draws a fresh derangement from `rng`.
    ///
    /// Each plaintext letter in turn draws uniformly from the ciphertext
    /// letters not yet assigned, resampling whenever the draw equals the
    /// plaintext letter. If the only letter left in the pool is the
    /// plaintext letter itself the draw cannot succeed, so the whole
    /// alphabet is drawn again.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut restarts = 0usize;
        loop {
            if let Some(forward) = Self::draw(rng) {
                debug!(restarts, "Generated derangement");
                return Self { forward };
            }
            restarts += 1;
        }
    }

    fn draw<R: Rng>(rng: &mut R) -> Option<[Letter; ALPHABET_LEN]> {
        let mut pool: Vec<Letter> = Letter::ALPHABET.to_vec();
        let mut forward = Letter::ALPHABET;

        for plain in Letter::ALPHABET {
            if pool.len() == 1 && pool[0] == plain {
                return None;
            }
            let index = loop {
                let candidate = rng.random_range(0..pool.len());
                if pool[candidate] != plain {
                    break candidate;
                }
            };
            forward[plain.index()] = pool.swap_remove(index);
        }

        Some(forward)
    }

    /// Builds a map from an explicit table, validating both invariants.
    ///
    /// Returns `None` unless `forward` is a permutation with no fixed points.
    pub fn from_table(forward: [Letter; ALPHABET_LEN]) -> Option<Self> {
        Self::try_from(forward).ok()
    }

    /// Ciphertext letter for `plain`.
    pub fn encrypt(&self, plain: Letter) -> Letter {
        self.forward[plain.index()]
    }

    /// Encrypts a character, passing literals through unchanged.
    pub fn encrypt_char(&self, c: char) -> char {
        match Letter::from_char(c) {
            Ok(letter) => self.encrypt(letter).as_char(),
            Err(_) => c,
        }
    }

    /// Encrypts a whole string; letters are upper-cased, literals kept.
    pub fn encrypt_text(&self, text: &str) -> String {
        text.chars().map(|c| self.encrypt_char(c)).collect()
    }

    /// Iterates `(plain, cipher)` pairs in alphabetical order of `plain`.
    pub fn pairs(&self) -> impl Iterator<Item = (Letter, Letter)> + '_ {
        Letter::ALPHABET.into_iter().map(|plain| (plain, self.encrypt(plain)))
    }

    /// True if no letter maps to itself.
    pub fn is_derangement(&self) -> bool {
        self.pairs().all(|(plain, cipher)| plain != cipher)
    }

    /// True if every letter appears exactly once as a ciphertext target.
    pub fn is_bijection(&self) -> bool {
        let mut seen = [false; ALPHABET_LEN];
        for cipher in self.forward {
            if seen[cipher.index()] {
                return false;
            }
            seen[cipher.index()] = true;
        }
        seen.iter().all(|s| *s)
    }
}
