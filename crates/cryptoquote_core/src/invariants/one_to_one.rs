//! Guess invariant: a ciphertext letter backs at most one plaintext letter.

use super::Invariant;
use crate::guesses::Guesses;
use crate::letter::ALPHABET_LEN;
use crate::puzzle::Puzzle;
use tracing::{instrument, warn};

/// Invariant: no ciphertext letter is guessed for two plaintext letters.
pub struct OneToOneInvariant;

impl Invariant<Guesses> for OneToOneInvariant {
    #[instrument(skip(guesses))]
    fn holds(guesses: &Guesses) -> bool {
        let mut owners = [0u8; ALPHABET_LEN];
        for (_, cipher) in guesses.guess_map().entries() {
            owners[cipher.index()] += 1;
        }

        let valid = owners.iter().all(|count| *count <= 1);
        if !valid {
            warn!(?owners, "One-to-one guess invariant violated");
        }
        valid
    }

    fn description() -> &'static str {
        "A ciphertext letter may back only one plaintext letter"
    }
}

impl Invariant<Puzzle> for OneToOneInvariant {
    fn holds(puzzle: &Puzzle) -> bool {
        <Self as Invariant<Guesses>>::holds(puzzle.guesses())
    }

    fn description() -> &'static str {
        <Self as Invariant<Guesses>>::description()
    }
}
