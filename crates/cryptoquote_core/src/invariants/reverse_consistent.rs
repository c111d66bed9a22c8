//! Guess invariant: the reverse map is exactly the inverse of the guesses.

use super::Invariant;
use crate::guesses::{Guesses, invert};
use crate::puzzle::Puzzle;
use tracing::{instrument, warn};

/// Invariant: `reverse[guess[p]] == p` for every guessed `p`, and the
/// reverse map has no other entries.
pub struct ReverseConsistentInvariant;

impl Invariant<Guesses> for ReverseConsistentInvariant {
    #[instrument(skip(guesses))]
    fn holds(guesses: &Guesses) -> bool {
        let forward_ok = guesses
            .guess_map()
            .entries()
            .all(|(plain, cipher)| guesses.plain_for(cipher) == Some(plain));
        let backward_ok = guesses
            .reverse()
            .entries()
            .all(|(cipher, plain)| guesses.guess_for(plain) == Some(cipher));
        let derived_ok = invert(guesses.guess_map()) == *guesses.reverse();

        let valid = forward_ok && backward_ok && derived_ok;
        if !valid {
            warn!(forward_ok, backward_ok, derived_ok, "Reverse guess map out of sync");
        }
        valid
    }

    fn description() -> &'static str {
        "Reverse guess map must be the exact inverse of the guess map"
    }
}

impl Invariant<Puzzle> for ReverseConsistentInvariant {
    fn holds(puzzle: &Puzzle) -> bool {
        <Self as Invariant<Guesses>>::holds(puzzle.guesses())
    }

    fn description() -> &'static str {
        <Self as Invariant<Guesses>>::description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Move;
    use crate::guesses::{GuessMap, ReverseGuessMap};
    use crate::letter::Letter;

    #[test]
    fn test_holds_after_every_move() {
        let moves = [('A', 'X'), ('B', 'X'), ('B', 'Y'), ('C', 'X'), ('C', 'X')];
        let mut guesses = Guesses::new();
        for (plain, cipher) in moves {
            guesses = guesses.apply_move(Move::from_chars(plain, cipher).unwrap());
            assert!(<ReverseConsistentInvariant as Invariant<Guesses>>::holds(&guesses));
        }
    }

    #[test]
    fn test_detects_stale_reverse() {
        let mut forward = GuessMap::default();
        forward.set(Letter::from_char('A').unwrap(), Some(Letter::from_char('X').unwrap()));
        let stale = Guesses::from_parts(forward, ReverseGuessMap::default());
        assert!(!<ReverseConsistentInvariant as Invariant<Guesses>>::holds(&stale));
    }
}
