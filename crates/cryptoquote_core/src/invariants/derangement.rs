//! Cipher invariant: the hidden alphabet is a bijective derangement.

use super::Invariant;
use crate::cipher::EncryptMap;
use crate::puzzle::Puzzle;
use tracing::{instrument, warn};

/// Invariant: every letter encrypts to a different letter, and every letter
/// is some letter's ciphertext.
pub struct DerangementInvariant;

impl Invariant<EncryptMap> for DerangementInvariant {
    #[instrument(skip(map))]
    fn holds(map: &EncryptMap) -> bool {
        let fixed_points: Vec<char> = map
            .pairs()
            .filter(|(plain, cipher)| plain == cipher)
            .map(|(plain, _)| plain.as_char())
            .collect();
        let bijective = map.is_bijection();

        let valid = fixed_points.is_empty() && bijective;
        if !valid {
            warn!(?fixed_points, bijective, "Cipher invariant violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Cipher must be a bijection with no letter mapped to itself"
    }
}

impl Invariant<Puzzle> for DerangementInvariant {
    fn holds(puzzle: &Puzzle) -> bool {
        <Self as Invariant<EncryptMap>>::holds(puzzle.encrypt_map())
    }

    fn description() -> &'static str {
        <Self as Invariant<EncryptMap>>::description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::Letter;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_cipher_holds() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let map = EncryptMap::generate(&mut rng);
            assert!(<DerangementInvariant as Invariant<EncryptMap>>::holds(&map));
        }
    }

    #[test]
    fn test_reversed_alphabet_holds() {
        let mut table = Letter::ALPHABET;
        table.reverse();
        // 26 letters reversed has no middle element, so no fixed point.
        let map = EncryptMap::from_table(table).unwrap();
        assert!(<DerangementInvariant as Invariant<EncryptMap>>::holds(&map));
    }
}
