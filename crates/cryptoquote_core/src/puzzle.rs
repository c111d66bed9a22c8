//! One encrypted quote plus the player's guesses against it.

use crate::cipher::EncryptMap;
use crate::guesses::Guesses;
use crate::letter::Letter;
use crate::quote::{Category, Quote};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A single displayed character of an encrypted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// An encrypted letter and the plaintext currently guessed for it.
    Letter {
        /// Ciphertext letter shown to the player.
        cipher: Letter,
        /// Plaintext the player has paired with `cipher`, if any.
        guess: Option<Letter>,
    },
    /// A space, punctuation mark or other character shown as itself.
    Literal(char),
}

/// Puzzle data: quote, hidden cipher, and current guesses.
///
/// Created once per load and replaced wholesale by the next load; only the
/// guesses change in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    quote: Quote,
    encrypt_map: EncryptMap,
    guesses: Guesses,
}

impl Puzzle {
    /// Encrypts `quote` with a freshly generated cipher.
    #[instrument(skip(quote, rng), fields(category = %quote.category))]
    pub fn generate<R: Rng>(quote: &Quote, rng: &mut R) -> Self {
        Self::with_cipher(quote, EncryptMap::generate(rng))
    }

    /// Encrypts `quote` with a known cipher.
    pub fn with_cipher(quote: &Quote, encrypt_map: EncryptMap) -> Self {
        Self {
            quote: quote.normalized(),
            encrypt_map,
            guesses: Guesses::new(),
        }
    }

    /// The upper-cased quote.
    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    /// The quote's category.
    pub fn category(&self) -> Category {
        self.quote.category
    }

    /// The hidden cipher.
    pub fn encrypt_map(&self) -> &EncryptMap {
        &self.encrypt_map
    }

    /// Current guesses.
    pub fn guesses(&self) -> &Guesses {
        &self.guesses
    }

    pub(crate) fn set_guesses(&mut self, guesses: Guesses) {
        self.guesses = guesses;
    }

    /// Every character that has to be decoded: quote then author.
    fn full_text(&self) -> impl Iterator<Item = char> + '_ {
        self.quote.quote.chars().chain(self.quote.author.chars())
    }

    /// True if every letter of quote and author is guessed correctly.
    ///
    /// Literals are trivially satisfied, so a text without letters counts as
    /// solved.
    #[instrument(skip(self))]
    pub fn is_solved(&self) -> bool {
        let solved = self
            .full_text()
            .filter_map(|c| Letter::from_char(c).ok())
            .all(|plain| self.guesses.guess_for(plain) == Some(self.encrypt_map.encrypt(plain)));
        debug!(solved, guessed = self.guesses.len(), "Checked win condition");
        solved
    }

    /// Plaintext letters that occur in quote or author, alphabetically.
    pub fn letters_in_play(&self) -> Vec<Letter> {
        let mut present = [false; crate::letter::ALPHABET_LEN];
        for letter in self.full_text().filter_map(|c| Letter::from_char(c).ok()) {
            present[letter.index()] = true;
        }
        Letter::ALPHABET
            .into_iter()
            .filter(|l| present[l.index()])
            .collect()
    }

    /// Encrypted rendering of `text` under the current guesses.
    pub fn cells(&self, text: &str) -> Vec<Cell> {
        text.chars()
            .map(|c| match Letter::from_char(c) {
                Ok(plain) => {
                    let cipher = self.encrypt_map.encrypt(plain);
                    Cell::Letter {
                        cipher,
                        guess: self.guesses.plain_for(cipher),
                    }
                }
                Err(_) => Cell::Literal(c),
            })
            .collect()
    }

    /// Cells for the quote text.
    pub fn quote_cells(&self) -> Vec<Cell> {
        self.cells(&self.quote.quote)
    }

    /// Cells for the author line.
    pub fn author_cells(&self) -> Vec<Cell> {
        self.cells(&self.quote.author)
    }

    /// The encrypted quote as plain text.
    pub fn cipher_quote(&self) -> String {
        self.encrypt_map.encrypt_text(&self.quote.quote)
    }

    /// The encrypted author as plain text.
    pub fn cipher_author(&self) -> String {
        self.encrypt_map.encrypt_text(&self.quote.author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Move;

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    /// A→B, B→C, ..., Z→A.
    fn shift_cipher() -> EncryptMap {
        let mut table = Letter::ALPHABET;
        table.rotate_left(1);
        EncryptMap::from_table(table).unwrap()
    }

    fn puzzle(quote: &str, author: &str) -> Puzzle {
        Puzzle::with_cipher(&Quote::new(author, Category::Famous, quote), shift_cipher())
    }

    #[test]
    fn test_text_is_uppercased_on_load() {
        let p = puzzle("ab, c", "d");
        assert_eq!(p.quote().quote, "AB, C");
        assert_eq!(p.cipher_quote(), "BC, D");
        assert_eq!(p.cipher_author(), "E");
    }

    #[test]
    fn test_solved_needs_quote_and_author() {
        let mut p = puzzle("AB", "C");
        let guesses = p
            .guesses()
            .apply_move(Move::new(letter('A'), letter('B')))
            .apply_move(Move::new(letter('B'), letter('C')));
        p.set_guesses(guesses);
        assert!(!p.is_solved());

        p.set_guesses(guesses.apply_move(Move::new(letter('C'), letter('D'))));
        assert!(p.is_solved());
    }

    #[test]
    fn test_extra_correct_guesses_do_not_matter() {
        let mut p = puzzle("A", "");
        let guesses = Guesses::new()
            .apply_move(Move::new(letter('A'), letter('B')))
            .apply_move(Move::new(letter('Q'), letter('Z')));
        p.set_guesses(guesses);
        assert!(p.is_solved());
    }

    #[test]
    fn test_text_without_letters_is_solved() {
        assert!(puzzle("... !!", "42").is_solved());
    }

    #[test]
    fn test_cells_show_reverse_guess() {
        let mut p = puzzle("A B", "");
        p.set_guesses(Guesses::new().apply_move(Move::new(letter('A'), letter('B'))));

        assert_eq!(
            p.quote_cells(),
            vec![
                Cell::Letter {
                    cipher: letter('B'),
                    guess: Some(letter('A')),
                },
                Cell::Literal(' '),
                Cell::Letter {
                    cipher: letter('C'),
                    guess: None,
                },
            ]
        );
    }

    #[test]
    fn test_letters_in_play() {
        let p = puzzle("Baba", "Cab");
        assert_eq!(p.letters_in_play(), vec![letter('A'), letter('B'), letter('C')]);
    }
}
