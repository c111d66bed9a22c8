//! Cryptoquote core - cryptogram puzzle logic
//!
//! A quote is encrypted with a random substitution cipher in which no letter
//! maps to itself. The player pairs plaintext letters with ciphertext letters
//! until every letter of the quote and its author is decoded.
//!
//! # Architecture
//!
//! - **Cipher**: derangement alphabet generation ([`EncryptMap`])
//! - **Guesses**: the player's mapping and its inverse ([`Guesses`])
//! - **History**: undo/redo snapshots ([`History`])
//! - **Session**: selection protocol, moves and win detection ([`PuzzleSession`])
//!
//! This crate does no I/O. Quote fetching and rendering live in the
//! `cryptoquote` application crate.
//!
//! # Example
//!
//! ```
//! use cryptoquote_core::{Category, Letter, PuzzleSession, Quote, Selection};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut session = PuzzleSession::new();
//! session.load(&Quote::new("Yoda", Category::Movies, "Do or do not."), &mut rng);
//!
//! let plain = Letter::from_char('D').unwrap();
//! let cipher = session.puzzle().unwrap().encrypt_map().encrypt(plain);
//! session.select_plain(plain).unwrap();
//! assert!(matches!(session.select_cipher(cipher), Ok(Selection::Pending(_))));
//! session.commit_pending().unwrap();
//! assert!(session.can_undo());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod cipher;
pub mod contracts;
mod guesses;
mod history;
pub mod invariants;
mod letter;
mod puzzle;
mod quote;
mod session;

pub use action::Move;
pub use cipher::{CipherError, EncryptMap};
pub use guesses::{GuessError, GuessMap, Guesses, ReverseGuessMap, invert};
pub use history::History;
pub use letter::{ALPHABET_LEN, Letter, LetterError};
pub use puzzle::{Cell, Puzzle};
pub use quote::{Category, Quote};
pub use session::{Phase, PuzzleSession, Selection, SessionError};
