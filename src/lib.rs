//! CryptoQuote - terminal cryptogram game
//!
//! Fetches a quote, encrypts it with a random substitution cipher and lets
//! the player decode it in the terminal.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with environment overrides ([`GameConfig`])
//! - **Providers**: where quotes come from ([`QuoteProvider`])
//! - **TUI**: ratatui front end driving a [`cryptoquote_core::PuzzleSession`]
//!
//! # Example
//!
//! ```no_run
//! use cryptoquote::{GameConfig, HttpQuoteProvider, QuoteProvider};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default().with_env_overrides();
//! let provider = HttpQuoteProvider::new(config)?;
//! let quote = provider.fetch().await?;
//! println!("{}", quote.quote);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod provider;
pub mod tui;

pub use config::{API_URL_ENV, ConfigError, GameConfig};
pub use provider::{
    HttpQuoteProvider, ProviderError, QuoteFile, QuoteProvider, StaticQuoteProvider,
    builtin_quotes, parse_quotes,
};
