//! Quote providers.
//!
//! A provider hands the game one quote per call. The HTTP provider talks to
//! the public quote API; the static provider works offline from a built-in
//! list or a TOML file.

mod http;
mod static_quotes;

pub use http::{HttpQuoteProvider, parse_quotes};
pub use static_quotes::{QuoteFile, StaticQuoteProvider, builtin_quotes};

use cryptoquote_core::Quote;

/// Error returned when a quote cannot be obtained.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ProviderError {
    /// The request could not be sent or the body could not be read.
    #[display("Request failed: {}", _0)]
    Transport(String),

    /// The server answered with a non-success status.
    #[display("Quote service returned {}", _0)]
    Status(u16),

    /// The body was not a list of quotes.
    #[display("Malformed quote data: {}", _0)]
    Parse(String),

    /// The source had no usable quote.
    #[display("No quotes available")]
    Empty,

    /// A quote file could not be read.
    #[display("Could not read quote file: {}", _0)]
    Io(String),
}

impl std::error::Error for ProviderError {}

impl ProviderError {
    /// True for failures another attempt might fix.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Transport(_) => true,
            ProviderError::Status(code) => *code >= 500 || *code == 429,
            ProviderError::Parse(_) | ProviderError::Empty | ProviderError::Io(_) => false,
        }
    }
}

/// Source of puzzle quotes.
#[async_trait::async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches one quote.
    async fn fetch(&self) -> Result<Quote, ProviderError>;

    /// Short name for logs and the status line.
    fn name(&self) -> &str;
}
