//! Quote provider backed by the JSON quote API.

use super::{ProviderError, QuoteProvider};
use crate::config::GameConfig;
use cryptoquote_core::Quote;
use tracing::{debug, error, info, instrument, warn};

/// Fetches quotes over HTTP, retrying transient failures.
///
/// The endpoint returns a JSON array of `{author, category, quote}` objects;
/// the first usable element is taken.
#[derive(Debug, Clone)]
pub struct HttpQuoteProvider {
    client: reqwest::Client,
    config: GameConfig,
}

impl HttpQuoteProvider {
    /// Creates a provider using the endpoint, timeout and retry policy from
    /// `config`.
    #[instrument(skip(config), fields(api = %config.quote_api_url()))]
    pub fn new(config: GameConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build HTTP client");
                ProviderError::Transport(e.to_string())
            })?;
        Ok(Self { client, config })
    }

    #[instrument(skip(self))]
    async fn fetch_once(&self) -> Result<Quote, ProviderError> {
        debug!("Sending quote request");
        let response = self
            .client
            .get(self.config.quote_api_url())
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Quote service error");
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        debug!(body_length = body.len(), "Received quote response");
        parse_quotes(&body)
    }
}

#[async_trait::async_trait]
impl QuoteProvider for HttpQuoteProvider {
    #[instrument(skip(self), fields(attempts = *self.config.fetch_attempts()))]
    async fn fetch(&self) -> Result<Quote, ProviderError> {
        let attempts = (*self.config.fetch_attempts()).max(1);
        let mut attempt = 1;
        loop {
            match self.fetch_once().await {
                Ok(quote) => {
                    info!(attempt, author = %quote.author, "Fetched quote");
                    return Ok(quote);
                }
                Err(e) if e.is_retryable() && attempt < attempts => {
                    let wait = self.config.retry_backoff(attempt);
                    warn!(attempt, error = %e, wait_ms = wait.as_millis() as u64, "Quote fetch failed, retrying");
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(attempt, error = %e, "Quote fetch failed");
                    return Err(e);
                }
            }
        }
    }

    fn name(&self) -> &str {
        "quote API"
    }
}

/// Parses a quote API body: a JSON array whose first non-blank element wins.
#[instrument(skip(body), fields(body_length = body.len()))]
pub fn parse_quotes(body: &str) -> Result<Quote, ProviderError> {
    let quotes: Vec<Quote> = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Quote response did not parse");
        ProviderError::Parse(e.to_string())
    })?;
    debug!(count = quotes.len(), "Parsed quotes");

    quotes
        .into_iter()
        .find(|quote| !quote.is_blank())
        .ok_or(ProviderError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptoquote_core::Category;

    #[test]
    fn test_parse_takes_first_quote() {
        let body = r#"[
            {"author": "Mae West", "category": "famous", "quote": "Too much of a good thing can be wonderful."},
            {"author": "Yoda", "category": "movies", "quote": "Do or do not."}
        ]"#;
        let quote = parse_quotes(body).unwrap();
        assert_eq!(quote.author, "Mae West");
        assert_eq!(quote.category, Category::Famous);
    }

    #[test]
    fn test_parse_skips_blank_entries() {
        let body = r#"[
            {"author": "", "category": "famous", "quote": "  "},
            {"author": "Yoda", "category": "movies", "quote": "Do or do not."}
        ]"#;
        assert_eq!(parse_quotes(body).unwrap().author, "Yoda");
    }

    #[test]
    fn test_parse_empty_array() {
        assert_eq!(parse_quotes("[]"), Err(ProviderError::Empty));
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let body = r#"[{"author": "A", "category": "poetry", "quote": "B"}]"#;
        assert!(matches!(parse_quotes(body), Err(ProviderError::Parse(_))));
    }
}
