//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable that overrides [`GameConfig::quote_api_url`].
pub const API_URL_ENV: &str = "CRYPTOQUOTE_API_URL";

/// Runtime settings for the game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Endpoint returning a JSON array of quotes.
    #[serde(default = "default_quote_api_url")]
    quote_api_url: String,

    /// Pause between completing a pair and committing the move.
    #[serde(default = "default_commit_delay_ms")]
    commit_delay_ms: u64,

    /// Attempts per quote fetch before giving up.
    #[serde(default = "default_fetch_attempts")]
    fetch_attempts: u32,

    /// Backoff step between fetch attempts; attempt `n` waits `n * step`.
    #[serde(default = "default_retry_backoff_ms")]
    retry_backoff_ms: u64,

    /// Timeout for a single HTTP request.
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,

    /// Log file used while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Default log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[instrument]
fn default_quote_api_url() -> String {
    "https://wmoore98-quote.herokuapp.com/api/quotes".to_string()
}

fn default_commit_delay_ms() -> u64 {
    300
}

fn default_fetch_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_request_timeout_ms() -> u64 {
    5000
}

fn default_log_file() -> PathBuf {
    PathBuf::from("cryptoquote.log")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            quote_api_url: default_quote_api_url(),
            commit_delay_ms: default_commit_delay_ms(),
            fetch_attempts: default_fetch_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text. Missing keys take their defaults.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.fetch_attempts == 0 {
            return Err(ConfigError::new(
                "fetch_attempts must be at least 1".to_string(),
            ));
        }

        info!(api = %config.quote_api_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise the defaults.
    ///
    /// A file that exists but does not parse is still an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies environment overrides (see [`API_URL_ENV`]).
    #[instrument(skip(self))]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => self.with_quote_api_url(url),
            _ => self,
        }
    }

    /// Replaces the quote endpoint.
    pub fn with_quote_api_url(mut self, url: impl Into<String>) -> Self {
        self.quote_api_url = url.into();
        debug!(api = %self.quote_api_url, "Quote endpoint overridden");
        self
    }

    /// Replaces the commit delay.
    pub fn with_commit_delay_ms(mut self, delay: u64) -> Self {
        self.commit_delay_ms = delay;
        self
    }

    /// Commit delay as a [`Duration`].
    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Wait before retry number `attempt` (1-based).
    pub fn retry_backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = GameConfig::from_toml("commit_delay_ms = 0\nlog_level = \"debug\"").unwrap();
        assert_eq!(*config.commit_delay_ms(), 0);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(*config.fetch_attempts(), 3);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let err = GameConfig::from_toml("fetch_attempts = 0").unwrap_err();
        assert!(err.message.contains("fetch_attempts"));
    }

    #[test]
    fn test_retry_backoff_is_linear() {
        let config = GameConfig::default();
        assert_eq!(config.retry_backoff(1), Duration::from_millis(500));
        assert_eq!(config.retry_backoff(3), Duration::from_millis(1500));
    }
}
