//! Offline quote provider.

use super::{ProviderError, QuoteProvider};
use cryptoquote_core::{Category, Quote};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

const BUILTIN: &[(&str, Category, &str)] = &[
    ("Mae West", Category::Famous, "Too much of a good thing can be wonderful."),
    ("Mark Twain", Category::Famous, "The secret of getting ahead is getting started."),
    ("Albert Einstein", Category::Famous, "Life is like riding a bicycle. To keep your balance you must keep moving."),
    ("Oscar Wilde", Category::Famous, "Be yourself; everyone else is already taken."),
    ("Eleanor Roosevelt", Category::Famous, "No one can make you feel inferior without your consent."),
    ("Yoda", Category::Movies, "Do. Or do not. There is no try."),
    ("Forrest Gump", Category::Movies, "Life was like a box of chocolates. You never know what you're gonna get."),
    ("Rhett Butler", Category::Movies, "Frankly, my dear, I don't give a damn."),
    ("Dorothy Gale", Category::Movies, "Toto, I've a feeling we're not in Kansas anymore."),
    ("Rick Blaine", Category::Movies, "Here's looking at you, kid."),
];

/// On-disk quote list: a TOML file of `[[quotes]]` tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteFile {
    /// The quotes, in file order.
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

/// Picks a random quote from a fixed list.
#[derive(Debug)]
pub struct StaticQuoteProvider {
    quotes: Vec<Quote>,
    rng: Mutex<StdRng>,
}

impl StaticQuoteProvider {
    /// Uses `quotes`, drawing with an OS-seeded generator.
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self::with_rng(quotes, StdRng::from_os_rng())
    }

    /// Uses `quotes`, drawing with `rng`.
    pub fn with_rng(quotes: Vec<Quote>, rng: StdRng) -> Self {
        Self {
            quotes,
            rng: Mutex::new(rng),
        }
    }

    /// Reads quotes from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ProviderError::Io(e.to_string()))?;
        let file: QuoteFile = toml::from_str(&content).map_err(|e| {
            warn!(error = %e, "Quote file did not parse");
            ProviderError::Parse(e.to_string())
        })?;

        let quotes: Vec<Quote> = file.quotes.into_iter().filter(|q| !q.is_blank()).collect();
        if quotes.is_empty() {
            return Err(ProviderError::Empty);
        }
        info!(count = quotes.len(), "Loaded quote file");
        Ok(Self::new(quotes))
    }

    /// Quotes this provider draws from.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Draws one quote.
    #[instrument(skip(self), fields(count = self.quotes.len()))]
    pub fn pick(&self) -> Result<Quote, ProviderError> {
        if self.quotes.is_empty() {
            return Err(ProviderError::Empty);
        }
        let index = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| ProviderError::Io(format!("Random source unavailable: {}", e)))?;
            rng.random_range(0..self.quotes.len())
        };
        debug!(index, "Picked static quote");
        Ok(self.quotes[index].clone())
    }
}

/// The quotes shipped with the game.
pub fn builtin_quotes() -> Vec<Quote> {
    BUILTIN
        .iter()
        .map(|(author, category, quote)| Quote::new(*author, *category, *quote))
        .collect()
}

#[async_trait::async_trait]
impl QuoteProvider for StaticQuoteProvider {
    async fn fetch(&self) -> Result<Quote, ProviderError> {
        self.pick()
    }

    fn name(&self) -> &str {
        "offline quotes"
    }
}
