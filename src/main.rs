//! CryptoQuote - terminal cryptogram game

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use cryptoquote::cli::{Cli, Command, QuoteSource};
use cryptoquote::{GameConfig, HttpQuoteProvider, QuoteProvider, StaticQuoteProvider, builtin_quotes};
use cryptoquote_core::Puzzle;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Command::Play { config, source } => run_play(&config, source).await,
        Command::Show {
            config,
            source,
            seed,
        } => run_show(&config, source, seed).await,
    }
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let config = GameConfig::load_or_default(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    Ok(config.with_env_overrides())
}

fn env_filter(config: &GameConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()))
}

/// Runs the terminal UI.
async fn run_play(config_path: &Path, source: QuoteSource) -> Result<()> {
    let config = load_config(config_path)?;

    // Log to a file so output doesn't corrupt the screen
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    let provider = build_provider(&config, &source, None)?;
    cryptoquote::tui::run_tui(config, provider).await
}

/// Prints one encrypted puzzle to stdout.
async fn run_show(config_path: &Path, source: QuoteSource, seed: Option<u64>) -> Result<()> {
    let config = load_config(config_path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config))
        .with_writer(std::io::stderr)
        .try_init();

    let provider = build_provider(&config, &source, seed)?;
    let quote = provider
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch a quote from {}", provider.name()))?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let puzzle = Puzzle::generate(&quote, &mut rng);
    info!(category = %puzzle.category(), "Generated puzzle");

    println!("[{}]", puzzle.category());
    println!("{}", puzzle.cipher_quote());
    println!("  - {}", puzzle.cipher_author());
    Ok(())
}

#[instrument(skip(config, source), fields(offline = source.offline))]
fn build_provider(
    config: &GameConfig,
    source: &QuoteSource,
    seed: Option<u64>,
) -> Result<Arc<dyn QuoteProvider>> {
    if let Some(path) = &source.quotes {
        let provider = StaticQuoteProvider::from_file(path)
            .with_context(|| format!("Failed to load quotes from {}", path.display()))?;
        return Ok(Arc::new(seeded(provider.quotes().to_vec(), seed)));
    }
    if source.offline {
        return Ok(Arc::new(seeded(builtin_quotes(), seed)));
    }
    let provider = HttpQuoteProvider::new(config.clone()).context("Failed to build quote client")?;
    Ok(Arc::new(provider))
}

fn seeded(quotes: Vec<cryptoquote_core::Quote>, seed: Option<u64>) -> StaticQuoteProvider {
    match seed {
        Some(seed) => StaticQuoteProvider::with_rng(quotes, StdRng::seed_from_u64(seed)),
        None => StaticQuoteProvider::new(quotes),
    }
}
