//! Command-line interface for cryptoquote.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CryptoQuote - decode substitution-encrypted quotes
#[derive(Parser, Debug)]
#[command(name = "cryptoquote")]
#[command(about = "Cryptogram puzzles in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Where quotes come from.
#[derive(Args, Debug, Clone, Default)]
pub struct QuoteSource {
    /// Use the built-in quotes instead of the quote API
    #[arg(long)]
    pub offline: bool,

    /// Read quotes from a TOML file of [[quotes]] tables (implies offline)
    #[arg(long)]
    pub quotes: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Path to the config file
        #[arg(short, long, default_value = "cryptoquote.toml")]
        config: PathBuf,

        #[command(flatten)]
        source: QuoteSource,
    },

    /// Print a freshly encrypted puzzle and exit
    Show {
        /// Path to the config file
        #[arg(short, long, default_value = "cryptoquote.toml")]
        config: PathBuf,

        #[command(flatten)]
        source: QuoteSource,

        /// Seed for the cipher and the offline quote choice
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Play {
            config: PathBuf::from("cryptoquote.toml"),
            source: QuoteSource::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_play() {
        let cli = Cli::try_parse_from(["cryptoquote"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(Command::default(), Command::Play { .. }));
    }

    #[test]
    fn test_show_flags() {
        let cli = Cli::try_parse_from(["cryptoquote", "show", "--offline", "--seed", "9"]).unwrap();
        match cli.command {
            Some(Command::Show { source, seed, .. }) => {
                assert!(source.offline);
                assert_eq!(seed, Some(9));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_play_with_quote_file() {
        let cli =
            Cli::try_parse_from(["cryptoquote", "play", "--quotes", "mine.toml"]).unwrap();
        match cli.command {
            Some(Command::Play { source, config }) => {
                assert_eq!(source.quotes, Some(PathBuf::from("mine.toml")));
                assert_eq!(config, PathBuf::from("cryptoquote.toml"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
