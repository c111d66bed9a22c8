//! Terminal UI for the puzzle.

mod app;
mod input;
mod ui;

pub use app::{App, AppEvent, Effect};
pub use input::{Command, command_for};
pub use ui::wrap_cells;

use crate::config::GameConfig;
use crate::provider::QuoteProvider;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Runs the game until the player quits.
#[instrument(skip_all, fields(provider = provider.name()))]
pub async fn run_tui(config: GameConfig, provider: Arc<dyn QuoteProvider>) -> Result<()> {
    info!("Starting CryptoQuote TUI");

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, &config, provider).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Event loop: render, read keys, drain background events.
async fn run_game<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &GameConfig,
    provider: Arc<dyn QuoteProvider>,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut app = App::new(StdRng::from_os_rng());
    spawn_fetch(provider.clone(), event_tx.clone());

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        let mut effects = Vec::new();
        if event::poll(INPUT_POLL)?
            && let Event::Key(key) = event::read()?
            && let Some(command) = command_for(key)
        {
            effects.push(app.handle_command(command));
        }
        while let Ok(event) = event_rx.try_recv() {
            effects.push(app.handle_event(event));
        }

        for effect in effects {
            match effect {
                Effect::None => {}
                Effect::Quit => return Ok(()),
                Effect::Fetch => spawn_fetch(provider.clone(), event_tx.clone()),
                Effect::ScheduleCommit(token) => {
                    schedule_commit(config.commit_delay(), token, event_tx.clone())
                }
            }
        }
    }
}

/// Fetches one quote in the background and reports the result.
#[instrument(skip_all, fields(provider = provider.name()))]
fn spawn_fetch(provider: Arc<dyn QuoteProvider>, tx: mpsc::UnboundedSender<AppEvent>) {
    debug!("Spawning quote fetch");
    tokio::spawn(async move {
        let event = match provider.fetch().await {
            Ok(quote) => AppEvent::QuoteLoaded(quote),
            Err(e) => AppEvent::QuoteFailed(e.to_string()),
        };
        if tx.send(event).is_err() {
            debug!("UI closed before fetch finished");
        }
    });
}

/// Sends `CommitMove(token)` once `delay` has elapsed.
fn schedule_commit(delay: Duration, token: u64, tx: mpsc::UnboundedSender<AppEvent>) {
    if delay.is_zero() {
        send_commit(&tx, token);
        return;
    }
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        send_commit(&tx, token);
    });
}

fn send_commit(tx: &mpsc::UnboundedSender<AppEvent>, token: u64) {
    if tx.send(AppEvent::CommitMove(token)).is_err() {
        debug!(token, "UI closed before commit timer fired");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_delay_commit_is_sent_immediately() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        schedule_commit(Duration::ZERO, 3, tx);
        assert_eq!(rx.try_recv().ok(), Some(AppEvent::CommitMove(3)));
    }

    #[tokio::test]
    async fn test_delayed_commit_arrives() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        schedule_commit(Duration::from_millis(5), 4, tx);
        assert_eq!(rx.recv().await, Some(AppEvent::CommitMove(4)));
    }

    #[tokio::test]
    async fn test_commit_after_ui_closed_is_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        schedule_commit(Duration::ZERO, 5, tx.clone());
        schedule_commit(Duration::from_millis(1), 6, tx);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
