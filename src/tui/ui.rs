//! Stateless UI rendering for the puzzle.

use super::app::App;
use cryptoquote_core::{Cell, Letter, Phase, Puzzle, PuzzleSession};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Puzzle
            Constraint::Length(4), // Guess map
            Constraint::Length(3), // Status
            Constraint::Length(1), // Key help
        ])
        .split(area);

    let session = app.session();
    draw_title(frame, chunks[0], session);

    match session.puzzle() {
        Some(puzzle) => {
            draw_puzzle(frame, chunks[1], session, puzzle);
            draw_guess_map(frame, chunks[2], session, puzzle);
        }
        None => {
            let loading = Paragraph::new("Loading quote...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(loading, chunks[1]);
        }
    }

    draw_status(frame, chunks[3], app);
    draw_help(frame, chunks[4], app);
}

fn draw_title(frame: &mut Frame, area: Rect, session: &PuzzleSession) {
    let title = match session.puzzle() {
        Some(puzzle) => format!("CryptoQuote - {}", puzzle.category()),
        None => "CryptoQuote".to_string(),
    };
    let paragraph = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_puzzle(frame: &mut Frame, area: Rect, session: &PuzzleSession, puzzle: &Puzzle) {
    let block_title = if session.is_winner() {
        " Solved! "
    } else {
        " Decode the quote "
    };
    let border = if session.is_winner() {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(block_title)
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.max(1) as usize;
    let mut lines = Vec::new();
    for row in wrap_cells(&puzzle.quote_cells(), width) {
        lines.extend(cell_rows(&row, session));
    }
    lines.push(Line::default());
    let mut author = vec![Cell::Literal('-'), Cell::Literal(' ')];
    author.extend(puzzle.author_cells());
    for row in wrap_cells(&author, width) {
        lines.extend(cell_rows(&row, session));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Two lines per row of cells: guesses above, ciphertext below.
fn cell_rows(cells: &[Cell], session: &PuzzleSession) -> [Line<'static>; 2] {
    let mut guesses = Vec::with_capacity(cells.len());
    let mut ciphers = Vec::with_capacity(cells.len());

    for cell in cells {
        match *cell {
            Cell::Letter { cipher, guess } => {
                let style = cell_style(session, cipher, guess);
                let guess_char = guess.map_or('_', Letter::as_char);
                guesses.push(Span::styled(guess_char.to_string(), style.fg(Color::Yellow)));
                ciphers.push(Span::styled(cipher.as_char().to_string(), style));
            }
            Cell::Literal(c) => {
                guesses.push(Span::raw(c.to_string()));
                ciphers.push(Span::raw(" "));
            }
        }
    }

    [Line::from(guesses), Line::from(ciphers)]
}

fn cell_style(session: &PuzzleSession, cipher: Letter, guess: Option<Letter>) -> Style {
    let selected = session.selected_cipher() == Some(cipher)
        || (guess.is_some() && guess == session.selected_plain());
    if selected {
        Style::default().bg(Color::White).fg(Color::Black)
    } else {
        Style::default()
    }
}

/// Splits cells into rows no wider than `width`, breaking at spaces.
///
/// A word longer than `width` is hard-split.
pub fn wrap_cells(cells: &[Cell], width: usize) -> Vec<Vec<Cell>> {
    let width = width.max(1);
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut row: Vec<Cell> = Vec::new();

    for word in cells.split(|cell| *cell == Cell::Literal(' ')) {
        if word.is_empty() {
            continue;
        }
        let needed = if row.is_empty() { word.len() } else { row.len() + 1 + word.len() };
        if needed > width && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
        }
        if !row.is_empty() {
            row.push(Cell::Literal(' '));
        }
        for cell in word {
            if row.len() == width {
                rows.push(std::mem::take(&mut row));
            }
            row.push(*cell);
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

fn draw_guess_map(frame: &mut Frame, area: Rect, session: &PuzzleSession, puzzle: &Puzzle) {
    let in_play = puzzle.letters_in_play();
    let guesses = puzzle.guesses();

    let mut plain_row = vec![Span::raw("plain  ")];
    let mut cipher_row = vec![Span::raw("cipher ")];
    for plain in Letter::ALPHABET {
        let mut style = if in_play.contains(&plain) {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if session.selected_plain() == Some(plain) {
            style = style.bg(Color::White).fg(Color::Black);
        }
        plain_row.push(Span::styled(format!("{} ", plain), style));

        let guessed = guesses.guess_for(plain).map_or('.', Letter::as_char);
        cipher_row.push(Span::styled(
            format!("{} ", guessed),
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(plain_row), Line::from(cipher_row)])
        .block(Block::default().title(" Guesses ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let text = match session.pending_move() {
        Some(mv) => mv.to_string(),
        None => app.status_message().to_string(),
    };
    let style = match session.phase() {
        Phase::Solved => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Phase::Loading if !app.is_fetching() => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Yellow),
    };
    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let enabled = Style::default();
    let disabled = Style::default().fg(Color::DarkGray);
    let undo = if session.can_undo() { enabled } else { disabled };
    let redo = if session.can_redo() { enabled } else { disabled };

    let slot = if app.is_cipher_slot() {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        enabled
    };

    let help = Line::from(vec![
        Span::raw("A-Z select  "),
        Span::styled("Tab cipher  ", slot),
        Span::raw("Bksp unguess  "),
        Span::styled(", undo  ", undo),
        Span::styled(". redo  ", redo),
        Span::raw("Esc clear  Ctrl+N new  Ctrl+Q quit"),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(text: &str) -> Vec<Cell> {
        text.chars()
            .map(|c| match Letter::from_char(c) {
                Ok(cipher) => Cell::Letter { cipher, guess: None },
                Err(_) => Cell::Literal(c),
            })
            .collect()
    }

    fn text(row: &[Cell]) -> String {
        row.iter()
            .map(|cell| match cell {
                Cell::Letter { cipher, .. } => cipher.as_char(),
                Cell::Literal(c) => *c,
            })
            .collect()
    }

    #[test]
    fn test_wrap_breaks_at_spaces() {
        let rows = wrap_cells(&cells("DO OR DO NOT"), 6);
        let rows: Vec<String> = rows.iter().map(|r| text(r)).collect();
        assert_eq!(rows, vec!["DO OR", "DO NOT"]);
    }

    #[test]
    fn test_wrap_hard_splits_long_words() {
        let rows = wrap_cells(&cells("ABCDEFG"), 3);
        let rows: Vec<String> = rows.iter().map(|r| text(r)).collect();
        assert_eq!(rows, vec!["ABC", "DEF", "G"]);
    }

    #[test]
    fn test_wrap_keeps_punctuation_with_word() {
        let rows = wrap_cells(&cells("HI, YOU."), 4);
        let rows: Vec<String> = rows.iter().map(|r| text(r)).collect();
        assert_eq!(rows, vec!["HI,", "YOU."]);
    }
}
