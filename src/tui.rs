//! Terminal user interface built with Ratatui.
//!
//! One screen: status bar on top, the board on the left, search progress
//! and move history on the right, key help at the bottom. The event loop
//! polls with a short timeout so [`App::tick`] keeps running while the AI
//! worker thinks.

use crate::app::{AiState, App};
use connect4::Player;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use std::io;
use std::time::Duration;

pub fn run_tui(app: &mut App) -> io::Result<()> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;
        app.tick();

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('n') => app.new_game(),
                    KeyCode::Left => app.move_cursor(-1),
                    KeyCode::Right => app.move_cursor(1),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        let col = app.cursor;
                        app.drop_at(col);
                    }
                    KeyCode::Char(c @ '1'..='9') => {
                        let col = c as usize - '1' as usize;
                        if col < app.controller.board().cols() {
                            app.cursor = col;
                        }
                        app.drop_at(col);
                    }
                    _ => {}
                }
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.size());

    let status = Paragraph::new(app.status_line.clone()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Connect Four "),
    );
    f.render_widget(status, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    f.render_widget(board_widget(app), middle[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(middle[1]);
    f.render_widget(search_widget(app), side[0]);
    f.render_widget(history_widget(app), side[1]);

    let help =
        Paragraph::new("left/right move cursor | enter/space drop | 1-9 drop | n new game | q quit")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn board_widget(app: &App) -> Paragraph<'static> {
    let board = app.controller.board();
    let mut lines: Vec<Line> = Vec::new();

    let header: String = (1..=board.cols()).map(|c| format!("{} ", c % 10)).collect();
    lines.push(Line::from(Span::styled(
        header,
        Style::default().fg(Color::DarkGray),
    )));

    if app.is_human_turn() {
        let mut marker = String::new();
        for col in 0..board.cols() {
            marker.push_str(if col == app.cursor { "v " } else { "  " });
        }
        lines.push(Line::from(Span::styled(
            marker,
            Style::default().fg(Color::Cyan),
        )));
    } else {
        lines.push(Line::from(""));
    }

    for row in (0..board.rows()).rev() {
        let mut spans = Vec::new();
        for col in 0..board.cols() {
            let (symbol, color) = match board.cell(row, col) {
                Some(Player::One) => ("O ", Color::Yellow),
                Some(Player::Two) => ("O ", Color::Red),
                None => (". ", Color::DarkGray),
            };
            spans.push(Span::styled(symbol, Style::default().fg(color)));
        }
        lines.push(Line::from(spans));
    }

    Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" board "))
}

fn search_widget(app: &App) -> Paragraph<'static> {
    let text = match (app.ai_state, *app.progress.lock()) {
        (AiState::Thinking, Some(p)) => format!(
            "thinking... depth {} -> column {} ({})",
            p.depth,
            p.column + 1,
            p.score
        ),
        (AiState::Thinking, None) => "thinking...".to_string(),
        (AiState::Idle, _) => "idle".to_string(),
    };
    Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" search "))
}

fn history_widget(app: &App) -> List<'static> {
    let items: Vec<ListItem> = app
        .controller
        .history()
        .iter()
        .rev()
        .take(50)
        .map(|entry| {
            ListItem::new(format!(
                "{:>3}. player {} -> column {}",
                entry.move_number,
                entry.player.label(),
                entry.col + 1
            ))
        })
        .collect();
    List::new(items).block(Block::default().borders(Borders::ALL).title(" moves "))
}
