// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;

use crate::errors::RetailChatResult;
use crate::key_handlers::handle_chat_input;
use crate::App;
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tokio::time;

const TICK_RATE: Duration = Duration::from_millis(80);
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Runs the terminal UI until the user quits, restoring the terminal
/// afterwards even when the loop fails.
pub async fn run_ui(mut app: App) -> RetailChatResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Main loop of the application.
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> RetailChatResult<()> {
    let (tx, mut rx) = mpsc::channel::<CEvent>(100);

    // crossterm's reader blocks, so it gets its own thread.
    tokio::task::spawn_blocking(move || loop {
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    if tx.blocking_send(event).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    log::warn!("terminal read failed: {}", e);
                    return;
                }
            },
            Ok(false) => {
                if tx.is_closed() {
                    return;
                }
            }
            Err(e) => {
                log::warn!("terminal poll failed: {}", e);
                return;
            }
        }
    });

    let mut ticker = time::interval(TICK_RATE);

    loop {
        let view: &App = app;
        terminal.draw(|f| ui(f, view))?;

        tokio::select! {
            event = rx.recv() => match event {
                Some(CEvent::Key(key)) => handle_chat_input(key, app),
                Some(_) => {}
                None => break,
            },
            _ = ticker.tick() => app.status_indicator.update_spinner(),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Renders the UI components.
pub fn ui(f: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(1), // Header
                Constraint::Min(5),    // Chat
                Constraint::Length(1), // Footer
            ]
            .as_ref(),
        )
        .split(f.area());

    header::draw_header(f, chunks[0], &app.api_base);
    chat::draw_chat(f, chunks[1], app);
    footer::draw_footer(f, chunks[2]);
}
