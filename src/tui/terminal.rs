//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::mpsc::Sender;
use std::thread;

use crate::config::{PocketbookPaths, Settings};
use crate::services::{ExchangeRateService, LedgerSession};

use super::app::App;
use super::event::{Event, EventHandler};
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Look up the exchange rate off the UI thread and post the result
fn spawn_rate_lookup(settings: &Settings, paths: &PocketbookPaths, sender: Sender<Event>) {
    let settings = settings.clone();
    let cache_path = paths.rate_cache_file();

    thread::spawn(move || {
        let quote = match ExchangeRateService::from_settings(&settings, cache_path) {
            Ok(service) => service.lookup(),
            Err(e) => {
                tracing::warn!("Exchange rate service unavailable: {}", e);
                None
            }
        };
        // the receiver is gone if the user already quit
        let _ = sender.send(Event::Rate(quote));
    });
}

/// Run the TUI application
pub fn run_tui(session: LedgerSession, settings: Settings, paths: &PocketbookPaths) -> Result<()> {
    let mut terminal = init_terminal()?;

    let events = EventHandler::default();
    spawn_rate_lookup(&settings, paths, events.sender());

    let mut app = App::new(session, settings, paths);
    let result = run_loop(&mut terminal, &mut app, &events);

    restore_terminal()?;
    result
}

fn run_loop(terminal: &mut Tui, app: &mut App, events: &EventHandler) -> Result<()> {
    loop {
        terminal.draw(|frame| super::views::render(frame, app))?;

        handle_event(app, events.next()?)?;

        if app.should_quit {
            return Ok(());
        }
    }
}
