//! Event handler for the TUI
//!
//! Routes keyboard events to the open dialog or to the register.

use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, App, RateState};
use super::dialogs;
use super::dialogs::filter::FilterFormState;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Rate(quote) => {
            app.rate = RateState::Ready(quote);
            Ok(())
        }
        Event::InputError(e) => Err(anyhow!("Failed to read terminal input: {}", e)),
        Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
    } else {
        handle_register_key(app, key);
    }
    Ok(())
}

/// Handle keys on the main screen
fn handle_register_key(app: &mut App, key: KeyEvent) {
    app.clear_status();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),

        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => app.next_page(),
        KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => app.prev_page(),
        KeyCode::Home => app.go_to_page(1),
        KeyCode::End => app.go_to_page(usize::MAX),

        KeyCode::Char('a') => app.begin_add(),
        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit(),
        KeyCode::Char('r') => app.begin_reuse(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('u') => app.undo(),

        KeyCode::Char('f') => {
            app.filter_form = FilterFormState::from_filter(&app.session.state().filter);
            app.open_dialog(ActiveDialog::Filter);
        }
        KeyCode::Char('/') => {
            app.filter_form =
                FilterFormState::from_filter(&app.session.state().filter).focus_search();
            app.open_dialog(ActiveDialog::Filter);
        }
        KeyCode::Char('F') => app.reset_filter(),

        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('i') => app.open_dialog(ActiveDialog::Import),
        KeyCode::Char('x') => app.export_csv(),

        _ => {}
    }
}

/// Handle keys while a dialog is open
fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog {
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::AddTransaction | ActiveDialog::EditTransaction(_) => {
            dialogs::transaction::handle_key(app, key)
        }
        ActiveDialog::Filter => dialogs::filter::handle_key(app, key),
        ActiveDialog::Import => dialogs::import::handle_key(app, key),
        ActiveDialog::ConfirmDelete(id) => dialogs::confirm::handle_key(app, key, id),
        ActiveDialog::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PocketbookPaths, Settings};
    use crate::models::LedgerSnapshot;
    use crate::services::{LedgerSession, RateQuote};
    use chrono::Utc;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn with_app(test: impl FnOnce(&mut App)) {
        let dir = TempDir::new().unwrap();
        let paths = PocketbookPaths::with_base_dir(dir.path().to_path_buf());
        let session = LedgerSession::in_memory(LedgerSnapshot::seeded());
        let mut app = App::new(session, Settings::default(), &paths);
        test(&mut app);
    }

    #[test]
    fn test_quit() {
        with_app(|app| {
            press(app, KeyCode::Char('q'));
            assert!(app.should_quit);
        });
    }

    #[test]
    fn test_delete_needs_confirmation() {
        with_app(|app| {
            let count = app.session.state().transactions().len();

            press(app, KeyCode::Char('d'));
            assert!(matches!(app.active_dialog, ActiveDialog::ConfirmDelete(_)));
            press(app, KeyCode::Char('n'));
            assert_eq!(app.session.state().transactions().len(), count);

            press(app, KeyCode::Char('d'));
            press(app, KeyCode::Char('y'));
            assert!(!app.has_dialog());
            assert_eq!(app.session.state().transactions().len(), count - 1);

            press(app, KeyCode::Char('u'));
            assert_eq!(app.session.state().transactions().len(), count);
        });
    }

    #[test]
    fn test_search_shortcut_filters() {
        with_app(|app| {
            press(app, KeyCode::Char('/'));
            assert_eq!(app.active_dialog, ActiveDialog::Filter);
            for c in "salary".chars() {
                press(app, KeyCode::Char(c));
            }
            press(app, KeyCode::Enter);

            assert!(!app.has_dialog());
            assert_eq!(app.session.state().filter.search_term, "salary");
            assert!(app
                .current_page()
                .items
                .iter()
                .all(|t| t.description.to_lowercase().contains("salary")));

            press(app, KeyCode::Char('F'));
            assert!(!app.session.state().filter.is_active());
        });
    }

    #[test]
    fn test_page_keys() {
        with_app(|app| {
            app.settings.page_size = 5;
            press(app, KeyCode::Char('n'));
            press(app, KeyCode::Right);
            press(app, KeyCode::Right);
            assert_eq!(app.session.state().current_page, 3);
            press(app, KeyCode::Char('p'));
            assert_eq!(app.session.state().current_page, 2);
        });
    }

    #[test]
    fn test_rate_event() {
        with_app(|app| {
            assert_eq!(app.rate, RateState::Loading);
            let quote = RateQuote {
                rate: 150.0,
                fetched_at: Utc::now(),
                stale: false,
            };
            handle_event(app, Event::Rate(Some(quote))).unwrap();
            assert_eq!(app.rate.quote(), Some(&quote));
        });
    }

    #[test]
    fn test_help_closes_on_any_key() {
        with_app(|app| {
            press(app, KeyCode::Char('?'));
            assert_eq!(app.active_dialog, ActiveDialog::Help);
            press(app, KeyCode::Char('x'));
            assert!(!app.has_dialog());
        });
    }
}
