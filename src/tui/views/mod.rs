//! TUI Views module
//!
//! The single ledger screen: balance panel, filter bar, register and status
//! bar, with dialogs drawn on top.

pub mod balance;
pub mod filter_bar;
pub mod register;
pub mod status_bar;

use ratatui::{style::Style, widgets::Block, Frame};

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    frame.render_widget(
        Block::default().style(
            Style::default()
                .bg(app.palette.background)
                .fg(app.palette.text),
        ),
        frame.area(),
    );

    let layout = AppLayout::new(frame.area());

    balance::render(frame, app, layout.balance);
    filter_bar::render(frame, app, layout.filter_bar);
    register::render(frame, app, layout.register);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::AddTransaction | ActiveDialog::EditTransaction(_) => {
            dialogs::transaction::render(frame, app)
        }
        ActiveDialog::Filter => dialogs::filter::render(frame, app),
        ActiveDialog::Import => dialogs::import::render(frame, app),
        ActiveDialog::ConfirmDelete(id) => dialogs::confirm::render(frame, app, id),
        ActiveDialog::None => {}
    }
}
