//! Confirmation dialog
//!
//! Yes/no prompt shown before a transaction is deleted.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::TransactionId;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

/// Render the delete confirmation for `id`
pub fn render(frame: &mut Frame, app: &App, id: TransactionId) {
    let area = centered_rect_fixed(56, 8, frame.area());
    let palette = app.palette;
    let locale = app.locale();

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.warning));

    let detail = app
        .session
        .state()
        .ledger
        .get(id)
        .map(|t| {
            format!(
                "{} {} {}",
                t.date.format(&locale.date_format),
                t.description,
                locale.format_money(t.amount)
            )
        })
        .unwrap_or_default();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Delete this transaction?",
            Style::default().fg(palette.text),
        )),
        Line::from(Span::styled(detail, Style::default().fg(palette.muted))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(palette.positive)),
            Span::raw(" Yes  "),
            Span::styled("[N]", Style::default().fg(palette.negative)),
            Span::raw(" No  "),
            Span::styled("[Esc]", Style::default().fg(palette.warning)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Handle key input for the delete confirmation
pub fn handle_key(app: &mut App, key: KeyEvent, id: TransactionId) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.close_dialog();
            app.delete(id);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
        _ => {}
    }
}
