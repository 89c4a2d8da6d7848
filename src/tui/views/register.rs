//! Transaction register view
//!
//! The projected page of the ledger: filtered, newest first.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::format_signed_amount;
use crate::tui::app::App;

/// Render the transaction register
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette;
    let locale = app.locale();
    let page = app.current_page();

    let title = format!(
        " Transactions ({}) · Page {} of {} ",
        page.total_matched, page.page, page.page_count
    );
    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    if page.items.is_empty() {
        let message = if app.session.state().filter.is_active() {
            "No transactions match the filter. Press 'F' to clear it."
        } else {
            "No transactions. Press 'a' to add one."
        };
        let text = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(palette.muted));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Min(20),    // Description
        Constraint::Length(12), // Type
        Constraint::Length(16), // Amount
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Description").style(bold),
        Cell::from("Type").style(bold),
        Cell::from("Amount").style(bold),
    ])
    .style(Style::default().fg(palette.warning))
    .height(1);

    let editing = app.session.state().editing;
    let rows: Vec<Row> = page
        .items
        .iter()
        .map(|txn| {
            let amount_style = if txn.is_deposit() {
                Style::default().fg(palette.positive)
            } else {
                Style::default().fg(palette.negative)
            };
            let marker = if editing == Some(txn.id) { "✎ " } else { "" };

            Row::new(vec![
                Cell::from(txn.date.format(&locale.date_format).to_string()),
                Cell::from(format!("{}{}", marker, txn.description)),
                Cell::from(txn.kind.label()),
                Cell::from(format_signed_amount(txn, &locale)).style(amount_style),
            ])
            .style(Style::default().fg(palette.text))
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(palette.highlight_fg)
                .bg(palette.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}
