//! Balance panel
//!
//! Balance, income and expenses with their foreign-currency equivalents.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::display::{format_foreign_amount, RATE_LOADING};
use crate::models::Money;
use crate::tui::app::{App, RateState};

/// Render the balance panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette;
    let locale = app.locale();
    let ledger = &app.session.state().ledger;
    let currency = app.settings.display_currency.to_uppercase();

    let mut title = format!(" Pocketbook · {} ", locale.currency);
    if let Some(quote) = app.rate.quote() {
        if quote.stale {
            title.push_str("· rate offline ");
        }
    }

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(inner);

    let foreign = |amount: Money| match app.rate {
        RateState::Loading => RATE_LOADING.to_string(),
        RateState::Ready(quote) => {
            format_foreign_amount(amount, quote.as_ref(), &currency, &locale)
        }
    };

    let figures = [
        ("Balance", locale.format_money(ledger.balance), palette.text),
        (
            "Income",
            format!("+{}", locale.format_money(ledger.total_income())),
            palette.positive,
        ),
        (
            "Expenses",
            format!("-{}", locale.format_money(ledger.total_expenses())),
            palette.negative,
        ),
    ];
    let amounts = [
        ledger.balance,
        ledger.total_income(),
        ledger.total_expenses(),
    ];

    for ((column, (label, value, color)), amount) in
        columns.iter().zip(figures).zip(amounts)
    {
        let lines = vec![
            Line::from(Span::styled(label, Style::default().fg(palette.muted))),
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("≈ {}", foreign(amount)),
                Style::default().fg(palette.muted),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), *column);
    }
}
