//! Filter bar
//!
//! One line summarizing the criteria applied to the register.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::TransactionFilter;
use crate::tui::app::App;

/// Human-readable summary of a filter
pub fn describe(filter: &TransactionFilter) -> String {
    if !filter.is_active() {
        return "All transactions".to_string();
    }

    let mut parts = vec![filter.kind.to_string()];
    match (filter.date_from, filter.date_to) {
        (Some(from), Some(to)) => parts.push(format!("{} to {}", from, to)),
        (Some(from), None) => parts.push(format!("from {}", from)),
        (None, Some(to)) => parts.push(format!("until {}", to)),
        (None, None) => {}
    }
    if !filter.search_term.is_empty() {
        parts.push(format!("matching \"{}\"", filter.search_term));
    }
    parts.join(" · ")
}

/// Render the filter bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette;
    let filter = &app.session.state().filter;

    let style = if filter.is_active() {
        Style::default()
            .fg(palette.warning)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };

    let line = Line::from(vec![
        Span::styled(" Filter: ", Style::default().fg(palette.muted)),
        Span::styled(describe(filter), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TypeFilter;
    use chrono::NaiveDate;

    #[test]
    fn test_describe() {
        assert_eq!(describe(&TransactionFilter::new()), "All transactions");

        let filter = TransactionFilter::new()
            .kind(TypeFilter::Withdrawal)
            .date_range(NaiveDate::from_ymd_opt(2025, 12, 1), None)
            .search("cafe");
        assert_eq!(
            describe(&filter),
            "Withdrawals · from 2025-12-01 · matching \"cafe\""
        );
    }
}
