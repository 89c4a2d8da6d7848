//! Status bar view
//!
//! Shows the last status message, the pending undo and key hints

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, StatusKind};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette;
    let mut spans = vec![Span::raw(" ")];

    match &app.status_message {
        Some((kind, message)) => {
            let color = match kind {
                StatusKind::Info => palette.text,
                StatusKind::Error => palette.negative,
            };
            spans.push(Span::styled(message.clone(), Style::default().fg(color)));
        }
        None => {
            if let Some(action) = &app.session.state().last_action {
                spans.push(Span::styled(
                    format!(
                        "Last {}: {} (u to undo)",
                        action.verb(),
                        action.transaction().description
                    ),
                    Style::default().fg(palette.muted),
                ));
            }
        }
    }

    // Key hints (right-aligned)
    let hints = " a:Add  e:Edit  d:Delete  u:Undo  f:Filter  ?:Help  q:Quit ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());

    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(palette.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
