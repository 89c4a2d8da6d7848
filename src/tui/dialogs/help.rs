//! Help dialog
//!
//! Lists the keyboard shortcuts

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect;
use crate::tui::theme::Palette;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 80, frame.area());
    let palette = app.palette;

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    let paragraph = Paragraph::new(help_lines(&palette))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(palette: &Palette) -> Vec<Line<'static>> {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(palette.warning),
        ))
    };
    let key_line = |key: &str, description: &str| {
        Line::from(vec![
            Span::styled(format!("{:>12}", key), Style::default().fg(palette.accent)),
            Span::raw("  "),
            Span::styled(description.to_string(), Style::default().fg(palette.text)),
        ])
    };

    vec![
        heading("Transactions"),
        Line::from(""),
        key_line("a", "Add a transaction"),
        key_line("e", "Edit the selected transaction"),
        key_line("r", "Reuse the selected transaction"),
        key_line("d", "Delete the selected transaction"),
        key_line("u", "Undo the last add, edit or delete"),
        Line::from(""),
        heading("Viewing"),
        Line::from(""),
        key_line("j/k ↑/↓", "Move selection"),
        key_line("n/p ←/→", "Next/previous page"),
        key_line("f", "Filter by type and date"),
        key_line("/", "Search descriptions"),
        key_line("F", "Clear all filters"),
        Line::from(""),
        heading("Other"),
        Line::from(""),
        key_line("i", "Import transactions from CSV"),
        key_line("x", "Export transactions to CSV"),
        key_line("t", "Toggle light/dark theme"),
        key_line("?", "Show/hide help"),
        key_line("q", "Quit"),
    ]
}
