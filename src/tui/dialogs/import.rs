//! CSV import dialog
//!
//! Asks for the path of a `Date,Amount,Description,Type` file.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

/// Render the import dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(70, 7, frame.area());
    let palette = app.palette;

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Import CSV ")
        .title_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Header row: Date,Amount,Description,Type",
            Style::default().fg(palette.muted),
        )),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(app.import_input.to_line(true, &palette)),
        chunks[2],
    );

    let hints = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(palette.positive)),
        Span::raw(" Import  "),
        Span::styled("[Esc]", Style::default().fg(palette.negative)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[3]);
}

/// Handle key input for the import dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => {
            let path = app.import_input.value().trim().to_string();
            if path.is_empty() {
                app.set_error("Enter the path of a CSV file");
                return;
            }

            app.close_dialog();
            if let Err(e) = app.import_csv(PathBuf::from(&path)) {
                app.set_error(e.to_string());
            } else {
                app.import_input.clear();
            }
        }
        code => {
            app.import_input.handle_key(code);
        }
    }
}
