//! Filter dialog
//!
//! Edits the type, date range and search term applied to the register.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{FilterUpdate, TransactionFilter, TypeFilter};
use crate::services::Operation;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

/// Which field is focused in the filter form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Kind,
    From,
    To,
    Search,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            Self::Kind => Self::From,
            Self::From => Self::To,
            Self::To => Self::Search,
            Self::Search => Self::Kind,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Kind => Self::Search,
            Self::From => Self::Kind,
            Self::To => Self::From,
            Self::Search => Self::To,
        }
    }
}

/// State for the filter dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFormState {
    pub focused_field: FilterField,
    pub kind: TypeFilter,
    pub from: TextInput,
    pub to: TextInput,
    pub search: TextInput,
    pub error_message: Option<String>,
}

impl Default for FilterFormState {
    fn default() -> Self {
        Self::from_filter(&TransactionFilter::default())
    }
}

impl FilterFormState {
    /// Form showing the filter currently in effect
    pub fn from_filter(filter: &TransactionFilter) -> Self {
        let date = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string());
        Self {
            focused_field: FilterField::Kind,
            kind: filter.kind,
            from: TextInput::new()
                .label("From")
                .placeholder("YYYY-MM-DD")
                .content(date(filter.date_from).unwrap_or_default()),
            to: TextInput::new()
                .label("To")
                .placeholder("YYYY-MM-DD")
                .content(date(filter.date_to).unwrap_or_default()),
            search: TextInput::new()
                .label("Search")
                .placeholder("description contains")
                .content(filter.search_term.clone()),
            error_message: None,
        }
    }

    /// Same form with the search field focused
    pub fn focus_search(mut self) -> Self {
        self.focused_field = FilterField::Search;
        self
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            FilterField::Kind => None,
            FilterField::From => Some(&mut self.from),
            FilterField::To => Some(&mut self.to),
            FilterField::Search => Some(&mut self.search),
        }
    }

    /// The complete filter as an update; blank dates clear their bound
    pub fn to_update(&self) -> Result<FilterUpdate, String> {
        let parse = |input: &TextInput| {
            let text = input.value().trim();
            if text.is_empty() {
                return Ok(None);
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| format!("Invalid {} date. Use YYYY-MM-DD", input.label))
        };

        let mut update = FilterUpdate::date_range(parse(&self.from)?, parse(&self.to)?);
        update.kind = Some(self.kind);
        update.search_term = Some(self.search.value().trim().to_string());
        Ok(update)
    }
}

/// Render the filter dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(56, 11, frame.area());
    let palette = app.palette;
    let form = &app.filter_form;

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Filter Transactions ")
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
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let kind_focused = form.focused_field == FilterField::Kind;
    let label_style = if kind_focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.accent)
    };
    let mut kind_spans = vec![Span::styled(format!("{:>12}: ", "Type"), label_style)];
    for option in [TypeFilter::All, TypeFilter::Deposit, TypeFilter::Withdrawal] {
        let style = if option == form.kind {
            Style::default()
                .fg(palette.highlight_fg)
                .bg(palette.highlight_bg)
        } else {
            Style::default().fg(palette.muted)
        };
        kind_spans.push(Span::styled(format!(" {} ", option), style));
        kind_spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(kind_spans)), chunks[0]);

    let fields = [
        (&form.from, FilterField::From),
        (&form.to, FilterField::To),
        (&form.search, FilterField::Search),
    ];
    for (row, (input, field)) in fields.into_iter().enumerate() {
        let line = input.to_line(form.focused_field == field, &palette);
        frame.render_widget(Paragraph::new(line), chunks[row + 1]);
    }

    if let Some(error) = &form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                error.clone(),
                Style::default().fg(palette.negative),
            )),
            chunks[5],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(palette.warning)),
        Span::raw(" Next  "),
        Span::styled("[Space]", Style::default().fg(palette.warning)),
        Span::raw(" Type  "),
        Span::styled("[Enter]", Style::default().fg(palette.positive)),
        Span::raw(" Apply  "),
        Span::styled("[Esc]", Style::default().fg(palette.negative)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[6]);
}

/// Handle key input for the filter dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let form = &mut app.filter_form;

    match key.code {
        KeyCode::Esc => app.close_dialog(),

        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            form.focused_field = form.focused_field.prev();
        }
        KeyCode::Tab | KeyCode::Down => form.focused_field = form.focused_field.next(),
        KeyCode::BackTab | KeyCode::Up => form.focused_field = form.focused_field.prev(),

        KeyCode::Enter => match form.to_update() {
            Ok(update) => {
                app.selected_index = 0;
                if app.dispatch(Operation::SetFilter(update)) {
                    let matched = app.current_page().total_matched;
                    app.close_dialog();
                    app.set_status(format!("{} matching transactions", matched));
                }
            }
            Err(e) => form.error_message = Some(e),
        },

        KeyCode::Char(' ') | KeyCode::Right if form.focused_field == FilterField::Kind => {
            form.kind = form.kind.next();
        }
        KeyCode::Left if form.focused_field == FilterField::Kind => {
            form.kind = form.kind.next().next();
        }

        code => {
            if let Some(input) = form.focused_input() {
                if input.handle_key(code) {
                    form.error_message = None;
                }
            }
        }
    }
}
