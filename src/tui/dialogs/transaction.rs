//! Transaction entry/edit dialog
//!
//! Modal form for adding, editing or reusing a transaction, with tab
//! navigation, validation, and save/cancel.

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{Money, Transaction, TransactionId, TransactionType};
use crate::services::Operation;
use crate::tui::app::{ActiveDialog, App};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which field is currently focused in the transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    #[default]
    Kind,
    Amount,
    Description,
    Date,
}

impl TransactionField {
    /// Next field (Tab)
    pub fn next(self) -> Self {
        match self {
            Self::Kind => Self::Amount,
            Self::Amount => Self::Description,
            Self::Description => Self::Date,
            Self::Date => Self::Kind,
        }
    }

    /// Previous field (Shift+Tab)
    pub fn prev(self) -> Self {
        match self {
            Self::Kind => Self::Date,
            Self::Amount => Self::Kind,
            Self::Description => Self::Amount,
            Self::Date => Self::Description,
        }
    }
}

/// State for the transaction form dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFormState {
    pub focused_field: TransactionField,
    pub kind: TransactionType,
    pub amount: TextInput,
    pub description: TextInput,
    pub date: TextInput,
    /// Transaction being edited; `None` for a new entry
    pub editing: Option<TransactionId>,
    pub error_message: Option<String>,
}

impl Default for TransactionFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionFormState {
    /// Empty form dated today
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        Self {
            focused_field: TransactionField::Kind,
            kind: TransactionType::Withdrawal,
            amount: TextInput::new().label("Amount").placeholder("0.00"),
            description: TextInput::new()
                .label("Description")
                .placeholder("What was it for?"),
            date: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(today.format(DATE_FORMAT).to_string()),
            editing: None,
            error_message: None,
        }
    }

    /// Form pre-populated for editing an existing transaction
    pub fn from_transaction(txn: &Transaction) -> Self {
        let mut state = Self::reuse_of(txn);
        state.date.set_value(txn.date.format(DATE_FORMAT).to_string());
        state.editing = Some(txn.id);
        state
    }

    /// New-entry form copying type, amount and description; dated today
    pub fn reuse_of(txn: &Transaction) -> Self {
        let mut state = Self::new();
        state.kind = txn.kind;
        state.amount.set_value(txn.amount.to_decimal_string());
        state.description.set_value(txn.description.clone());
        state
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    /// Text input under focus; the type selector has none
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            TransactionField::Kind => None,
            TransactionField::Amount => Some(&mut self.amount),
            TransactionField::Description => Some(&mut self.description),
            TransactionField::Date => Some(&mut self.date),
        }
    }

    /// Check the entered values and build the transaction
    ///
    /// An edit keeps the original ID; everything else gets a fresh one.
    pub fn build_transaction(&self) -> Result<Transaction, String> {
        let amount = Money::parse(self.amount.value())
            .ok()
            .filter(|a| a.is_positive())
            .ok_or_else(|| "Please enter a valid amount".to_string())?;

        let description = self.description.value().trim();
        if description.is_empty() {
            return Err("Please enter a description".to_string());
        }

        let date = NaiveDate::parse_from_str(self.date.value().trim(), DATE_FORMAT)
            .map_err(|_| "Invalid date format. Use YYYY-MM-DD".to_string())?;

        let mut txn = Transaction::new(self.kind, amount, description, date);
        if let Some(id) = self.editing {
            txn.id = id;
        }
        Ok(txn)
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the transaction dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(64, 12, frame.area());
    let palette = app.palette;
    let form = &app.transaction_form;

    frame.render_widget(Clear, area);

    let title = match app.active_dialog {
        ActiveDialog::EditTransaction(_) => " Edit Transaction ",
        _ if app.session.state().reuse.is_some() => " Reuse Transaction ",
        _ => " Add Transaction ",
    };

    let block = Block::default()
        .title(title)
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
            Constraint::Length(1), // Type
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Description
            Constraint::Length(1), // Date
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        });

    let kind_focused = form.focused_field == TransactionField::Kind;
    let label_style = if kind_focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.accent)
    };
    let kind_style = |kind: TransactionType| {
        if form.kind == kind {
            let color = if kind == TransactionType::Deposit {
                palette.positive
            } else {
                palette.negative
            };
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        }
    };
    let kind_line = Line::from(vec![
        Span::styled(format!("{:>12}: ", "Type"), label_style),
        Span::styled("( Deposit )", kind_style(TransactionType::Deposit)),
        Span::raw(" "),
        Span::styled("( Withdrawal )", kind_style(TransactionType::Withdrawal)),
        Span::styled(
            if kind_focused { "  Space to switch" } else { "" },
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(kind_line), chunks[0]);

    let fields = [
        (&form.amount, TransactionField::Amount),
        (&form.description, TransactionField::Description),
        (&form.date, TransactionField::Date),
    ];
    for (row, (input, field)) in fields.into_iter().enumerate() {
        let line = input.to_line(form.focused_field == field, &palette);
        frame.render_widget(Paragraph::new(line), chunks[row + 1]);
    }

    if let Some(error) = &form.error_message {
        let error_line = Line::from(Span::styled(
            error.clone(),
            Style::default().fg(palette.negative),
        ));
        frame.render_widget(Paragraph::new(error_line), chunks[5]);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(palette.warning)),
        Span::raw(" Next  "),
        Span::styled("[Shift+Tab]", Style::default().fg(palette.warning)),
        Span::raw(" Prev  "),
        Span::styled("[Enter]", Style::default().fg(palette.positive)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(palette.negative)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[6]);
}

/// Handle key input for the transaction dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let form = &mut app.transaction_form;

    match key.code {
        KeyCode::Esc => app.cancel_transaction_form(),

        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => form.prev_field(),
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.prev_field(),
        KeyCode::Down => form.next_field(),
        KeyCode::Up => form.prev_field(),

        KeyCode::Enter => save_transaction(app),

        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
            if form.focused_field == TransactionField::Kind =>
        {
            form.kind = form.kind.flipped();
        }

        code => {
            if let Some(input) = form.focused_input() {
                if input.handle_key(code) {
                    form.clear_error();
                }
            }
        }
    }
}

/// Validate and submit the form; errors stay in the dialog
fn save_transaction(app: &mut App) {
    let txn = match app.transaction_form.build_transaction() {
        Ok(txn) => txn,
        Err(e) => {
            app.transaction_form.set_error(e);
            return;
        }
    };

    let is_edit = app.transaction_form.is_edit();
    let operation = if is_edit {
        Operation::Update(txn.clone())
    } else {
        Operation::Add(txn.clone())
    };

    if let Err(e) = app.session.dispatch(operation) {
        app.transaction_form.set_error(e.to_string());
        return;
    }

    if app.session.state().reuse.is_some() {
        app.dispatch(Operation::SetReuse(None));
    }
    if !is_edit {
        app.selected_index = 0;
    }
    app.close_dialog();

    let verb = if is_edit { "Updated" } else { "Added" };
    app.set_status(format!("{} '{}'", verb, txn.description));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PocketbookPaths, Settings};
    use crate::models::LedgerSnapshot;
    use crate::services::LedgerSession;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_build_validates() {
        let mut form = TransactionFormState::new();
        assert_eq!(
            form.build_transaction().unwrap_err(),
            "Please enter a valid amount"
        );

        form.amount.set_value("12.50");
        assert_eq!(
            form.build_transaction().unwrap_err(),
            "Please enter a description"
        );

        form.description.set_value("Lunch");
        form.date.set_value("yesterday");
        assert!(form.build_transaction().unwrap_err().contains("YYYY-MM-DD"));

        form.date.set_value("2025-12-05");
        let txn = form.build_transaction().unwrap();
        assert_eq!(txn.amount, Money::from_cents(1_250));
        assert_eq!(txn.kind, TransactionType::Withdrawal);
    }

    #[test]
    fn test_edit_keeps_id() {
        let original = Transaction::deposit(
            Money::from_cents(500),
            "Refund",
            NaiveDate::from_ymd_opt(2025, 12, 7).unwrap(),
        );
        let form = TransactionFormState::from_transaction(&original);
        assert!(form.is_edit());
        assert_eq!(form.build_transaction().unwrap(), original);
    }

    #[test]
    fn test_reuse_gets_new_id_and_today() {
        let original = Transaction::withdrawal(
            Money::from_cents(1_499),
            "Coffee",
            NaiveDate::from_ymd_opt(2025, 12, 8).unwrap(),
        );
        let form = TransactionFormState::reuse_of(&original);
        let copy = form.build_transaction().unwrap();

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.amount, original.amount);
        assert_eq!(copy.date, Local::now().date_naive());
    }

    #[test]
    fn test_typing_and_saving_adds() {
        let dir = TempDir::new().unwrap();
        let paths = PocketbookPaths::with_base_dir(dir.path().to_path_buf());
        let session = LedgerSession::in_memory(LedgerSnapshot::with_balance(Money::zero()));
        let mut app = App::new(session, Settings::default(), &paths);

        app.begin_add();
        handle_key(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.transaction_form.kind, TransactionType::Deposit);

        handle_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "40");
        handle_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "Gift");
        handle_key(&mut app, key(KeyCode::Enter));

        assert!(!app.has_dialog());
        assert_eq!(app.session.state().balance(), Money::from_cents(4_000));
    }

    #[test]
    fn test_rejected_withdrawal_keeps_dialog_open() {
        let dir = TempDir::new().unwrap();
        let paths = PocketbookPaths::with_base_dir(dir.path().to_path_buf());
        let session = LedgerSession::in_memory(LedgerSnapshot::with_balance(Money::zero()));
        let mut app = App::new(session, Settings::default(), &paths);

        app.begin_add();
        handle_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "10");
        handle_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "Snacks");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.active_dialog, ActiveDialog::AddTransaction);
        assert!(app
            .transaction_form
            .error_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Insufficient balance")));
        assert!(app.session.state().transactions().is_empty());
    }
}
