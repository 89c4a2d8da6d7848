//! Application state for the TUI
//!
//! The App struct owns the ledger session and everything needed for
//! rendering and handling events.

use std::path::PathBuf;

use chrono::Local;

use crate::config::{LocaleConfig, PocketbookPaths, Settings};
use crate::error::LedgerResult;
use crate::export::{default_csv_filename, export_transactions_csv_file};
use crate::models::{Transaction, TransactionId};
use crate::services::{clamp_page, parse_csv_file, LedgerSession, Operation, Page, RateQuote};

use super::dialogs::filter::FilterFormState;
use super::dialogs::transaction::TransactionFormState;
use super::theme::Palette;
use super::widgets::TextInput;

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddTransaction,
    EditTransaction(TransactionId),
    Filter,
    Import,
    ConfirmDelete(TransactionId),
    Help,
}

/// Exchange rate as far as the UI knows it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RateState {
    #[default]
    Loading,
    Ready(Option<RateQuote>),
}

impl RateState {
    pub fn quote(&self) -> Option<&RateQuote> {
        match self {
            Self::Ready(quote) => quote.as_ref(),
            Self::Loading => None,
        }
    }
}

/// Severity of the status line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Main application state
pub struct App<'a> {
    /// The ledger and its persistence
    pub session: LedgerSession,

    /// Application settings
    pub settings: Settings,

    /// Paths configuration
    pub paths: &'a PocketbookPaths,

    /// Colors for the current theme
    pub palette: Palette,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Selected row on the current page
    pub selected_index: usize,

    /// Status message to display
    pub status_message: Option<(StatusKind, String)>,

    /// Add/edit form state
    pub transaction_form: TransactionFormState,

    /// Filter form state
    pub filter_form: FilterFormState,

    /// CSV path entered in the import dialog
    pub import_input: TextInput,

    /// Latest exchange rate
    pub rate: RateState,
}

impl<'a> App<'a> {
    pub fn new(session: LedgerSession, settings: Settings, paths: &'a PocketbookPaths) -> Self {
        let palette = Palette::from(settings.theme);
        Self {
            session,
            settings,
            paths,
            palette,
            should_quit: false,
            active_dialog: ActiveDialog::default(),
            selected_index: 0,
            status_message: None,
            transaction_form: TransactionFormState::new(),
            filter_form: FilterFormState::default(),
            import_input: TextInput::new()
                .label("CSV file")
                .placeholder("path/to/transactions.csv"),
            rate: RateState::default(),
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set an informational status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((StatusKind::Info, message.into()));
    }

    /// Set an error status message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some((StatusKind::Error, message.into()));
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn locale(&self) -> LocaleConfig {
        self.settings.locale_config()
    }

    pub fn page_size(&self) -> usize {
        self.settings.effective_page_size()
    }

    /// The page currently on screen
    pub fn current_page(&self) -> Page {
        self.session.state().page(self.page_size())
    }

    /// Transaction under the cursor
    pub fn selected_transaction(&self) -> Option<Transaction> {
        self.current_page().items.get(self.selected_index).cloned()
    }

    /// Apply an operation, reporting a failure on the status line
    pub fn dispatch(&mut self, operation: Operation) -> bool {
        match self.session.dispatch(operation) {
            Ok(()) => {
                self.clamp_selection();
                true
            }
            Err(e) => {
                self.set_error(e.to_string());
                false
            }
        }
    }

    fn clamp_selection(&mut self) {
        let rows = self.current_page().items.len();
        self.selected_index = self.selected_index.min(rows.saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let rows = self.current_page().items.len();
        if self.selected_index + 1 < rows {
            self.selected_index += 1;
        }
    }

    /// Go to a page, clamped to the pages that exist
    pub fn go_to_page(&mut self, page: usize) {
        let page_count = self.current_page().page_count;
        let target = clamp_page(page, page_count);
        if target != self.session.state().current_page {
            self.selected_index = 0;
            self.dispatch(Operation::SetPage(target));
        }
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.session.state().current_page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.session.state().current_page.saturating_sub(1));
    }

    /// Open the empty add form
    pub fn begin_add(&mut self) {
        self.transaction_form = TransactionFormState::new();
        self.open_dialog(ActiveDialog::AddTransaction);
    }

    /// Open the edit form for the selected transaction
    pub fn begin_edit(&mut self) {
        let Some(txn) = self.selected_transaction() else {
            self.set_status("No transaction selected");
            return;
        };
        if self.dispatch(Operation::SetEditing(Some(txn.id))) {
            self.transaction_form = TransactionFormState::from_transaction(&txn);
            self.open_dialog(ActiveDialog::EditTransaction(txn.id));
        }
    }

    /// Open the add form pre-filled from the selected transaction
    pub fn begin_reuse(&mut self) {
        let Some(txn) = self.selected_transaction() else {
            self.set_status("No transaction selected");
            return;
        };
        self.transaction_form = TransactionFormState::reuse_of(&txn);
        if self.dispatch(Operation::SetReuse(Some(txn))) {
            self.open_dialog(ActiveDialog::AddTransaction);
        }
    }

    /// Leave the add/edit form without saving
    pub fn cancel_transaction_form(&mut self) {
        match self.active_dialog {
            ActiveDialog::EditTransaction(_) => {
                self.dispatch(Operation::SetEditing(None));
            }
            _ if self.session.state().reuse.is_some() => {
                self.dispatch(Operation::SetReuse(None));
            }
            _ => {}
        }
        self.close_dialog();
    }

    /// Ask before deleting the selected transaction
    pub fn request_delete(&mut self) {
        match self.selected_transaction() {
            Some(txn) => self.open_dialog(ActiveDialog::ConfirmDelete(txn.id)),
            None => self.set_status("No transaction selected"),
        }
    }

    pub fn delete(&mut self, id: TransactionId) {
        let description = self
            .session
            .state()
            .ledger
            .get(id)
            .map(|t| t.description.clone());

        if self.dispatch(Operation::Delete(id)) {
            if let Some(description) = description {
                self.set_status(format!("Deleted '{}' (u to undo)", description));
            }
        }
    }

    pub fn undo(&mut self) {
        let Some(action) = self.session.state().last_action.clone() else {
            self.set_status("Nothing to undo");
            return;
        };
        if self.dispatch(Operation::Undo) {
            self.set_status(format!(
                "Undid {} of '{}'",
                action.verb(),
                action.transaction().description
            ));
        }
    }

    pub fn reset_filter(&mut self) {
        self.selected_index = 0;
        if self.dispatch(Operation::ResetFilter) {
            self.filter_form = FilterFormState::default();
            self.set_status("Filters cleared");
        }
    }

    /// Import the CSV file at `path`
    pub fn import_csv(&mut self, path: PathBuf) -> LedgerResult<()> {
        let import = parse_csv_file(&path)?;
        if import.is_empty() {
            self.set_error("No valid transactions found");
            return Ok(());
        }

        let count = import.transactions.len();
        let skipped = import.skipped;
        self.selected_index = 0;
        self.session.dispatch(Operation::Import(import.transactions))?;

        if skipped > 0 {
            self.set_status(format!(
                "Imported {} transactions ({} rows skipped)",
                count, skipped
            ));
        } else {
            self.set_status(format!("Imported {} transactions", count));
        }
        Ok(())
    }

    /// Write every transaction to a dated CSV file in the working directory
    pub fn export_csv(&mut self) {
        let path = PathBuf::from(default_csv_filename(Local::now().date_naive()));
        let transactions = self.session.state().transactions();
        let count = transactions.len();

        match export_transactions_csv_file(transactions, &path) {
            Ok(()) => self.set_status(format!(
                "Exported {} transactions to {}",
                count,
                path.display()
            )),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Switch between light and dark and remember the choice
    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggle();
        self.palette = Palette::from(self.settings.theme);

        match self.settings.save(self.paths) {
            Ok(()) => self.set_status(format!("Theme: {}", self.settings.theme)),
            Err(e) => {
                tracing::warn!("Failed to save theme: {}", e);
                self.set_status(format!("Theme: {} (not saved)", self.settings.theme));
            }
        }
    }
}
