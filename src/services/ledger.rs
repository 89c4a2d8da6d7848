//! Ledger state machine
//!
//! All changes to the ledger go through [`apply`], which takes the current
//! state and one [`Operation`] and returns the next state. The input state is
//! never modified, so a rejected operation leaves the caller with exactly what
//! it had.
//!
//! [`LedgerSession`] owns a state, dispatches operations through `apply` and
//! saves the result after every mutation.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    FilterUpdate, LastAction, LedgerSnapshot, Money, Transaction, TransactionFilter,
    TransactionId,
};
use crate::storage::Storage;

use super::projection::{project, Page};
use super::validation::{compute_import_delta, validate_add, validate_update};

/// Everything the ledger view knows at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    /// Balance and transactions
    pub ledger: LedgerSnapshot,
    /// Current view filter
    pub filter: TransactionFilter,
    /// 1-based page of the filtered list
    pub current_page: usize,
    /// The single pending undo
    pub last_action: Option<LastAction>,
    /// Transaction selected for editing
    pub editing: Option<TransactionId>,
    /// Transaction whose fields pre-fill the next new entry
    pub reuse: Option<Transaction>,
}

impl LedgerState {
    /// Fresh view state over a snapshot
    pub fn new(ledger: LedgerSnapshot) -> Self {
        Self {
            ledger,
            filter: TransactionFilter::default(),
            current_page: 1,
            last_action: None,
            editing: None,
            reuse: None,
        }
    }

    pub fn balance(&self) -> Money {
        self.ledger.balance
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    /// The currently visible page
    pub fn page(&self, page_size: usize) -> Page {
        project(
            &self.ledger.transactions,
            &self.filter,
            self.current_page,
            page_size,
        )
    }

    /// The transaction selected for editing, if it still exists
    pub fn editing_transaction(&self) -> Option<&Transaction> {
        self.editing.and_then(|id| self.ledger.get(id))
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new(LedgerSnapshot::seeded())
    }
}

/// A single state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Prepend a new transaction
    Add(Transaction),
    /// Remove a transaction; unknown IDs are ignored
    Delete(TransactionId),
    /// Replace the transaction with the same ID in place
    Update(Transaction),
    /// Reverse the pending add, delete or edit
    Undo,
    /// Prepend a batch of transactions
    Import(Vec<Transaction>),
    /// Merge filter criteria
    SetFilter(FilterUpdate),
    /// Clear all filter criteria
    ResetFilter,
    /// Move to a page (1-based, not clamped)
    SetPage(usize),
    /// Select or clear the transaction being edited
    SetEditing(Option<TransactionId>),
    /// Remember or forget a transaction to copy into the next entry
    SetReuse(Option<Transaction>),
    /// Replace balance and transactions with a saved snapshot
    LoadSaved(LedgerSnapshot),
}

impl Operation {
    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Delete(_) => "delete",
            Self::Update(_) => "update",
            Self::Undo => "undo",
            Self::Import(_) => "import",
            Self::SetFilter(_) => "set_filter",
            Self::ResetFilter => "reset_filter",
            Self::SetPage(_) => "set_page",
            Self::SetEditing(_) => "set_editing",
            Self::SetReuse(_) => "set_reuse",
            Self::LoadSaved(_) => "load_saved",
        }
    }
}

/// Compute the state that results from applying `operation` to `state`
///
/// Add and Update validate first and return the validation error without
/// producing a new state. Update of an unknown transaction is a not-found
/// error. Delete of an unknown transaction and Undo with nothing pending
/// return the state unchanged.
pub fn apply(state: &LedgerState, operation: Operation) -> LedgerResult<LedgerState> {
    let mut next = state.clone();

    match operation {
        Operation::Add(transaction) => {
            let new_balance = validate_add(&transaction, state.ledger.balance)?;
            next.last_action = Some(LastAction::Add {
                transaction: transaction.clone(),
                previous_balance: state.ledger.balance,
            });
            next.ledger.balance = new_balance;
            next.ledger.transactions.insert(0, transaction);
            next.current_page = 1;
        }

        Operation::Delete(id) => {
            let Some(index) = state.ledger.position(id) else {
                return Ok(next);
            };
            let transaction = next.ledger.transactions.remove(index);
            next.ledger.balance = state
                .ledger
                .balance
                .checked_sub(transaction.effect())
                .ok_or_else(LedgerError::balance_overflow)?;
            next.last_action = Some(LastAction::Delete {
                transaction,
                index,
                previous_balance: state.ledger.balance,
            });
        }

        Operation::Update(transaction) => {
            let index = state
                .ledger
                .position(transaction.id)
                .ok_or_else(|| LedgerError::transaction_not_found(transaction.id.to_string()))?;
            let old = &state.ledger.transactions[index];
            let new_balance = validate_update(&transaction, old, state.ledger.balance)?;

            next.last_action = Some(LastAction::Edit {
                transaction: transaction.clone(),
                old_transaction: old.clone(),
                previous_balance: state.ledger.balance,
            });
            next.ledger.transactions[index] = transaction;
            next.ledger.balance = new_balance;
            next.editing = None;
        }

        Operation::Undo => {
            let Some(action) = next.last_action.take() else {
                return Ok(next);
            };
            if !undo_applies(&action, &next.ledger) {
                tracing::warn!(
                    action = action.verb(),
                    "Dropping undo that no longer matches the ledger"
                );
                return Ok(next);
            }
            match action {
                LastAction::Add {
                    transaction,
                    previous_balance,
                } => {
                    next.ledger.transactions.retain(|t| t.id != transaction.id);
                    next.ledger.balance = previous_balance;
                }
                LastAction::Delete {
                    transaction,
                    index,
                    previous_balance,
                } => {
                    let index = index.min(next.ledger.transactions.len());
                    next.ledger.transactions.insert(index, transaction);
                    next.ledger.balance = previous_balance;
                }
                LastAction::Edit {
                    old_transaction,
                    previous_balance,
                    ..
                } => {
                    if let Some(index) = next.ledger.position(old_transaction.id) {
                        next.ledger.transactions[index] = old_transaction;
                        next.ledger.balance = previous_balance;
                    }
                }
            }
        }

        Operation::Import(batch) => {
            let delta = compute_import_delta(&batch)?;
            next.ledger.balance = state
                .ledger
                .balance
                .checked_add(delta)
                .ok_or_else(|| LedgerError::Import("Imported amounts are too large".into()))?;
            next.ledger.transactions.splice(0..0, batch);
            next.last_action = None;
            next.current_page = 1;
        }

        Operation::SetFilter(update) => {
            next.filter.merge(update);
            next.current_page = 1;
        }

        Operation::ResetFilter => {
            next.filter = TransactionFilter::default();
            next.current_page = 1;
        }

        Operation::SetPage(page) => {
            next.current_page = page;
        }

        Operation::SetEditing(id) => {
            next.editing = id;
        }

        Operation::SetReuse(transaction) => {
            next.reuse = transaction;
        }

        Operation::LoadSaved(snapshot) => {
            next.ledger = snapshot;
        }
    }

    Ok(next)
}

/// Whether `action` still describes the last change made to `ledger`
///
/// The recorded transaction must be present (absent for a delete) and the
/// recorded balance plus the action's effect must equal the current balance.
fn undo_applies(action: &LastAction, ledger: &LedgerSnapshot) -> bool {
    let expected = match action {
        LastAction::Add {
            transaction,
            previous_balance,
        } => ledger
            .get(transaction.id)
            .filter(|t| *t == transaction)
            .and_then(|_| previous_balance.checked_add(transaction.effect())),
        LastAction::Delete {
            transaction,
            previous_balance,
            ..
        } => match ledger.get(transaction.id) {
            Some(_) => None,
            None => previous_balance.checked_sub(transaction.effect()),
        },
        LastAction::Edit {
            transaction,
            old_transaction,
            previous_balance,
        } => ledger
            .get(transaction.id)
            .filter(|t| *t == transaction)
            .and_then(|_| previous_balance.checked_sub(old_transaction.effect()))
            .and_then(|b| b.checked_add(transaction.effect())),
    };
    expected == Some(ledger.balance)
}

/// Owns the ledger state and keeps it saved
///
/// Persistence is best-effort: a failed save is logged and otherwise ignored,
/// and the in-memory state stays authoritative.
#[derive(Debug)]
pub struct LedgerSession {
    state: LedgerState,
    storage: Option<Storage>,
}

impl LedgerSession {
    /// Open the ledger saved in `storage`
    ///
    /// A missing or unreadable ledger file yields the sample dataset. The
    /// pending undo from the previous run is restored only when the ledger
    /// came from disk; with the sample dataset it is discarded.
    pub fn open(storage: Storage) -> Self {
        let state = match storage.ledger.load_saved() {
            Some(snapshot) => LedgerState {
                last_action: storage.session.load(),
                ..LedgerState::new(snapshot)
            },
            None => {
                if let Err(e) = storage.session.save(None) {
                    tracing::warn!("Failed to clear undo state: {}", e);
                }
                LedgerState::new(LedgerSnapshot::seeded())
            }
        };

        Self {
            state,
            storage: Some(storage),
        }
    }

    /// A session that never touches the disk
    pub fn in_memory(snapshot: LedgerSnapshot) -> Self {
        Self {
            state: LedgerState::new(snapshot),
            storage: None,
        }
    }

    /// Current state
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Apply an operation, saving the ledger if it changed
    ///
    /// On error the state is left as it was.
    pub fn dispatch(&mut self, operation: Operation) -> LedgerResult<()> {
        let name = operation.name();
        let next = apply(&self.state, operation).map_err(|e| {
            tracing::debug!(operation = name, error = %e, "Operation rejected");
            e
        })?;

        let ledger_changed = next.ledger != self.state.ledger;
        let undo_changed = next.last_action != self.state.last_action;
        self.state = next;

        tracing::debug!(
            operation = name,
            balance = %self.state.ledger.balance,
            transactions = self.state.ledger.len(),
            "Applied operation"
        );

        if ledger_changed {
            self.save_ledger();
        }
        if undo_changed {
            self.save_session();
        }

        Ok(())
    }

    fn save_ledger(&self) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.ledger.save(&self.state.ledger) {
                tracing::warn!("Failed to save ledger: {}", e);
            }
        }
    }

    fn save_session(&self) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.session.save(self.state.last_action.as_ref()) {
                tracing::warn!("Failed to save undo state: {}", e);
            }
        }
    }
}
