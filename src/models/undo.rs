//! Undo record
//!
//! The ledger keeps at most one of these: enough information to reverse the
//! most recent add, delete or edit exactly.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::transaction::Transaction;

/// The single pending undo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LastAction {
    /// A transaction was added at the front of the list
    Add {
        transaction: Transaction,
        previous_balance: Money,
    },
    /// A transaction was removed from `index`
    Delete {
        transaction: Transaction,
        /// Undo reinserts here rather than at the front so the list comes back unchanged
        index: usize,
        previous_balance: Money,
    },
    /// `old_transaction` was replaced in place by `transaction`
    Edit {
        transaction: Transaction,
        old_transaction: Transaction,
        previous_balance: Money,
    },
}

impl LastAction {
    /// The transaction the action was about (the new version for edits)
    pub fn transaction(&self) -> &Transaction {
        match self {
            Self::Add { transaction, .. }
            | Self::Delete { transaction, .. }
            | Self::Edit { transaction, .. } => transaction,
        }
    }

    /// Balance before the action
    pub fn previous_balance(&self) -> Money {
        match self {
            Self::Add {
                previous_balance, ..
            }
            | Self::Delete {
                previous_balance, ..
            }
            | Self::Edit {
                previous_balance, ..
            } => *previous_balance,
        }
    }

    /// Short verb for status messages
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Delete { .. } => "delete",
            Self::Edit { .. } => "edit",
        }
    }
}
