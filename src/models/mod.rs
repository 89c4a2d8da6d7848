//! Core data models for Pocketbook
//!
//! This module contains the data structures that represent the ledger
//! domain: money, transactions, the persisted snapshot, view filters and the
//! undo record.

pub mod filter;
pub mod ids;
pub mod money;
pub mod snapshot;
pub mod transaction;
pub mod undo;

pub use filter::{FilterUpdate, TransactionFilter, TypeFilter};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use snapshot::{LedgerSnapshot, SEED_BALANCE};
pub use transaction::{Transaction, TransactionType, TransactionValidationError};
pub use undo::LastAction;
