//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger data for the command line.

pub mod balance;
pub mod transaction;

pub use balance::{format_balance_summary, format_foreign_amount, RATE_LOADING, RATE_UNAVAILABLE};
pub use transaction::{
    format_signed_amount, format_transaction_details, format_transaction_short,
    format_transaction_table,
};
