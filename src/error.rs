//! Custom error types for Pocketbook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.
//!
//! The two ledger errors (`InsufficientBalance` and `NegativeBalance`) are
//! recoverable: their `Display` output is shown to the user verbatim.

use thiserror::Error;

use crate::models::Money;

/// The main error type for Pocketbook operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A withdrawal larger than the current balance was rejected
    #[error("Insufficient balance. Available: {}", available.to_decimal_string())]
    InsufficientBalance { available: Money },

    /// An edit would have driven the balance below zero
    #[error("This would result in negative balance: {}", balance.to_decimal_string())]
    NegativeBalance { balance: Money },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Exchange rate lookup errors
    #[error("Exchange rate error: {0}")]
    ExchangeRate(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl LedgerError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// A balance change that does not fit in the money range
    pub fn balance_overflow() -> Self {
        Self::Validation("Amount is too large for the ledger balance".into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was raised by a balance rule
    pub fn is_balance_violation(&self) -> bool {
        matches!(
            self,
            Self::InsufficientBalance { .. } | Self::NegativeBalance { .. }
        )
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for Pocketbook operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_balance_message() {
        let err = LedgerError::InsufficientBalance {
            available: Money::from_cents(10000),
        };
        assert_eq!(err.to_string(), "Insufficient balance. Available: 100.00");
        assert!(err.is_balance_violation());
    }

    #[test]
    fn test_negative_balance_message() {
        let err = LedgerError::NegativeBalance {
            balance: Money::from_cents(-5000),
        };
        assert_eq!(
            err.to_string(),
            "This would result in negative balance: -50.00"
        );
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::transaction_not_found("txn-1234abcd");
        assert_eq!(err.to_string(), "Transaction not found: txn-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_balance_violation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LedgerError = io_err.into();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
