//! Transaction model
//!
//! A transaction is either a deposit or a withdrawal of a positive amount.
//! The sign of its effect on the balance comes from the type, never from the
//! stored amount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in
    Deposit,
    /// Money going out
    Withdrawal,
}

impl TransactionType {
    /// Human-readable label used in CSV files and the UI
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
        }
    }

    /// The other type
    pub fn flipped(&self) -> Self {
        match self {
            Self::Deposit => Self::Withdrawal,
            Self::Withdrawal => Self::Deposit,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" | "d" | "in" => Ok(Self::Deposit),
            "withdrawal" | "w" | "out" => Ok(Self::Withdrawal),
            other => Err(format!(
                "Unknown transaction type '{}'. Use deposit or withdrawal",
                other
            )),
        }
    }
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Deposit or withdrawal
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Positive magnitude
    pub amount: Money,

    /// Free-text description
    pub description: String,

    /// Calendar date of the transaction
    pub date: NaiveDate,
}

impl Transaction {
    /// Create a new transaction with a fresh ID
    pub fn new(
        kind: TransactionType,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            description: description.into(),
            date,
        }
    }

    /// Shorthand for a deposit
    pub fn deposit(amount: Money, description: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionType::Deposit, amount, description, date)
    }

    /// Shorthand for a withdrawal
    pub fn withdrawal(amount: Money, description: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionType::Withdrawal, amount, description, date)
    }

    /// Signed contribution of this transaction to the balance
    pub fn effect(&self) -> Money {
        match self.kind {
            TransactionType::Deposit => self.amount,
            TransactionType::Withdrawal => -self.amount,
        }
    }

    /// Check if this is a deposit
    pub fn is_deposit(&self) -> bool {
        self.kind == TransactionType::Deposit
    }

    /// Check if this is a withdrawal
    pub fn is_withdrawal(&self) -> bool {
        self.kind == TransactionType::Withdrawal
    }

    /// Validate user-entered fields
    ///
    /// Called at the input boundary (forms, CLI arguments, CSV rows); the
    /// ledger itself trusts what it is handed.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.effect()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    EmptyDescription,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Please enter a valid amount (got {})", amount)
            }
            Self::EmptyDescription => write!(f, "Please enter a description"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
