//! Ledger snapshot
//!
//! The persisted content of the ledger: the running balance plus the ordered
//! list of transactions (newest first by insertion). The balance always equals
//! the opening balance plus the sum of the effects of the transactions present.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::TransactionId;
use super::money::Money;
use super::transaction::{Transaction, TransactionType};

/// Opening balance of the sample dataset
pub const SEED_BALANCE: Money = Money::from_cents(584_732);

/// Balance and transactions, as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Running balance
    pub balance: Money,

    /// Transactions in insertion order, newest first
    pub transactions: Vec<Transaction>,
}

impl LedgerSnapshot {
    /// Create a snapshot from parts
    pub fn new(balance: Money, transactions: Vec<Transaction>) -> Self {
        Self {
            balance,
            transactions,
        }
    }

    /// An empty ledger with the given balance
    pub fn with_balance(balance: Money) -> Self {
        Self::new(balance, Vec::new())
    }

    /// The sample dataset used when nothing has been saved yet
    pub fn seeded() -> Self {
        let rows: [(TransactionType, i64, &str, (i32, u32, u32)); 13] = [
            (TransactionType::Deposit, 350_000, "Salary", (2025, 12, 1)),
            (TransactionType::Withdrawal, 8_999, "Amazon Order", (2025, 12, 2)),
            (TransactionType::Withdrawal, 4_550, "Grocery Shopping", (2025, 12, 3)),
            (TransactionType::Withdrawal, 12_000, "Electricity Bill", (2025, 12, 4)),
            (TransactionType::Withdrawal, 25_000, "Rent Share", (2025, 12, 5)),
            (TransactionType::Withdrawal, 1_499, "Netflix Subscription", (2025, 12, 6)),
            (TransactionType::Deposit, 15_000, "Refund", (2025, 12, 7)),
            (TransactionType::Withdrawal, 3_280, "Restaurant", (2025, 12, 8)),
            (TransactionType::Withdrawal, 19_900, "Electronics Store", (2025, 12, 9)),
            (TransactionType::Deposit, 50_000, "Freelance Payment", (2025, 12, 10)),
            (TransactionType::Withdrawal, 6_500, "Gas Station", (2025, 12, 11)),
            (TransactionType::Withdrawal, 2_599, "Book Store", (2025, 12, 12)),
            (TransactionType::Withdrawal, 5_500, "Internet Bill", (2025, 12, 14)),
        ];

        let transactions = rows
            .into_iter()
            .filter_map(|(kind, cents, description, (y, m, d))| {
                NaiveDate::from_ymd_opt(y, m, d)
                    .map(|date| Transaction::new(kind, Money::from_cents(cents), description, date))
            })
            .collect();

        Self::new(SEED_BALANCE, transactions)
    }

    /// Find a transaction by ID
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Position of a transaction in the list
    pub fn position(&self, id: TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    /// Sum of all transaction effects
    pub fn net_effect(&self) -> Money {
        self.transactions.iter().map(Transaction::effect).sum()
    }

    /// The balance the ledger started from before any listed transaction
    pub fn opening_balance(&self) -> Money {
        self.balance - self.net_effect()
    }

    /// Total of all deposits
    pub fn total_income(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_deposit())
            .map(|t| t.amount)
            .sum()
    }

    /// Total of all withdrawals (as a positive amount)
    pub fn total_expenses(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_withdrawal())
            .map(|t| t.amount)
            .sum()
    }

    /// Number of transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the ledger has no transactions
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_dataset() {
        let snapshot = LedgerSnapshot::seeded();
        assert_eq!(snapshot.len(), 13);
        assert_eq!(snapshot.balance, Money::from_cents(584_732));
        assert_eq!(snapshot.total_income(), Money::from_cents(415_000));
        assert_eq!(snapshot.total_expenses(), Money::from_cents(89_827));
        assert_eq!(snapshot.opening_balance(), Money::from_cents(259_559));
    }

    #[test]
    fn test_lookup() {
        let snapshot = LedgerSnapshot::seeded();
        let third = snapshot.transactions[2].clone();
        assert_eq!(snapshot.get(third.id), Some(&third));
        assert_eq!(snapshot.position(third.id), Some(2));
        assert_eq!(snapshot.get(TransactionId::new()), None);
    }

    #[test]
    fn test_serialization_shape() {
        let snapshot = LedgerSnapshot::with_balance(Money::from_cents(10_000));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["balance"], 10_000);
        assert!(json["transactions"].as_array().unwrap().is_empty());
    }
}
