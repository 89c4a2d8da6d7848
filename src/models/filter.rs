//! View filter
//!
//! Filters narrow what is displayed; they never change the ledger itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::transaction::{Transaction, TransactionType};

/// Which transaction types to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Deposit,
    Withdrawal,
}

impl TypeFilter {
    /// Whether a transaction type passes this filter
    pub fn accepts(&self, kind: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Deposit => kind == TransactionType::Deposit,
            Self::Withdrawal => kind == TransactionType::Withdrawal,
        }
    }

    /// Cycle All -> Deposit -> Withdrawal -> All
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Deposit,
            Self::Deposit => Self::Withdrawal,
            Self::Withdrawal => Self::All,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Deposit => write!(f, "Deposits"),
            Self::Withdrawal => write!(f, "Withdrawals"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "deposit" | "deposits" => Ok(Self::Deposit),
            "withdrawal" | "withdrawals" => Ok(Self::Withdrawal),
            other => Err(format!(
                "Unknown type filter '{}'. Use all, deposit or withdrawal",
                other
            )),
        }
    }
}

/// Criteria for the visible transaction list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Type restriction
    pub kind: TypeFilter,
    /// Inclusive lower date bound
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub date_to: Option<NaiveDate>,
    /// Case-insensitive substring of the description
    pub search_term: String,
}

impl TransactionFilter {
    /// Create an empty filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict by type
    pub fn kind(mut self, kind: TypeFilter) -> Self {
        self.kind = kind;
        self
    }

    /// Restrict by date range (either bound may be open)
    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Restrict by description text
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Whether any criterion is set
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    /// Check a single transaction against all criteria
    pub fn matches(&self, txn: &Transaction) -> bool {
        if !self.kind.accepts(txn.kind) {
            return false;
        }
        if self.date_from.is_some_and(|from| txn.date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| txn.date > to) {
            return false;
        }
        if !self.search_term.is_empty() {
            let needle = self.search_term.to_lowercase();
            if !txn.description.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Merge a partial update into this filter
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(from) = update.date_from {
            self.date_from = from;
        }
        if let Some(to) = update.date_to {
            self.date_to = to;
        }
        if let Some(term) = update.search_term {
            self.search_term = term;
        }
    }
}

/// A partial filter change; `None` leaves the field as it is
///
/// Date fields are doubly optional so a bound can be cleared explicitly
/// (`Some(None)`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    pub kind: Option<TypeFilter>,
    pub date_from: Option<Option<NaiveDate>>,
    pub date_to: Option<Option<NaiveDate>>,
    pub search_term: Option<String>,
}

impl FilterUpdate {
    /// Change only the type
    pub fn kind(kind: TypeFilter) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Change only the search term
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            ..Self::default()
        }
    }

    /// Change only the date range
    pub fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            date_from: Some(from),
            date_to: Some(to),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TransactionFilter::new();
        let txn = Transaction::withdrawal(Money::from_cents(100), "Coffee", date(1));
        assert!(filter.matches(&txn));
        assert!(!filter.is_active());
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let filter = TransactionFilter::new().date_range(Some(date(3)), Some(date(5)));
        let at = |d| Transaction::deposit(Money::from_cents(100), "x", date(d));

        assert!(!filter.matches(&at(2)));
        assert!(filter.matches(&at(3)));
        assert!(filter.matches(&at(5)));
        assert!(!filter.matches(&at(6)));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = TransactionFilter::new().search("SAL");
        assert!(filter.matches(&Transaction::deposit(Money::from_cents(1), "Salary", date(1))));
        assert!(!filter.matches(&Transaction::deposit(Money::from_cents(1), "Refund", date(1))));
    }

    #[test]
    fn test_merge_partial_update() {
        let mut filter = TransactionFilter::new()
            .kind(TypeFilter::Withdrawal)
            .search("bill");

        filter.merge(FilterUpdate::date_range(Some(date(1)), None));
        assert_eq!(filter.kind, TypeFilter::Withdrawal);
        assert_eq!(filter.search_term, "bill");
        assert_eq!(filter.date_from, Some(date(1)));

        filter.merge(FilterUpdate {
            date_from: Some(None),
            ..FilterUpdate::default()
        });
        assert_eq!(filter.date_from, None);
        assert_eq!(filter.search_term, "bill");
    }

    #[test]
    fn test_type_filter_cycle() {
        assert_eq!(TypeFilter::All.next(), TypeFilter::Deposit);
        assert_eq!(TypeFilter::Withdrawal.next(), TypeFilter::All);
        assert_eq!("withdrawals".parse::<TypeFilter>(), Ok(TypeFilter::Withdrawal));
    }
}
