//! Balance validation
//!
//! Pure functions that compute balance deltas and reject mutations that would
//! take the balance below zero. Nothing here touches ledger state; callers
//! apply the returned value only on success.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction};

/// Check that `transaction` can be added on top of `current_balance`
///
/// Returns the resulting balance. A withdrawal larger than the current
/// balance fails with [`LedgerError::InsufficientBalance`] reporting what is
/// available.
pub fn validate_add(transaction: &Transaction, current_balance: Money) -> LedgerResult<Money> {
    if transaction.is_withdrawal() && transaction.amount > current_balance {
        return Err(LedgerError::InsufficientBalance {
            available: current_balance,
        });
    }

    current_balance
        .checked_add(transaction.effect())
        .ok_or_else(LedgerError::balance_overflow)
}

/// Check that replacing `old` by `new` keeps the balance non-negative
///
/// Returns the resulting balance, or [`LedgerError::NegativeBalance`] carrying
/// the rejected figure.
pub fn validate_update(
    new: &Transaction,
    old: &Transaction,
    current_balance: Money,
) -> LedgerResult<Money> {
    let new_balance = current_balance
        .checked_sub(old.effect())
        .and_then(|b| b.checked_add(new.effect()))
        .ok_or_else(LedgerError::balance_overflow)?;

    if new_balance.is_negative() {
        return Err(LedgerError::NegativeBalance {
            balance: new_balance,
        });
    }

    Ok(new_balance)
}

/// Combined effect of a batch of imported transactions
///
/// Imports are applied all-or-nothing and are not checked against the
/// non-negative rule: a batch with more withdrawals than the balance covers
/// is accepted and may leave the balance negative. Only a total outside the
/// money range is an error.
pub fn compute_import_delta(transactions: &[Transaction]) -> LedgerResult<Money> {
    transactions
        .iter()
        .try_fold(Money::zero(), |total, t| total.checked_add(t.effect()))
        .ok_or_else(|| LedgerError::Import("Imported amounts are too large".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    #[test]
    fn test_add_deposit_balance() {
        let txn = Transaction::deposit(Money::from_cents(5000), "Gift", date());
        assert_eq!(
            validate_add(&txn, Money::zero()).unwrap(),
            Money::from_cents(5000)
        );
    }

    #[test]
    fn test_add_withdrawal_within_balance() {
        let txn = Transaction::withdrawal(Money::from_cents(10000), "Rent", date());
        assert_eq!(
            validate_add(&txn, Money::from_cents(10000)).unwrap(),
            Money::zero()
        );
    }

    #[test]
    fn test_add_withdrawal_over_balance() {
        let txn = Transaction::withdrawal(Money::from_cents(15000), "TV", date());
        let err = validate_add(&txn, Money::from_cents(10000)).unwrap_err();

        assert!(err.is_balance_violation());
        assert_eq!(err.to_string(), "Insufficient balance. Available: 100.00");
    }

    #[test]
    fn test_update_reports_rejected_balance() {
        let old = Transaction::deposit(Money::from_cents(10000), "Pay", date());
        let mut new = old.clone();
        new.kind = new.kind.flipped();
        new.amount = Money::from_cents(15000);

        // balance 100 after the deposit: 100 - 100 - 150 = -150
        let err = validate_update(&new, &old, Money::from_cents(10000)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "This would result in negative balance: -150.00"
        );
    }

    #[test]
    fn test_update_to_zero_is_allowed() {
        let old = Transaction::withdrawal(Money::from_cents(2000), "Taxi", date());
        let mut new = old.clone();
        new.amount = Money::from_cents(3000);

        assert_eq!(
            validate_update(&new, &old, Money::from_cents(1000)).unwrap(),
            Money::zero()
        );
    }

    #[test]
    fn test_import_delta_ignores_balance() {
        let batch = vec![
            Transaction::deposit(Money::from_cents(20000), "A", date()),
            Transaction::withdrawal(Money::from_cents(5000), "B", date()),
            Transaction::withdrawal(Money::from_cents(90000), "C", date()),
        ];
        assert_eq!(
            compute_import_delta(&batch).unwrap(),
            Money::from_cents(-75000)
        );
        assert_eq!(compute_import_delta(&[]).unwrap(), Money::zero());
    }

    fn huge() -> Money {
        Money::parse("90000000000000000.00").unwrap()
    }

    #[test]
    fn test_add_out_of_range_is_rejected() {
        let txn = Transaction::deposit(huge(), "Lottery", date());
        let err = validate_add(&txn, huge()).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_update_out_of_range_is_rejected() {
        let old = Transaction::withdrawal(Money::from_cents(100), "Fee", date());
        let mut new = old.clone();
        new.kind = new.kind.flipped();
        new.amount = huge();

        let err = validate_update(&new, &old, huge()).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_import_delta_out_of_range_is_rejected() {
        let batch = vec![
            Transaction::deposit(huge(), "A", date()),
            Transaction::deposit(huge(), "B", date()),
        ];
        assert!(matches!(
            compute_import_delta(&batch),
            Err(LedgerError::Import(_))
        ));
    }
}
