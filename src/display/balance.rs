//! Balance summary formatting
//!
//! Balance, income and expense totals, optionally followed by their value in
//! the foreign display currency.

use crate::config::LocaleConfig;
use crate::models::{LastAction, LedgerSnapshot, Money};
use crate::services::RateQuote;

/// Placeholder when no exchange rate is available
pub const RATE_UNAVAILABLE: &str = "—";

/// Placeholder while an exchange rate is being fetched
pub const RATE_LOADING: &str = "…";

/// Foreign equivalent of an amount, or the "unavailable" placeholder
pub fn format_foreign_amount(
    amount: Money,
    quote: Option<&RateQuote>,
    currency: &str,
    locale: &LocaleConfig,
) -> String {
    match quote {
        Some(quote) => locale.format_foreign(quote.convert(amount), currency),
        None => RATE_UNAVAILABLE.to_string(),
    }
}

/// Multi-line balance summary for the `balance` command
pub fn format_balance_summary(
    ledger: &LedgerSnapshot,
    locale: &LocaleConfig,
    quote: Option<&RateQuote>,
    foreign_currency: &str,
    last_action: Option<&LastAction>,
) -> String {
    let income = ledger.total_income();
    let expenses = ledger.total_expenses();

    let mut output = String::new();
    let mut line = |label: &str, value: String, foreign: String| {
        output.push_str(&format!("{:<16} {:>18}   {}\n", label, value, foreign));
    };

    line(
        "Balance:",
        locale.format_money(ledger.balance),
        format_foreign_amount(ledger.balance, quote, foreign_currency, locale),
    );
    line(
        "Total Income:",
        format!("+{}", locale.format_money(income)),
        format_foreign_amount(income, quote, foreign_currency, locale),
    );
    line(
        "Total Expenses:",
        format!("-{}", locale.format_money(expenses)),
        format_foreign_amount(expenses, quote, foreign_currency, locale),
    );

    if let Some(quote) = quote.filter(|q| q.stale) {
        output.push_str(&format!(
            "\nExchange rate from {} (offline)\n",
            quote.fetched_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    if let Some(action) = last_action {
        output.push_str(&format!(
            "\nLast {}: {} (run `pocketbook undo` to revert)\n",
            action.verb(),
            action.transaction().description
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_summary_without_rate() {
        let ledger = LedgerSnapshot::seeded();
        let summary =
            format_balance_summary(&ledger, &LocaleConfig::default(), None, "KES", None);

        assert!(summary.contains("5.847,32 €"));
        assert!(summary.contains("+4.150,00 €"));
        assert!(summary.contains("-898,27 €"));
        assert!(summary.contains(RATE_UNAVAILABLE));
        assert!(!summary.contains("undo"));
    }

    #[test]
    fn test_summary_with_rate_and_undo() {
        let ledger = LedgerSnapshot::with_balance(Money::from_cents(10_000));
        let quote = RateQuote {
            rate: 150.0,
            fetched_at: Utc::now(),
            stale: true,
        };
        let action = LastAction::Add {
            transaction: crate::models::Transaction::deposit(
                Money::from_cents(100),
                "Tip",
                chrono::NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            ),
            previous_balance: Money::from_cents(9_900),
        };

        let summary = format_balance_summary(
            &ledger,
            &LocaleConfig::resolve("en-US"),
            Some(&quote),
            "KES",
            Some(&action),
        );

        assert!(summary.contains("KES 15,000.00"));
        assert!(summary.contains("(offline)"));
        assert!(summary.contains("Last add: Tip"));
    }
}
