//! Transaction CLI commands
//!
//! Implements the ledger commands: add, list, show, edit, delete, undo and
//! balance. Every mutation goes through the session so it is validated,
//! saved and recorded for undo exactly as in the TUI.

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::{PocketbookPaths, Settings};
use crate::display::{
    format_balance_summary, format_transaction_details, format_transaction_short,
    format_transaction_table,
};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{FilterUpdate, Money, Transaction, TransactionType, TypeFilter};
use crate::services::{clamp_page, ExchangeRateService, LedgerSession, LedgerState, Operation};

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a deposit or withdrawal
    Add {
        /// deposit or withdrawal
        kind: TransactionType,
        /// Amount as a positive number (e.g. "89.99")
        amount: String,
        /// What the transaction was for
        description: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Filter by type (all, deposit, withdrawal)
        #[arg(short = 't', long = "type", default_value = "all")]
        kind: TypeFilter,
        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,
        /// Case-insensitive text to look for in descriptions
        #[arg(short, long)]
        search: Option<String>,
        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or short form)
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (full or short form)
        id: String,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short form)
        id: String,
    },
    /// Revert the most recent add, edit or delete
    Undo,
    /// Show balance, income and expenses
    Balance {
        /// Use only the cached exchange rate
        #[arg(long)]
        offline: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    session: &mut LedgerSession,
    settings: &Settings,
    paths: &PocketbookPaths,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let locale = settings.locale_config();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            description,
            date,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };
            let txn = Transaction::new(kind, parse_amount(&amount)?, description.trim(), date);
            txn.validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;

            session.dispatch(Operation::Add(txn.clone()))?;

            println!("Added: {}", format_transaction_short(&txn, &locale));
            println!("Balance: {}", locale.format_money(session.state().balance()));
        }

        TransactionCommands::List {
            kind,
            from,
            to,
            search,
            page,
        } => {
            let from = from.as_deref().map(parse_date).transpose()?;
            let to = to.as_deref().map(parse_date).transpose()?;

            let mut update = FilterUpdate::date_range(from, to);
            update.kind = Some(kind);
            update.search_term = search;
            session.dispatch(Operation::SetFilter(update))?;

            let page_size = settings.effective_page_size();
            let page_count = session.state().page(page_size).page_count;
            session.dispatch(Operation::SetPage(clamp_page(page, page_count)))?;

            print!(
                "{}",
                format_transaction_table(&session.state().page(page_size), &locale)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = resolve_transaction(session.state(), &id)?;
            print!("{}", format_transaction_details(txn, &locale));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            description,
            date,
        } => {
            let mut txn = resolve_transaction(session.state(), &id)?.clone();

            if let Some(kind) = kind {
                txn.kind = kind;
            }
            if let Some(amount) = amount {
                txn.amount = parse_amount(&amount)?;
            }
            if let Some(description) = description {
                txn.description = description.trim().to_string();
            }
            if let Some(date) = date {
                txn.date = parse_date(&date)?;
            }
            txn.validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;

            session.dispatch(Operation::Update(txn.clone()))?;

            println!("Updated: {}", format_transaction_short(&txn, &locale));
            println!("Balance: {}", locale.format_money(session.state().balance()));
        }

        TransactionCommands::Delete { id } => {
            let txn = resolve_transaction(session.state(), &id)?.clone();
            session.dispatch(Operation::Delete(txn.id))?;

            println!("Deleted: {}", format_transaction_short(&txn, &locale));
            println!("Balance: {}", locale.format_money(session.state().balance()));
        }

        TransactionCommands::Undo => {
            let Some(action) = session.state().last_action.clone() else {
                println!("Nothing to undo.");
                return Ok(());
            };
            session.dispatch(Operation::Undo)?;

            println!(
                "Undid {} of '{}'",
                action.verb(),
                action.transaction().description
            );
            println!("Balance: {}", locale.format_money(session.state().balance()));
        }

        TransactionCommands::Balance { offline } => {
            let service =
                ExchangeRateService::from_settings(settings, paths.rate_cache_file())?;
            let quote = if offline {
                service.lookup_cached()
            } else {
                service.lookup()
            };

            print!(
                "{}",
                format_balance_summary(
                    &session.state().ledger,
                    &locale,
                    quote.as_ref(),
                    service.target(),
                    session.state().last_action.as_ref(),
                )
            );
        }
    }

    Ok(())
}

/// Find the transaction a user-supplied ID refers to
///
/// Accepts the full UUID, the `txn-xxxxxxxx` display form, or any unique
/// prefix of the UUID.
pub fn resolve_transaction<'a>(
    state: &'a LedgerState,
    reference: &str,
) -> LedgerResult<&'a Transaction> {
    let mut matches = state
        .transactions()
        .iter()
        .filter(|t| t.id.matches_reference(reference));

    match (matches.next(), matches.next()) {
        (Some(txn), None) => Ok(txn),
        (None, _) => Err(LedgerError::transaction_not_found(reference)),
        (Some(_), Some(_)) => Err(LedgerError::Validation(format!(
            "ID '{}' matches more than one transaction; use more characters",
            reference
        ))),
    }
}

/// Parse a user-entered amount; the sign is not allowed to carry meaning
pub fn parse_amount(input: &str) -> LedgerResult<Money> {
    let amount = Money::parse(input)
        .map_err(|e| LedgerError::Validation(format!("Invalid amount '{}': {}", input, e)))?;
    if !amount.is_positive() {
        return Err(LedgerError::Validation(
            "Please enter a valid amount".to_string(),
        ));
    }
    Ok(amount)
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(input: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", input))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LedgerSnapshot;

    #[test]
    fn test_resolve_by_short_and_full_id() {
        let state = LedgerState::default();
        let target = &state.transactions()[3];

        let by_short = resolve_transaction(&state, &target.id.to_string()).unwrap();
        assert_eq!(by_short, target);

        let by_full = resolve_transaction(&state, &target.id.as_uuid().to_string()).unwrap();
        assert_eq!(by_full, target);
    }

    #[test]
    fn test_resolve_unknown() {
        let state = LedgerState::new(LedgerSnapshot::with_balance(Money::zero()));
        let err = resolve_transaction(&state, "txn-deadbeef").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("89.99").unwrap(), Money::from_cents(8_999));
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-12-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
        );
        assert!(parse_date("12/01/2025").is_err());
    }
}
