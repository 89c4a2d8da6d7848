//! CLI command for CSV import

use std::path::Path;

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::services::{parse_csv_file, LedgerSession, Operation};

/// Import transactions from a CSV file
///
/// Imported transactions are prepended in file order. Imports cannot be
/// undone and are not checked against the balance.
pub fn handle_import_command(
    session: &mut LedgerSession,
    settings: &Settings,
    file: &Path,
) -> LedgerResult<()> {
    let import = parse_csv_file(file)?;

    if import.is_empty() {
        println!("No valid transactions found");
        if import.skipped > 0 {
            println!("Skipped {} invalid rows", import.skipped);
        }
        return Ok(());
    }

    let count = import.transactions.len();
    session.dispatch(Operation::Import(import.transactions))?;

    println!("Imported {} transactions", count);
    if import.skipped > 0 {
        println!("Skipped {} invalid rows", import.skipped);
    }
    println!(
        "Balance: {}",
        settings
            .locale_config()
            .format_money(session.state().balance())
    );

    Ok(())
}
