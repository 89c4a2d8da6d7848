//! CSV Export functionality
//!
//! Writes transactions in the same `Date,Amount,Description,Type` layout the
//! importer reads. Withdrawals are written with a negative amount.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use csv::WriterBuilder;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;
use crate::services::import::CSV_DATE_FORMAT;

/// Header row of the CSV format
pub const CSV_HEADER: [&str; 4] = ["Date", "Amount", "Description", "Type"];

/// Export transactions to CSV, in list order
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> LedgerResult<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    for txn in transactions {
        csv_writer
            .write_record([
                txn.date.format(CSV_DATE_FORMAT).to_string(),
                txn.effect().to_decimal_string(),
                txn.description.clone(),
                txn.kind.label().to_string(),
            ])
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Export transactions to a CSV file, replacing it if it exists
pub fn export_transactions_csv_file<P: AsRef<Path>>(
    transactions: &[Transaction],
    path: P,
) -> LedgerResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;

    export_transactions_csv(transactions, BufWriter::new(file))?;
    tracing::info!(
        count = transactions.len(),
        "Exported transactions to {}",
        path.display()
    );
    Ok(())
}

/// Default export file name for a given day
pub fn default_csv_filename(today: NaiveDate) -> String {
    format!("transactions_{}.csv", today.format(CSV_DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LedgerSnapshot, Money};
    use crate::services::import::parse_csv;

    #[test]
    fn test_export_format() {
        let txns = vec![
            Transaction::deposit(
                Money::from_cents(350_000),
                "Salary",
                NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            ),
            Transaction::withdrawal(
                Money::from_cents(4_550),
                "Groceries, weekly",
                NaiveDate::from_ymd_opt(2025, 12, 3).unwrap(),
            ),
        ];

        let mut output = Vec::new();
        export_transactions_csv(&txns, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Date,Amount,Description,Type");
        assert_eq!(lines[1], "2025-12-01,3500.00,Salary,Deposit");
        assert_eq!(lines[2], "2025-12-03,-45.50,\"Groceries, weekly\",Withdrawal");
    }

    #[test]
    fn test_export_then_import_keeps_fields() {
        let snapshot = LedgerSnapshot::seeded();

        let mut output = Vec::new();
        export_transactions_csv(&snapshot.transactions, &mut output).unwrap();
        let import = parse_csv(&String::from_utf8(output).unwrap()).unwrap();

        assert_eq!(import.skipped, 0);
        assert_eq!(import.transactions.len(), snapshot.len());
        for (original, parsed) in snapshot.transactions.iter().zip(&import.transactions) {
            assert_eq!(parsed.kind, original.kind);
            assert_eq!(parsed.amount, original.amount);
            assert_eq!(parsed.description, original.description);
            assert_eq!(parsed.date, original.date);
        }
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let snapshot = LedgerSnapshot::seeded();

        export_transactions_csv_file(&snapshot.transactions, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 14);
    }

    #[test]
    fn test_default_filename() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 14).unwrap();
        assert_eq!(default_csv_filename(day), "transactions_2025-12-14.csv");
    }
}
