//! CSV import
//!
//! Parses `Date,Amount,Description,Type` text into transactions. The header
//! row is skipped. Rows that cannot be used are dropped and counted instead of
//! failing the whole import.

use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionType};

/// Date format used in CSV files
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of parsing a CSV file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvImport {
    /// Transactions in file order
    pub transactions: Vec<Transaction>,
    /// Number of data rows that were dropped
    pub skipped: usize,
}

impl CsvImport {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Parse CSV text
///
/// Fails only when the text has no data rows at all (fewer than two non-empty
/// lines). A row is dropped when any of its four fields is missing or blank,
/// when the amount is not a number or is zero, or when the date is not
/// `YYYY-MM-DD`. The amount's sign is ignored; the type is a deposit when it
/// reads "deposit" in any case and a withdrawal otherwise.
pub fn parse_csv(text: &str) -> LedgerResult<CsvImport> {
    if text.lines().filter(|l| !l.trim().is_empty()).count() < 2 {
        return Err(LedgerError::Import("Invalid CSV file".into()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut import = CsvImport::default();

    for (row, record) in reader.records().enumerate() {
        let parsed = record
            .map_err(|e| e.to_string())
            .and_then(|record| parse_record(&record));

        match parsed {
            Ok(transaction) => import.transactions.push(transaction),
            Err(reason) => {
                tracing::debug!(row = row + 1, "Skipping CSV row: {}", reason);
                import.skipped += 1;
            }
        }
    }

    Ok(import)
}

/// Read and parse a CSV file
pub fn parse_csv_file<P: AsRef<Path>>(path: P) -> LedgerResult<CsvImport> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| LedgerError::Import(format!("Cannot read {}: {}", path.display(), e)))?;

    let import = parse_csv(&text)?;
    tracing::info!(
        parsed = import.transactions.len(),
        skipped = import.skipped,
        "Parsed {}",
        path.display()
    );
    Ok(import)
}

fn parse_record(record: &StringRecord) -> Result<Transaction, String> {
    let field = |i: usize| {
        record
            .get(i)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("missing field {}", i + 1))
    };

    let date_str = field(0)?;
    let amount_str = field(1)?;
    let description = field(2)?;
    let type_str = field(3)?;

    let amount = Money::parse(amount_str)
        .map_err(|e| e.to_string())?
        .abs();
    if amount.is_zero() {
        return Err("zero amount".into());
    }

    let date = NaiveDate::parse_from_str(date_str, CSV_DATE_FORMAT)
        .map_err(|e| format!("bad date '{}': {}", date_str, e))?;

    let kind = if type_str.eq_ignore_ascii_case("deposit") {
        TransactionType::Deposit
    } else {
        TransactionType::Withdrawal
    };

    Ok(Transaction::new(kind, amount, description, date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic() {
        let text = "Date,Amount,Description,Type\n\
                    2025-12-01,3500.00,Salary,Deposit\n\
                    2025-12-02,-89.99,Amazon Order,Withdrawal\n";

        let import = parse_csv(text).unwrap();
        assert_eq!(import.skipped, 0);
        assert_eq!(import.transactions.len(), 2);

        let salary = &import.transactions[0];
        assert_eq!(salary.kind, TransactionType::Deposit);
        assert_eq!(salary.amount, Money::from_cents(350_000));
        assert_eq!(salary.date, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());

        let order = &import.transactions[1];
        assert_eq!(order.kind, TransactionType::Withdrawal);
        assert_eq!(order.amount, Money::from_cents(8_999));
        assert_eq!(order.description, "Amazon Order");
    }

    #[test]
    fn test_type_is_case_insensitive_and_defaults_to_withdrawal() {
        let text = "Date,Amount,Description,Type\n\
                    2025-12-01,10,A,DEPOSIT\n\
                    2025-12-01,10,B,refund\n";

        let import = parse_csv(text).unwrap();
        assert_eq!(import.transactions[0].kind, TransactionType::Deposit);
        assert_eq!(import.transactions[1].kind, TransactionType::Withdrawal);
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let text = "Date,Amount,Description,Type\n\
                    2025-12-01,abc,Bad amount,Deposit\n\
                    2025-12-01,10\n\
                    2025-12-01,10,,Deposit\n\
                    not-a-date,10,Bad date,Deposit\n\
                    2025-12-05, 12.50 , Lunch ,Withdrawal\n";

        let import = parse_csv(text).unwrap();
        assert_eq!(import.skipped, 4);
        assert_eq!(import.transactions.len(), 1);
        assert_eq!(import.transactions[0].description, "Lunch");
        assert_eq!(import.transactions[0].amount, Money::from_cents(1_250));
    }

    #[test]
    fn test_header_only_is_invalid() {
        let err = parse_csv("Date,Amount,Description,Type\n\n").unwrap_err();
        assert_eq!(err.to_string(), "Import error: Invalid CSV file");
        assert!(parse_csv("").is_err());
    }

    #[test]
    fn test_no_valid_rows_is_empty_not_error() {
        let import = parse_csv("Date,Amount,Description,Type\nx,y,z,w\n").unwrap();
        assert!(import.is_empty());
        assert_eq!(import.skipped, 1);
    }

    #[test]
    fn test_quoted_description() {
        let text = "Date,Amount,Description,Type\n\
                    2025-12-01,5.00,\"Coffee, large\",Withdrawal\n";
        let import = parse_csv(text).unwrap();
        assert_eq!(import.transactions[0].description, "Coffee, large");
    }

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Date,Amount,Description,Type").unwrap();
        writeln!(file, "2025-12-10,500,Freelance Payment,Deposit").unwrap();

        let import = parse_csv_file(file.path()).unwrap();
        assert_eq!(import.transactions.len(), 1);

        assert!(parse_csv_file("/definitely/not/here.csv").is_err());
    }
}
