//! CLI command for data export
//!
//! Writes the ledger as CSV (transactions only) or as a full JSON/YAML export.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::{Args, ValueEnum};

use crate::error::{LedgerError, LedgerResult};
use crate::export::{csv, json, yaml};
use crate::models::LedgerSnapshot;
use crate::services::LedgerSession;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (transactions only, re-importable)
    Csv,
    /// JSON format (full ledger)
    Json,
    /// YAML format (full ledger, human-readable)
    Yaml,
}

impl ExportFormat {
    fn default_filename(self) -> String {
        let today = Local::now().date_naive();
        match self {
            Self::Csv => csv::default_csv_filename(today),
            Self::Json => format!("ledger_{}.json", today.format("%Y-%m-%d")),
            Self::Yaml => format!("ledger_{}.yaml", today.format("%Y-%m-%d")),
        }
    }
}

/// Arguments of `pocketbook export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file path ("-" for stdout); defaults to a dated file name
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export_command(session: &LedgerSession, args: ExportArgs) -> LedgerResult<()> {
    let ledger = &session.state().ledger;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(args.format.default_filename()));

    if output.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        write_export(ledger, args.format, args.pretty, &mut writer)?;
        return writer
            .flush()
            .map_err(|e| LedgerError::Export(e.to_string()));
    }

    let file = File::create(&output).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write_export(ledger, args.format, args.pretty, &mut writer)?;
    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    tracing::info!(format = ?args.format, "Exported ledger to {}", output.display());
    match args.format {
        ExportFormat::Csv => println!(
            "Exported {} transactions to: {}",
            ledger.len(),
            output.display()
        ),
        ExportFormat::Json | ExportFormat::Yaml => {
            println!("Full ledger exported to: {}", output.display())
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    ledger: &LedgerSnapshot,
    format: ExportFormat,
    pretty: bool,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        ExportFormat::Csv => csv::export_transactions_csv(&ledger.transactions, writer),
        ExportFormat::Json => json::export_full_json(ledger, writer, pretty),
        ExportFormat::Yaml => yaml::export_full_yaml(ledger, writer),
    }
}
