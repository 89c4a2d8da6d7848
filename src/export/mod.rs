//! Export module for Pocketbook
//!
//! Provides ledger export in multiple formats:
//! - CSV: transactions only, readable by the importer
//! - JSON: machine-readable full ledger export
//! - YAML: human-readable full ledger export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{
    default_csv_filename, export_transactions_csv, export_transactions_csv_file, CSV_HEADER,
};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
