//! Service layer for Pocketbook
//!
//! The service layer holds the ledger logic on top of the models and storage:
//! balance validation, the state machine, the visible-page projection, CSV
//! parsing and exchange rate lookup.

pub mod exchange_rate;
pub mod import;
pub mod ledger;
pub mod projection;
pub mod validation;

pub use exchange_rate::{ExchangeRateService, HttpRateSource, RateQuote, RateSource};
pub use import::{parse_csv, parse_csv_file, CsvImport};
pub use ledger::{apply, LedgerSession, LedgerState, Operation};
pub use projection::{clamp_page, project, Page, DEFAULT_PAGE_SIZE};
pub use validation::{compute_import_delta, validate_add, validate_update};
