//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod import;
pub mod settings;
pub mod transaction;

pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use import::handle_import_command;
pub use settings::{handle_config_command, handle_theme_command, ThemeChoice};
pub use transaction::{handle_transaction_command, TransactionCommands};
