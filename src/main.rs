use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pocketbook::cli::{
    handle_config_command, handle_export_command, handle_import_command, handle_theme_command,
    handle_transaction_command, ExportArgs, ThemeChoice, TransactionCommands,
};
use pocketbook::config::{paths::DATA_DIR_ENV, PocketbookPaths, Settings};
use pocketbook::services::LedgerSession;
use pocketbook::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "POCKETBOOK_LOG";

#[derive(Parser)]
#[command(
    name = "pocketbook",
    version,
    about = "Personal finance ledger for the terminal",
    long_about = "Pocketbook records deposits and withdrawals against a running \
                  balance that can never go negative. Run it without a command \
                  to open the interactive interface."
)]
struct Cli {
    /// Directory holding settings and ledger data
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Import transactions from a CSV file
    Import {
        /// Path to a Date,Amount,Description,Type file
        file: PathBuf,
    },

    /// Export the ledger
    Export(ExportArgs),

    /// Show or change the color theme
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeChoice>,
    },

    /// Show current configuration and paths
    Config,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr for one-shot commands
fn init_cli_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Log to a file while the TUI owns the terminal
fn init_tui_logging(paths: &PocketbookPaths) -> Result<()> {
    let log_path = paths.log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => PocketbookPaths::with_base_dir(dir),
        None => PocketbookPaths::new()?,
    };
    paths.ensure_directories()?;

    let command = cli.command.unwrap_or(Commands::Tui);
    if matches!(command, Commands::Tui) {
        init_tui_logging(&paths)?;
    } else {
        init_cli_logging();
    }

    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match command {
        Commands::Tui => {
            let session = LedgerSession::open(storage);
            pocketbook::tui::run_tui(session, settings, &paths)?;
        }
        Commands::Transaction(cmd) => {
            let mut session = LedgerSession::open(storage);
            handle_transaction_command(&mut session, &settings, &paths, cmd)?;
        }
        Commands::Import { file } => {
            let mut session = LedgerSession::open(storage);
            handle_import_command(&mut session, &settings, &file)?;
        }
        Commands::Export(args) => {
            let session = LedgerSession::open(storage);
            handle_export_command(&session, args)?;
        }
        Commands::Theme { choice } => {
            handle_theme_command(&mut settings, &paths, choice)?;
        }
        Commands::Config => {
            handle_config_command(&settings, &paths)?;
        }
    }

    Ok(())
}
