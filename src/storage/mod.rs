//! Storage layer for Pocketbook
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod file_io;
pub mod ledger;
pub mod session;

pub use file_io::{read_json, write_json_atomic};
pub use ledger::LedgerRepository;
pub use session::SessionRepository;

use crate::config::paths::PocketbookPaths;
use crate::error::LedgerError;

/// Main storage coordinator that provides access to all repositories
#[derive(Debug, Clone)]
pub struct Storage {
    paths: PocketbookPaths,
    pub ledger: LedgerRepository,
    pub session: SessionRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: PocketbookPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerRepository::new(paths.ledger_file()),
            session: SessionRepository::new(paths.session_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &PocketbookPaths {
        &self.paths
    }

    /// Check if a ledger has ever been saved
    pub fn is_initialized(&self) -> bool {
        self.paths.ledger_file().exists()
    }
}
