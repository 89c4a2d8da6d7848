//! Ledger repository for JSON storage
//!
//! Persists the whole `{balance, transactions}` snapshot as the single value
//! of `ledger.json`. Saves replace the file wholesale; loads replace the
//! in-memory snapshot wholesale.

use std::path::PathBuf;

use crate::error::LedgerError;
use crate::models::LedgerSnapshot;

use super::file_io::{read_json, write_json_atomic};

/// Repository for the ledger snapshot
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    path: PathBuf,
}

impl LedgerRepository {
    /// Create a new ledger repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the saved snapshot, if any
    ///
    /// Returns `Ok(None)` when nothing has been saved yet and an error when
    /// the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<LedgerSnapshot>, LedgerError> {
        read_json(&self.path)
    }

    /// Load the saved snapshot, treating a corrupt file like a missing one
    ///
    /// `None` means the caller should start from `LedgerSnapshot::seeded()`.
    pub fn load_saved(&self) -> Option<LedgerSnapshot> {
        match self.load() {
            Ok(Some(snapshot)) => {
                tracing::debug!(
                    transactions = snapshot.len(),
                    "Loaded ledger from {}",
                    self.path.display()
                );
                Some(snapshot)
            }
            Ok(None) => {
                tracing::debug!("No saved ledger, using sample data");
                None
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable ledger file: {}", e);
                None
            }
        }
    }

    /// Save the snapshot, replacing whatever was stored
    pub fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), LedgerError> {
        write_json_atomic(&self.path, snapshot)
    }
}
