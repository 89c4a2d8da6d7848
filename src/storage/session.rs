//! Session repository
//!
//! Keeps the pending undo record next to the ledger so that `pocketbook undo`
//! can reverse an action taken by a previous invocation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::models::LastAction;

use super::file_io::{read_json, remove_if_exists, write_json_atomic};

#[derive(Debug, Serialize, Deserialize)]
struct SessionData {
    last_action: LastAction,
}

/// Repository for the undo slot
#[derive(Debug, Clone)]
pub struct SessionRepository {
    path: PathBuf,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the pending undo record
    ///
    /// An unreadable session file is treated as "nothing to undo".
    pub fn load(&self) -> Option<LastAction> {
        match read_json::<SessionData, _>(&self.path) {
            Ok(data) => data.map(|d| d.last_action),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file: {}", e);
                None
            }
        }
    }

    /// Save the pending undo record; `None` clears it
    pub fn save(&self, last_action: Option<&LastAction>) -> Result<(), LedgerError> {
        match last_action {
            Some(action) => write_json_atomic(
                &self.path,
                &SessionData {
                    last_action: action.clone(),
                },
            ),
            None => remove_if_exists(&self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let repo = SessionRepository::new(temp_dir.path().join("session.json"));
        assert!(repo.load().is_none());

        let action = LastAction::Add {
            transaction: Transaction::withdrawal(
                Money::from_cents(999),
                "Lunch",
                NaiveDate::from_ymd_opt(2025, 12, 3).unwrap(),
            ),
            previous_balance: Money::from_cents(10_000),
        };
        repo.save(Some(&action)).unwrap();
        assert_eq!(repo.load(), Some(action));

        repo.save(None).unwrap();
        assert!(repo.load().is_none());
        assert!(!temp_dir.path().join("session.json").exists());
    }

    #[test]
    fn test_corrupt_session_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let repo = SessionRepository::new(path);
        assert!(repo.load().is_none());
    }
}
