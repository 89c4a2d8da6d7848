//! User settings for Pocketbook
//!
//! Manages user preferences: color theme, locale, the foreign display
//! currency, page size and exchange-rate lookup parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::locale::{LocaleConfig, DEFAULT_LOCALE};
use super::paths::PocketbookPaths;
use crate::error::LedgerError;

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The opposite theme
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Check for the dark theme
    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("Unknown theme '{}'. Use light or dark", other)),
        }
    }
}

/// User settings for Pocketbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Color theme
    #[serde(default)]
    pub theme: Theme,

    /// Locale code used for formatting
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Currency the balance is additionally shown in
    #[serde(default = "default_display_currency")]
    pub display_currency: String,

    /// Transactions per page in list views
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Base URL of the exchange rate API (the base currency code is appended)
    #[serde(default = "default_exchange_rate_url")]
    pub exchange_rate_url: String,

    /// How long a fetched rate is considered fresh
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_display_currency() -> String {
    "KES".to_string()
}

fn default_page_size() -> usize {
    20
}

fn default_exchange_rate_url() -> String {
    "https://open.er-api.com/v6/latest".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    5 * 60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            theme: Theme::default(),
            locale: default_locale(),
            display_currency: default_display_currency(),
            page_size: default_page_size(),
            exchange_rate_url: default_exchange_rate_url(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl Settings {
    /// Resolved locale formatting rules
    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::resolve(&self.locale)
    }

    /// Page size, never zero
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PocketbookPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PocketbookPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
