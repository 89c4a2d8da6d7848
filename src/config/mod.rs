//! Configuration module for Pocketbook
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence (theme, locale, paging, exchange rates)
//! - Locale presets for formatting

pub mod locale;
pub mod paths;
pub mod settings;

pub use locale::LocaleConfig;
pub use paths::PocketbookPaths;
pub use settings::{Settings, Theme};
