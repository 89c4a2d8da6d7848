//! Terminal User Interface for Pocketbook
//!
//! A single-screen ledger built with ratatui: balance panel, filter bar,
//! transaction register and status bar, plus modal dialogs for entry,
//! filtering, import, confirmation and help.

pub mod app;
pub mod dialogs;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
