//! Dialog modules for the TUI

pub mod confirm;
pub mod filter;
pub mod help;
pub mod import;
pub mod transaction;
