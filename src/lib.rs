//! Pocketbook - a personal finance ledger for the terminal
//!
//! This library provides the core functionality for the Pocketbook
//! application: a single running balance with the deposits and withdrawals
//! that produced it, kept consistent by a small set of validated operations
//! with single-level undo.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings, themes and locales
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, filters, undo records)
//! - `storage`: JSON file storage for the ledger and the pending undo
//! - `services`: Ledger operations, validation, page projection, CSV import
//!   and exchange rates
//! - `export`: CSV, JSON and YAML export
//! - `display`: Text formatting for the command line
//! - `cli`: Command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use pocketbook::models::{LedgerSnapshot, Money, Transaction};
//! use pocketbook::services::{LedgerSession, Operation};
//!
//! let mut session = LedgerSession::in_memory(LedgerSnapshot::with_balance(Money::zero()));
//! let salary = Transaction::deposit(Money::from_cents(350_000), "Salary", today);
//! session.dispatch(Operation::Add(salary))?;
//! session.dispatch(Operation::Undo)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{LedgerError, LedgerResult};
