#![doc(test(attr(deny(warnings))))]

//! Expense Tracker keeps two write-through transaction collections, expenses
//! and income, on top of a pluggable key-value store, and exposes totals,
//! balance, and category emoji for presentation layers.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{AddOutcome, DeleteOutcome, LedgerStore, PersistenceWarning};
pub use crate::errors::{LedgerError, Result};
pub use crate::ledger::{
    category_emoji, Category, Summary, TransactionKind, TransactionRecord, ValidationRejection,
};
pub use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore};

/// Installs the default tracing subscriber for embedders that do not run the shell.
pub fn init() {
    utils::init_tracing(None);
    tracing::debug!("Expense Tracker tracing initialized.");
}
