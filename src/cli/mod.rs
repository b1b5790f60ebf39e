//! Line-oriented shell that drives the ledger store.

pub mod commands;
pub mod core;
pub mod format;
pub mod output;
mod shell;

pub use shell::{run_cli, SCRIPT_ENV};
