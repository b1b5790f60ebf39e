use std::io;

use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::cli::commands::{self, CommandSpec};
use crate::cli::output;
use crate::config::{Config, ConfigManager};
use crate::core::LedgerStore;
use crate::errors::LedgerError;
use crate::storage::JsonFileStore;
use crate::utils::init_tracing;

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Core(#[from] LedgerError),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("exit requested")]
    ExitRequested,
}

/// Session state shared by every command handler.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) store: LedgerStore,
    pub(crate) config: Config,
    pub(crate) running: bool,
}

impl ShellContext {
    /// Loads configuration, installs logging, and hydrates the ledger store.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        init_tracing(config.log_filter.as_deref());

        if mode == CliMode::Script {
            colored::control::set_override(false);
        }

        let backend = JsonFileStore::new(manager.storage_root(&config))?;
        let (store, report) = LedgerStore::open(Box::new(backend));
        for message in report.warnings() {
            output::warning(message);
        }

        Ok(Self::with_store(mode, store, config))
    }

    pub fn with_store(mode: CliMode, store: LedgerStore, config: Config) -> Self {
        Self {
            mode,
            store,
            config,
            running: true,
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn prompt(&self) -> String {
        let balance = crate::cli::format::format_amount(
            &self.config.currency_symbol,
            self.store.balance(),
        );
        format!("ledger [{balance}]> ")
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        commands::COMMANDS
            .iter()
            .flat_map(|spec| std::iter::once(spec.name).chain(spec.aliases.iter().copied()))
            .collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        match commands::lookup(command) {
            Some(spec) => match (spec.handler)(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            },
            None => {
                self.suggest_command(raw);
                Ok(LoopControl::Continue)
            }
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        let needle = input.to_ascii_lowercase();
        let best = commands::COMMANDS
            .iter()
            .map(|spec: &CommandSpec| (levenshtein(&needle, spec.name), spec.name))
            .min_by_key(|(distance, _)| *distance);

        match best {
            Some((distance, name)) if distance <= SUGGESTION_DISTANCE => {
                output::warning(format!(
                    "Unknown command `{input}`. Did you mean `{name}`?"
                ));
            }
            _ => output::warning(format!(
                "Unknown command `{input}`. Type `help` to see available commands."
            )),
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        output::error(err);
    }
}
