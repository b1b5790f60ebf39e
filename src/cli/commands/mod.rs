pub mod system;
pub mod transaction;

use crate::cli::core::{CommandError, ShellContext};
use crate::ledger::TransactionKind;

pub(crate) type CommandHandler = fn(&mut ShellContext, &[&str]) -> Result<(), CommandError>;

/// Static description of a shell command.
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub summary: &'static str,
    pub(crate) handler: CommandHandler,
}

pub(crate) const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "add",
        aliases: &[],
        usage: "add <expense|income> <description> <amount> [category] [YYYY-MM-DD]",
        summary: "Record a new transaction",
        handler: transaction::add,
    },
    CommandSpec {
        name: "delete",
        aliases: &["rm"],
        usage: "delete <expense|income> <id>",
        summary: "Remove a transaction by id",
        handler: transaction::delete,
    },
    CommandSpec {
        name: "list",
        aliases: &["ls"],
        usage: "list [expense|income]",
        summary: "Show recorded transactions, newest first",
        handler: transaction::list,
    },
    CommandSpec {
        name: "summary",
        aliases: &[],
        usage: "summary",
        summary: "Show total income, expenses, and balance",
        handler: transaction::summary,
    },
    CommandSpec {
        name: "categories",
        aliases: &[],
        usage: "categories [expense|income]",
        summary: "List the categories available per kind",
        handler: transaction::categories,
    },
    CommandSpec {
        name: "version",
        aliases: &[],
        usage: "version",
        summary: "Show build information",
        handler: system::version,
    },
    CommandSpec {
        name: "help",
        aliases: &["?"],
        usage: "help",
        summary: "List available commands",
        handler: system::help,
    },
    CommandSpec {
        name: "exit",
        aliases: &["quit"],
        usage: "exit",
        summary: "Leave the shell",
        handler: system::exit,
    },
];

pub(crate) fn lookup(command: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|spec| spec.name == command || spec.aliases.contains(&command))
}

pub(crate) fn parse_kind(raw: &str) -> Result<TransactionKind, CommandError> {
    raw.parse().map_err(CommandError::InvalidArguments)
}

/// Kinds selected by an optional filter argument; both when absent.
pub(crate) fn kinds_filter(args: &[&str]) -> Result<Vec<TransactionKind>, CommandError> {
    match args.first() {
        Some(raw) => Ok(vec![parse_kind(raw)?]),
        None => Ok(TransactionKind::ALL.to_vec()),
    }
}

pub(crate) fn usage_error(command: &str) -> CommandError {
    let usage = lookup(command).map(|spec| spec.usage).unwrap_or(command);
    CommandError::InvalidArguments(format!("Usage: {usage}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_commands() {
        assert_eq!(lookup("rm").map(|spec| spec.name), Some("delete"));
        assert_eq!(lookup("quit").map(|spec| spec.name), Some("exit"));
        assert!(lookup("remove").is_none());
    }

    #[test]
    fn kinds_filter_defaults_to_both() {
        assert_eq!(kinds_filter(&[]).unwrap(), TransactionKind::ALL.to_vec());
        assert_eq!(
            kinds_filter(&["income"]).unwrap(),
            vec![TransactionKind::Income]
        );
        assert!(kinds_filter(&["transfer"]).is_err());
    }
}
