use crate::cli::commands::COMMANDS;
use crate::cli::core::{CliMode, CommandError, ShellContext};
use crate::cli::output;
use crate::utils::build_info;

pub(crate) fn help(context: &mut ShellContext, _args: &[&str]) -> Result<(), CommandError> {
    output::section("Commands");
    let width = COMMANDS
        .iter()
        .map(|spec| spec.usage.len())
        .max()
        .unwrap_or(0);
    for spec in COMMANDS {
        output::line(format!("  {:<width$}  {}", spec.usage, spec.summary));
    }
    if context.mode == CliMode::Interactive {
        output::line("\nPress `?` or Tab to complete command names.");
    }
    Ok(())
}

pub(crate) fn version(_context: &mut ShellContext, _args: &[&str]) -> Result<(), CommandError> {
    output::line(build_info::current());
    Ok(())
}

pub(crate) fn exit(_context: &mut ShellContext, _args: &[&str]) -> Result<(), CommandError> {
    output::info("Goodbye.");
    Err(CommandError::ExitRequested)
}
