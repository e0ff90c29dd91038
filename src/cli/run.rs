use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, clean::clean, init::init},
};

/// Dispatch parsed arguments to the command handlers.
///
/// # Returns
/// - `Ok(CommandResult)` with the command summary and exit behavior
/// - `Err` if the command fails (e.g. invalid config, master locale missing, backup failure)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Clean(cmd)) => clean(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
