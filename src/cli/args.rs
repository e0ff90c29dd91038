//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Quick pass listing used and unused keys of the master locale
//! - `clean`: Full analysis, report, backup and interactive key removal
//! - `init`: Initialize the arbsweep configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Clean(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the analysis commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Master locale whose keys are analyzed (overrides config file)
    #[arg(long)]
    pub master_locale: Option<String>,

    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Directory holding the ARB files (overrides config file)
    #[arg(long)]
    pub l10n_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Exit with status 1 when unused keys are found
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// File listing the keys to remove, one per line (skips the strategy menu)
    #[arg(long)]
    pub keys_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub args: CleanArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Quickly list which translation keys are referenced in the source tree
    Check(CheckCommand),
    /// Analyze key usage, write a report, back up and remove unused keys
    Clean(CleanCommand),
    /// Initialize a new .arbsweeprc.json configuration file
    Init,
}
