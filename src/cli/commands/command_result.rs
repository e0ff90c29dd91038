use std::path::PathBuf;

use crate::cli::exit_status::ExitStatus;
use crate::core::{Occurrence, RemovalReport, resources::LoadWarning};

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Clean(CleanSummary),
    Init(InitSummary),
}

/// Quick-check result for one master key.
#[derive(Debug)]
pub struct KeyCheck {
    pub key: String,
    pub value: String,
    /// First source line referencing the key, if any.
    pub first_usage: Option<Occurrence>,
}

impl KeyCheck {
    pub fn is_used(&self) -> bool {
        self.first_usage.is_some()
    }
}

#[derive(Debug)]
pub struct CheckSummary {
    pub master_locale: String,
    /// Entries in master file order.
    pub keys: Vec<KeyCheck>,
    pub source_files_checked: usize,
    pub strict: bool,
}

impl CheckSummary {
    pub fn unused(&self) -> impl Iterator<Item = &KeyCheck> {
        self.keys.iter().filter(|k| !k.is_used())
    }

    pub fn unused_count(&self) -> usize {
        self.unused().count()
    }
}

/// Prompt at which the cleanup stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelPoint {
    Proceed,
    Strategy,
    Confirmation,
    FinalConfirmation,
}

#[derive(Debug)]
pub enum CleanOutcome {
    /// Every key is used; nothing was backed up or changed.
    NothingToClean,
    /// The selected strategy matched no keys.
    NoKeysSelected,
    /// User chose to review the report and rerun with a key list.
    ManualReview,
    Cancelled(CancelPoint),
    Applied(RemovalReport),
}

#[derive(Debug)]
pub struct CleanSummary {
    pub outcome: CleanOutcome,
    pub report_path: PathBuf,
    pub backup_dir: Option<PathBuf>,
    pub l10n_dir: PathBuf,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running arbsweep commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit status 1 is returned when error_count > 0.
    /// If false, always exit 0 (e.g. `check` without `--strict`).
    pub exit_on_errors: bool,
    /// Locale files that could not be loaded.
    pub load_warnings: Vec<LoadWarning>,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::from(self)
    }
}
