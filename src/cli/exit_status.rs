use std::process::ExitCode;

use super::commands::CommandResult;

/// Process exit status of `arbsweep`.
///
/// Cancelling the cleanup at any prompt is not a failure and exits 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command ran to completion or was cancelled by the user.
    Success,
    /// Command ran but its result fails the run (unused keys with `--strict`,
    /// existing config for `init`, locale files that could not be rewritten).
    Failure,
    /// Command could not run: bad config, master locale missing, backup failure.
    Error,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

impl From<&CommandResult> for ExitStatus {
    fn from(result: &CommandResult) -> Self {
        if result.exit_on_errors && result.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
