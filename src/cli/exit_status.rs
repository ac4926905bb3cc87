use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Catalog written, every input file extracted
/// - `Failure` (1): Catalog written, but some files could not be extracted
/// - `Error` (2): Nothing written (config error, unreadable stdin, `--throws` abort)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
