//! Process exit codes. Scripts branch on these, so the values are fixed.

use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The broker acknowledged the command.
    Success = 0,
    /// Anything that is neither bad input nor a broker failure.
    GeneralError = 1,
    /// Bad arguments, payload, config file or broker address. Nothing was sent.
    ConfigurationError = 2,
    /// The send failed: broker unreachable, job not found, or rejected.
    IoError = 3,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
