//! Operator-facing output and the exit status that goes with it.
//!
//! Confirmations go to stdout so scripts can capture them; diagnostics go
//! to stderr.

use std::io::{self, Stderr, Stdout, Write};

use flowgate_core::config::ConfigError;
use flowgate_core::{CommandOutcome, FailureKind, JobKey, KeyError, PayloadError};

use crate::exit::ExitStatus;
use crate::transport::ConnectError;

/// Everything that stops a command before anything is sent.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Connect(#[from] ConnectError),
}

pub fn confirmation(key: JobKey, raw_payload: &str) -> String {
    format!("Completed job with key {} and payload {}", key, raw_payload)
}

pub fn diagnostic(kind: FailureKind, key: JobKey, detail: Option<&str>) -> String {
    let summary = match kind {
        FailureKind::NotFound => "no completable job with this key",
        FailureKind::Unavailable => "broker unavailable",
        FailureKind::Rejected => "broker rejected the completion",
    };
    match detail {
        Some(detail) => format!(
            "Failed to complete job with key {} ({}): {}: {}",
            key, kind, summary, detail
        ),
        None => format!("Failed to complete job with key {} ({}): {}", key, kind, summary),
    }
}

/// Writes confirmations to `out` and diagnostics to `err`.
///
/// The binary uses [`Reporter::stdio`]; tests hand in buffers to see the
/// exact lines an operator would.
pub struct Reporter<O, E> {
    out: O,
    err: E,
}

impl Reporter<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Print the result of a send. Success is reported only for an
    /// explicit acknowledgement.
    pub fn report(&mut self, outcome: &CommandOutcome, key: JobKey, raw_payload: &str) -> ExitStatus {
        match outcome {
            CommandOutcome::Acknowledged => {
                tracing::info!(job_key = %key, "job completed");
                // A closed stdout must not turn an applied completion into a failure.
                if let Err(e) = writeln!(self.out, "{}", confirmation(key, raw_payload)) {
                    tracing::warn!(error = %e, "could not write confirmation");
                }
                ExitStatus::Success
            }
            CommandOutcome::Failed { kind, detail } => {
                tracing::debug!(job_key = %key, %kind, "job completion failed");
                let _ = writeln!(self.err, "{}", diagnostic(*kind, key, detail.as_deref()));
                ExitStatus::IoError
            }
        }
    }

    pub fn input_error(&mut self, err: &InputError) -> ExitStatus {
        let _ = writeln!(self.err, "error: {}", err);
        ExitStatus::ConfigurationError
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}
