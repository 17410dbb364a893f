//! Outcome of a single completion send.

use std::fmt;

/// Why the broker did not apply a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No completable job exists under the key: already completed, timed
    /// out and handed to another worker, or never existed.
    NotFound,
    /// The broker could not be reached or did not answer within the
    /// deadline. Also used when the send is cancelled locally.
    Unavailable,
    /// The broker understood the request and refused it.
    Rejected,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::NotFound => "not found",
            FailureKind::Unavailable => "unavailable",
            FailureKind::Rejected => "rejected",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of sending one completion. There is no "maybe": a dropped or
/// unreadable reply is a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Acknowledged,
    Failed {
        kind: FailureKind,
        detail: Option<String>,
    },
}

impl CommandOutcome {
    pub fn failed(kind: FailureKind, detail: impl Into<String>) -> Self {
        CommandOutcome::Failed {
            kind,
            detail: Some(detail.into()),
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        matches!(self, CommandOutcome::Acknowledged)
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            CommandOutcome::Acknowledged => None,
            CommandOutcome::Failed { kind, .. } => Some(*kind),
        }
    }
}
