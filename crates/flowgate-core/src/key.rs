//! Job keys: the broker's cluster-wide 64-bit job identifiers.
//!
//! Keys travel as plain decimal text on the command line and as a JSON
//! number on the wire. Only bare ASCII digits are accepted: no sign, no
//! whitespace, no separators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix used for every key parse failure, so operators see which
/// argument was wrong.
const KEY_ERR_CTX: &str = "Expect job key as only positional argument, got";

/// Canonical 64-bit job key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobKey(u64);

impl JobKey {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for JobKey {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("{} '{0}': key is empty", KEY_ERR_CTX)]
    Empty(String),
    #[error("{} '{0}': key must contain only decimal digits", KEY_ERR_CTX)]
    NotDecimal(String),
    #[error("{} '{0}': key exceeds the 64-bit range", KEY_ERR_CTX)]
    OutOfRange(String),
}

impl KeyError {
    /// The raw argument that failed to parse.
    pub fn raw(&self) -> &str {
        match self {
            KeyError::Empty(raw) | KeyError::NotDecimal(raw) | KeyError::OutOfRange(raw) => raw,
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse the command's positional argument into a [`JobKey`].
///
/// `u64::from_str` alone would accept a leading `+`, so the digit check
/// runs first.
pub fn parse_key(input: &str) -> Result<JobKey, KeyError> {
    if input.is_empty() {
        return Err(KeyError::Empty(input.to_string()));
    }
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(KeyError::NotDecimal(input.to_string()));
    }
    input
        .parse::<u64>()
        .map(JobKey)
        .map_err(|_| KeyError::OutOfRange(input.to_string()))
}
