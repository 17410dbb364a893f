//! Completion payloads: the structured result a job hands back to its
//! workflow instance.
//!
//! The codec validates, it never repairs. Top-level shape is left to the
//! broker, which knows the workflow's variable schema.
//!
//! serde_json is built with `arbitrary_precision` and `preserve_order`:
//! numbers keep their exact lexeme and objects keep their key order, so the
//! wire form differs from the operator's text only in insignificant
//! whitespace and string escapes.

use bytes::Bytes;
use serde_json::Value;

/// Payload used when the operator passes no `--payload`.
pub const EMPTY_JSON_OBJECT: &str = "{}";

/// A validated JSON document plus the exact text the operator supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    raw: String,
    document: Value,
    wire: Bytes,
}

impl Payload {
    /// The text exactly as supplied, for the audit line.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Canonical compact encoding sent to the broker. Number text and key
    /// order are those of [`Payload::raw`].
    pub fn to_wire(&self) -> Bytes {
        self.wire.clone()
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self {
            raw: EMPTY_JSON_OBJECT.to_string(),
            document: Value::Object(serde_json::Map::new()),
            wire: Bytes::from_static(EMPTY_JSON_OBJECT.as_bytes()),
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("invalid payload '{raw}': {source} (line {line}, column {column})")]
    Invalid {
        raw: String,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl PayloadError {
    pub fn raw(&self) -> &str {
        match self {
            PayloadError::Invalid { raw, .. } => raw,
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Validate `input` as a JSON document. `None` means the flag was not
/// given and behaves exactly like `"{}"`.
pub fn parse_payload(input: Option<&str>) -> Result<Payload, PayloadError> {
    let raw = input.unwrap_or(EMPTY_JSON_OBJECT);

    let document: Value = serde_json::from_str(raw).map_err(|e| PayloadError::Invalid {
        raw: raw.to_string(),
        line: e.line(),
        column: e.column(),
        source: e,
    })?;

    // Display for Value is the compact encoding and cannot fail.
    let wire = Bytes::from(document.to_string());

    Ok(Payload {
        raw: raw.to_string(),
        document,
        wire,
    })
}
