//! flowgate-core: job keys, payloads, completion requests and the wire
//! contract shared with the broker gateway.
//! Nothing in this crate performs I/O except config loading.

pub mod config;
pub mod key;
pub mod outcome;
pub mod payload;
pub mod request;
pub mod wire;

pub use key::{parse_key, JobKey, KeyError};
pub use outcome::{CommandOutcome, FailureKind};
pub use payload::{parse_payload, Payload, PayloadError, EMPTY_JSON_OBJECT};
pub use request::{BrokerConnection, CompletionRequest};
