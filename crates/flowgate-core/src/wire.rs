//! Wire contract with the broker's HTTP gateway.
//!
//! Request:  `POST {address}/v1/jobs/{key}/completion`
//!           body `{"jobKey": <u64>, "payload": <json>}`
//! Response: `{"status": "acknowledged" | "not_found" | "unavailable" | "rejected",
//!             "detail": <string | null>}`

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::key::JobKey;
use crate::outcome::{CommandOutcome, FailureKind};

/// Path of the completion endpoint for `key`, relative to the gateway root.
pub fn completion_path(key: JobKey) -> String {
    format!("/v1/jobs/{}/completion", key)
}

/// Decoded completion request body. The client encodes with
/// [`encode_body`]; this type is what the gateway side reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteJobBody {
    pub job_key: JobKey,
    pub payload: serde_json::Value,
}

/// Encode a completion body around an already-canonical payload encoding.
/// `payload_wire` must be a complete JSON document.
pub fn encode_body(key: JobKey, payload_wire: &[u8]) -> Bytes {
    let key = key.to_string();
    let mut buf = BytesMut::with_capacity(22 + key.len() + payload_wire.len());
    buf.put_slice(b"{\"jobKey\":");
    buf.put_slice(key.as_bytes());
    buf.put_slice(b",\"payload\":");
    buf.put_slice(payload_wire);
    buf.put_u8(b'}');
    buf.freeze()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    Acknowledged,
    NotFound,
    Unavailable,
    Rejected,
}

/// Gateway reply to a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerReply {
    pub status: ReplyStatus,
    #[serde(default)]
    pub detail: Option<String>,
}

impl BrokerReply {
    pub fn acknowledged() -> Self {
        Self {
            status: ReplyStatus::Acknowledged,
            detail: None,
        }
    }

    pub fn failed(status: ReplyStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: Some(detail.into()),
        }
    }
}

impl From<BrokerReply> for CommandOutcome {
    fn from(reply: BrokerReply) -> Self {
        let kind = match reply.status {
            ReplyStatus::Acknowledged => return CommandOutcome::Acknowledged,
            ReplyStatus::NotFound => FailureKind::NotFound,
            ReplyStatus::Unavailable => FailureKind::Unavailable,
            ReplyStatus::Rejected => FailureKind::Rejected,
        };
        CommandOutcome::Failed {
            kind,
            detail: reply.detail,
        }
    }
}
