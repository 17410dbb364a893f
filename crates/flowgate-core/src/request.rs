//! Completion requests and the connection seam they are sent through.

use std::future::Future;

use bytes::Bytes;

use crate::key::JobKey;
use crate::outcome::CommandOutcome;
use crate::payload::Payload;
use crate::wire;

/// One job key paired with one payload. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    key: JobKey,
    payload: Payload,
}

impl CompletionRequest {
    /// Both inputs are already validated by their codecs.
    pub fn build(key: JobKey, payload: Payload) -> Self {
        Self { key, payload }
    }

    pub fn key(&self) -> JobKey {
        self.key
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Gateway path this request is posted to.
    pub fn path(&self) -> String {
        wire::completion_path(self.key)
    }

    /// Request body in wire form.
    pub fn encode(&self) -> Bytes {
        wire::encode_body(self.key, &self.payload.to_wire())
    }

    /// Hand the request to `conn` and wait for the broker's verdict.
    pub async fn send<C: BrokerConnection>(self, conn: &C) -> CommandOutcome {
        conn.complete_job(self).await
    }
}

/// A live connection to exactly one broker endpoint.
///
/// Implementations make a single attempt per call and fold every
/// transport-level problem into [`CommandOutcome::Failed`].
pub trait BrokerConnection {
    fn complete_job(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = CommandOutcome> + Send;
}
