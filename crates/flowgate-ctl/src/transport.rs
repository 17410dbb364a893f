//! HTTP connection to the broker gateway.
//!
//! One POST per completion, no retries. Every way the round trip can go
//! wrong ends up as a [`CommandOutcome::Failed`]; nothing here panics or
//! returns a transport error to the caller.

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

use flowgate_core::config::{BrokerConfig, ConfigError};
use flowgate_core::wire::{BrokerReply, ReplyStatus};
use flowgate_core::{BrokerConnection, CommandOutcome, CompletionRequest, FailureKind};

/// Longest slice of an unexpected reply body echoed into a diagnostic.
const MAX_DETAIL_LEN: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("invalid broker address '{0}': {1}")]
    InvalidAddress(String, String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A gateway endpoint plus a configured HTTP client.
#[derive(Debug, Clone)]
pub struct HttpBroker {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBroker {
    /// Validate the address and build the client. No network I/O happens
    /// until the first send.
    pub fn connect(config: &BrokerConfig) -> Result<Self, ConnectError> {
        config.validate()?;
        let base_url = normalize_address(&config.address)?;
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        tracing::debug!(
            %base_url,
            request_timeout_secs = config.request_timeout_secs,
            "broker connection ready"
        );
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, request: &CompletionRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }
}

impl BrokerConnection for HttpBroker {
    async fn complete_job(&self, request: CompletionRequest) -> CommandOutcome {
        let url = self.url_for(&request);
        tracing::debug!(job_key = %request.key(), %url, "sending job completion");

        let resp = match self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(request.encode())
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return send_failure(&url, &e),
        };

        let status = resp.status();
        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(error = %e, %status, "reply body lost");
                return CommandOutcome::failed(
                    FailureKind::Unavailable,
                    format!("broker reply from {} was cut off: {}", url, e),
                );
            }
        };

        let outcome = outcome_from_reply(status, &body);
        tracing::debug!(%status, ?outcome, "broker replied");
        outcome
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Accepts `host:port` as well as full URLs; bare addresses get `http://`.
fn normalize_address(address: &str) -> Result<String, ConnectError> {
    let invalid = |reason: &str| ConnectError::InvalidAddress(address.to_string(), reason.to_string());

    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(invalid("address is empty"));
    }
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let url = reqwest::Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed"));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn send_failure(url: &str, e: &reqwest::Error) -> CommandOutcome {
    let detail = if e.is_timeout() {
        format!("no reply from {} within the request deadline", url)
    } else if e.is_connect() {
        format!("failed to connect to broker at {}, is it running?", url)
    } else {
        format!("request to {} failed: {}", url, e)
    };
    tracing::debug!(error = %e, "completion send failed");
    CommandOutcome::failed(FailureKind::Unavailable, detail)
}

/// Map an HTTP status and body to an outcome. The body decides when it is
/// a well-formed reply; the status code is only a fallback, and a fallback
/// never yields `Acknowledged`.
pub fn outcome_from_reply(status: StatusCode, body: &[u8]) -> CommandOutcome {
    if let Ok(reply) = serde_json::from_slice::<BrokerReply>(body) {
        let claims_success = reply.status == ReplyStatus::Acknowledged;
        if status.is_success() || !claims_success {
            return reply.into();
        }
    }

    let kind = if status == StatusCode::NOT_FOUND {
        FailureKind::NotFound
    } else if status == StatusCode::REQUEST_TIMEOUT || status == StatusCode::TOO_MANY_REQUESTS {
        FailureKind::Unavailable
    } else if status.is_client_error() {
        FailureKind::Rejected
    } else {
        FailureKind::Unavailable
    };

    let detail = if status.is_success() {
        format!("unreadable acknowledgement ({})", status)
    } else {
        match summarize_body(body) {
            Some(text) => format!("{}: {}", status, text),
            None => status.to_string(),
        }
    };
    CommandOutcome::failed(kind, detail)
}

fn summarize_body(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_DETAIL_LEN).collect())
}
