use std::time::Duration;

use async_trait::async_trait;
use configs::AuditConfig;
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::event::AuditEvent;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to build audit request: {0}")]
    Request(String),
    #[error("audit transport error: {0}")]
    Transport(String),
    #[error("audit sink answered with status {0}")]
    Status(u16),
}

/// Delivers one audit event. A single attempt; callers decide what a failure means.
#[async_trait]
pub trait AuditEmitter: Send + Sync {
    async fn emit(&self, event: AuditEvent) -> Result<(), AuditError>;
}

/// Posts events as JSON to the log service endpoint.
///
/// Unless `require_success_status` is set, any HTTP response counts as
/// delivered and the body is never read.
#[derive(Clone)]
pub struct HttpAuditEmitter {
    client: Client,
    endpoint: Url,
    require_success_status: bool,
}

impl HttpAuditEmitter {
    pub fn new(cfg: &AuditConfig) -> Result<Self, AuditError> {
        Self::with_options(&cfg.endpoint, Duration::from_millis(cfg.timeout_ms), cfg.require_success_status)
    }

    pub fn with_options(endpoint: &str, timeout: Duration, require_success_status: bool) -> Result<Self, AuditError> {
        let endpoint = Url::parse(endpoint).map_err(|e| AuditError::Request(format!("invalid endpoint {endpoint}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuditError::Request(e.to_string()))?;
        Ok(Self { client, endpoint, require_success_status })
    }

    pub fn endpoint(&self) -> &Url { &self.endpoint }
}

#[async_trait]
impl AuditEmitter for HttpAuditEmitter {
    #[instrument(skip(self, event), fields(category = %event.name, endpoint = %self.endpoint))]
    async fn emit(&self, event: AuditEvent) -> Result<(), AuditError> {
        let resp = self.client
            .post(self.endpoint.clone())
            .json(&event)
            .send()
            .await
            .map_err(|e| {
                let err = if e.is_builder() {
                    AuditError::Request(e.to_string())
                } else {
                    AuditError::Transport(e.to_string())
                };
                warn!(error = %err, "audit_delivery_failed");
                err
            })?;

        let status = resp.status();
        if self.require_success_status && !status.is_success() {
            warn!(status = status.as_u16(), "audit_sink_rejected_event");
            return Err(AuditError::Status(status.as_u16()));
        }
        debug!(status = status.as_u16(), "audit_delivered");
        Ok(())
    }
}

/// In-memory emitters for tests, benches and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Records every event it is given; fails every call when built with [`RecordingAuditEmitter::failing`].
    #[derive(Default)]
    pub struct RecordingAuditEmitter {
        events: Mutex<Vec<AuditEvent>>,
        fail: bool,
    }

    impl RecordingAuditEmitter {
        pub fn failing() -> Self {
            Self { events: Mutex::new(Vec::new()), fail: true }
        }

        pub fn events(&self) -> Vec<AuditEvent> {
            self.events.lock().map(|e| e.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl AuditEmitter for RecordingAuditEmitter {
        async fn emit(&self, event: AuditEvent) -> Result<(), AuditError> {
            if self.fail {
                return Err(AuditError::Transport("connection refused".into()));
            }
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_endpoint() {
        let err = HttpAuditEmitter::with_options("not a url", Duration::from_secs(1), false).err().unwrap();
        assert!(matches!(err, AuditError::Request(_)));
    }

    #[test]
    fn builds_from_config() {
        let emitter = HttpAuditEmitter::new(&AuditConfig::default()).unwrap();
        assert_eq!(emitter.endpoint().as_str(), "http://localhost:8083/log");
    }
}
