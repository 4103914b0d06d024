use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::executor::result::UnavailableReason;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    AttemptStarted {
        fetch_id: Uuid,
        attempt_no: usize,
        /// Target URL with the credential redacted.
        target: String,
    },
    AttemptFailed {
        fetch_id: Uuid,
        attempt_no: usize,
        status: Option<u16>,
        reason: String,
    },
    RetryScheduled {
        fetch_id: Uuid,
        attempt_no: usize,
        backoff_ms: u64,
    },
    Completed {
        fetch_id: Uuid,
        attempts: usize,
        hostname: String,
        unavailable: Option<UnavailableReason>,
    },
    Failed {
        fetch_id: Uuid,
        attempts: usize,
        error: String,
    },
}

impl FetchEvent {
    pub fn fetch_id(&self) -> Uuid {
        match self {
            FetchEvent::AttemptStarted { fetch_id, .. }
            | FetchEvent::AttemptFailed { fetch_id, .. }
            | FetchEvent::RetryScheduled { fetch_id, .. }
            | FetchEvent::Completed { fetch_id, .. }
            | FetchEvent::Failed { fetch_id, .. } => *fetch_id,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FetchEvent::AttemptStarted { fetch_id, attempt_no, target } => {
                json!({ "type": "attempt.started", "fetch_id": fetch_id.to_string(), "attempt_no": attempt_no, "target": target })
            }
            FetchEvent::AttemptFailed { fetch_id, attempt_no, status, reason } => {
                json!({ "type": "attempt.failed", "fetch_id": fetch_id.to_string(), "attempt_no": attempt_no, "status": status, "reason": reason })
            }
            FetchEvent::RetryScheduled { fetch_id, attempt_no, backoff_ms } => {
                json!({ "type": "retry.scheduled", "fetch_id": fetch_id.to_string(), "attempt_no": attempt_no, "backoff_ms": backoff_ms })
            }
            FetchEvent::Completed { fetch_id, attempts, hostname, unavailable } => {
                json!({ "type": "fetch.completed", "fetch_id": fetch_id.to_string(), "attempts": attempts, "hostname": hostname, "unavailable": unavailable.map(|r| r.as_str()) })
            }
            FetchEvent::Failed { fetch_id, attempts, error } => {
                json!({ "type": "fetch.failed", "fetch_id": fetch_id.to_string(), "attempts": attempts, "error": error })
            }
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: FetchEvent);
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: FetchEvent) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// Writes one JSON object per event to stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: FetchEvent) {
        println!("{}", serde_json::to_string(&event.to_json()).unwrap_or_default());
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: FetchEvent) {}
}
