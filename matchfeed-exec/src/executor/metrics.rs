use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::executor::events::{EventSink, FetchEvent};

/// Counters across every fetch that went through one sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchMetrics {
    pub http_requests: usize,
    pub http_errors: usize,
    pub retries: usize,
    pub succeeded: usize,
    pub unavailable: usize,
    pub failed: usize,
}

impl FetchMetrics {
    pub fn record(&mut self, event: &FetchEvent) {
        match event {
            FetchEvent::AttemptStarted { .. } => self.http_requests += 1,
            FetchEvent::AttemptFailed { .. } => self.http_errors += 1,
            FetchEvent::RetryScheduled { .. } => self.retries += 1,
            FetchEvent::Completed { unavailable: Some(_), .. } => self.unavailable += 1,
            FetchEvent::Completed { .. } => self.succeeded += 1,
            FetchEvent::Failed { .. } => self.failed += 1,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "fetches": {
                "succeeded": self.succeeded,
                "unavailable": self.unavailable,
                "failed": self.failed,
            },
            "http": {
                "requests": self.http_requests,
                "errors": self.http_errors,
            },
            "retries": self.retries,
        })
    }
}

#[derive(Default)]
pub struct MetricsCollector {
    metrics: Mutex<FetchMetrics>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, event: &FetchEvent) {
        self.metrics.lock().await.record(event);
    }

    pub async fn get_metrics(&self) -> FetchMetrics {
        self.metrics.lock().await.clone()
    }
}

/// Counts events into a [`MetricsCollector`] and forwards them to `base`.
pub struct MetricsEventSink {
    collector: Arc<MetricsCollector>,
    base: Arc<dyn EventSink>,
}

impl MetricsEventSink {
    pub fn new(collector: Arc<MetricsCollector>, base: Arc<dyn EventSink>) -> Self {
        Self { collector, base }
    }
}

#[async_trait]
impl EventSink for MetricsEventSink {
    async fn emit(&self, event: FetchEvent) {
        self.collector.record(&event).await;
        self.base.emit(event).await;
    }
}
