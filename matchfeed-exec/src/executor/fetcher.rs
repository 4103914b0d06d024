use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::executor::classify::{classify_response, Classification};
use crate::executor::events::{EventSink, FetchEvent, NoOpEventSink};
use crate::executor::http::HttpClient;
use crate::executor::request::{prepare_target, FetchRequest, ResolvedOptions};
use crate::executor::result::{FetchError, FetchStatus, Fetched, RetryCause, UnavailableReason};
use crate::executor::types::FetcherConfig;
use crate::pool::ApiPool;
use crate::retry::{decide_retry, RetryDecision, RetryReason};
use crate::secrets::redact_url;

const BODY_PREVIEW_CHARS: usize = 512;

/// Fetches URLs with pacing, key/host rotation, response validation and retries.
///
/// One `Fetcher` is meant to be shared (`Arc<Fetcher>`) by every task issuing requests; it
/// holds no per-request state.
pub struct Fetcher {
    config: FetcherConfig,
    pool: Arc<ApiPool>,
    http: Arc<dyn HttpClient>,
    event_sink: Arc<dyn EventSink>,
}

impl Fetcher {
    pub fn new(config: FetcherConfig, pool: Arc<ApiPool>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            pool,
            http,
            event_sink: Arc::new(NoOpEventSink),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn pool(&self) -> &ApiPool {
        &self.pool
    }

    /// Fetch until the request succeeds, hits a terminal upstream state, or fails for good.
    ///
    /// Retries are invisible to the caller: only the final outcome is returned. With
    /// `no_retry` set, the first failing attempt is returned instead. Terminal upstream
    /// states (private match, unknown match id, ...) are `Ok` with
    /// [`FetchStatus::Unavailable`] and the raw envelope as `data`.
    pub async fn fetch(&self, request: impl Into<FetchRequest>) -> Result<Fetched, FetchError> {
        let request = request.into();
        let fetch_id = Uuid::new_v4();
        let span = tracing::info_span!("fetch", %fetch_id);
        self.run(fetch_id, &request).instrument(span).await
    }

    /// Run a fetch on the tokio runtime and hand the outcome to `on_complete` exactly once.
    pub fn spawn_fetch<F>(self: &Arc<Self>, request: impl Into<FetchRequest>, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Fetched, FetchError>) + Send + 'static,
    {
        let this = Arc::clone(self);
        let request = request.into();
        tokio::spawn(async move {
            let outcome = this.fetch(request).await;
            on_complete(outcome);
        })
    }

    async fn run(&self, fetch_id: Uuid, request: &FetchRequest) -> Result<Fetched, FetchError> {
        let opts = request.resolve(&self.config)?;
        let mut attempt_no = 0usize;
        let mut backoff = Duration::ZERO;

        loop {
            attempt_no += 1;
            let (cause, headers) = match self.attempt(fetch_id, attempt_no, request, &opts, backoff).await? {
                AttemptOutcome::Done(fetched) => return Ok(fetched),
                AttemptOutcome::Failed { cause, headers } => (cause, headers),
            };

            let decision = decide_retry(
                &self.config.retry,
                attempt_no,
                opts.no_retry,
                &cause,
                headers.as_ref(),
                opts.delay,
                SystemTime::now(),
            );
            match decision {
                RetryDecision::RetryAfter { delay, .. } => {
                    tracing::debug!(attempt = attempt_no, backoff_ms = delay.as_millis() as u64, "retry scheduled");
                    self.event_sink
                        .emit(FetchEvent::RetryScheduled {
                            fetch_id,
                            attempt_no,
                            backoff_ms: delay.as_millis() as u64,
                        })
                        .await;
                    backoff = delay;
                }
                RetryDecision::Stop { reason } => {
                    let err = match reason {
                        RetryReason::AttemptsExhausted => FetchError::AttemptsExhausted {
                            attempts: attempt_no,
                            last: cause,
                        },
                        _ => FetchError::from_cause(cause, attempt_no),
                    };
                    tracing::warn!(attempts = attempt_no, error = %err, "fetch failed");
                    self.event_sink
                        .emit(FetchEvent::Failed {
                            fetch_id,
                            attempts: attempt_no,
                            error: err.to_string(),
                        })
                        .await;
                    return Err(err);
                }
            }
        }
    }

    async fn attempt(
        &self,
        fetch_id: Uuid,
        attempt_no: usize,
        request: &FetchRequest,
        opts: &ResolvedOptions,
        backoff: Duration,
    ) -> Result<AttemptOutcome, FetchError> {
        let target = prepare_target(&self.pool, request.pick_url(), opts.proxy_affinity_range)?;
        let redacted = redact_url(&target.url);

        tracing::info!(attempt = attempt_no, target = %redacted, "fetching");
        self.event_sink
            .emit(FetchEvent::AttemptStarted {
                fetch_id,
                attempt_no,
                target: redacted.clone(),
            })
            .await;

        tokio::time::sleep(backoff.saturating_add(opts.delay)).await;

        let resp = match self
            .http
            .get(target.url, opts.timeout, self.config.max_response_bytes)
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(attempt = attempt_no, target = %redacted, error = %e, "request failed");
                let cause = RetryCause::Transport(e);
                self.emit_failed(fetch_id, attempt_no, None, &cause).await;
                return Ok(AttemptOutcome::Failed { cause, headers: None });
            }
        };

        match classify_response(&resp, target.steam_api) {
            Classification::Success(data) => {
                tracing::debug!(attempt = attempt_no, hostname = %target.hostname, "fetch succeeded");
                self.emit_completed(fetch_id, attempt_no, &target.hostname, None).await;
                Ok(AttemptOutcome::Done(Fetched {
                    data,
                    hostname: target.hostname,
                    status: FetchStatus::Ok,
                    attempts: attempt_no,
                }))
            }
            Classification::Unavailable { reason, body } => {
                tracing::info!(attempt = attempt_no, %reason, "match unavailable upstream, not retrying");
                self.emit_completed(fetch_id, attempt_no, &target.hostname, Some(reason)).await;
                Ok(AttemptOutcome::Done(Fetched {
                    data: body,
                    hostname: target.hostname,
                    status: FetchStatus::Unavailable(reason),
                    attempts: attempt_no,
                }))
            }
            Classification::Retryable(cause) => {
                tracing::warn!(
                    attempt = attempt_no,
                    status = resp.status,
                    target = %redacted,
                    body = %body_preview(&resp.body),
                    error = %cause,
                    "invalid response"
                );
                self.emit_failed(fetch_id, attempt_no, Some(resp.status), &cause).await;
                Ok(AttemptOutcome::Failed {
                    cause,
                    headers: Some(resp.headers),
                })
            }
        }
    }

    async fn emit_failed(&self, fetch_id: Uuid, attempt_no: usize, status: Option<u16>, cause: &RetryCause) {
        self.event_sink
            .emit(FetchEvent::AttemptFailed {
                fetch_id,
                attempt_no,
                status,
                reason: cause.to_string(),
            })
            .await;
    }

    async fn emit_completed(
        &self,
        fetch_id: Uuid,
        attempts: usize,
        hostname: &str,
        unavailable: Option<UnavailableReason>,
    ) {
        self.event_sink
            .emit(FetchEvent::Completed {
                fetch_id,
                attempts,
                hostname: hostname.to_string(),
                unavailable,
            })
            .await;
    }
}

enum AttemptOutcome {
    Done(Fetched),
    Failed {
        cause: RetryCause,
        headers: Option<BTreeMap<String, String>>,
    },
}

fn body_preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}
