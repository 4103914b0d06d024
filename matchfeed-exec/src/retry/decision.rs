use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use crate::executor::RetryCause;
use crate::retry::config::{Backoff, RetryConfig};
use crate::retry::headers::parse_retry_after;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter { delay: Duration, reason: RetryReason },
    Stop { reason: RetryReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    NoRetryRequested,
    AttemptsExhausted,
    Immediate,
    RetryAfterHeader,
    RateLimited,
}

/// Decide whether a failed attempt is retried and how long to wait beyond the pacing delay.
///
/// - `attempt_no`: 1-based number of the attempt that just failed.
/// - `no_retry`: the caller asked for the first failure verbatim.
/// - `cause`: why the attempt failed; only HTTP 429 is treated specially.
/// - `response_headers`: headers of the failed response, if one arrived.
/// - `pacing`: the pacing delay the next attempt will sleep anyway.
/// - `now`: time source for HTTP-date retry-after values.
pub fn decide_retry(
    cfg: &RetryConfig,
    attempt_no: usize,
    no_retry: bool,
    cause: &RetryCause,
    response_headers: Option<&BTreeMap<String, String>>,
    pacing: Duration,
    now: SystemTime,
) -> RetryDecision {
    if no_retry {
        return RetryDecision::Stop {
            reason: RetryReason::NoRetryRequested,
        };
    }

    if let Some(max) = cfg.max_attempts {
        if attempt_no >= max.max(1) {
            return RetryDecision::Stop {
                reason: RetryReason::AttemptsExhausted,
            };
        }
    }

    let Backoff::RateLimited { max_delay } = cfg.backoff else {
        return immediate();
    };
    if !matches!(cause, RetryCause::Status(429)) {
        return immediate();
    }

    // Retry-After header wins.
    if let Some(h) = response_headers {
        if let Some(delay) = parse_retry_after(h, now) {
            return RetryDecision::RetryAfter {
                delay: clamp(delay, max_delay),
                reason: RetryReason::RetryAfterHeader,
            };
        }
    }

    RetryDecision::RetryAfter {
        delay: clamp(pacing.saturating_mul(2), max_delay),
        reason: RetryReason::RateLimited,
    }
}

fn immediate() -> RetryDecision {
    RetryDecision::RetryAfter {
        delay: Duration::ZERO,
        reason: RetryReason::Immediate,
    }
}

fn clamp(delay: Duration, max: Duration) -> Duration {
    if delay > max { max } else { delay }
}
