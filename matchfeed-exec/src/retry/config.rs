use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct RetryConfig {
    /// Total attempts allowed per fetch (initial + retries). `None` retries forever.
    pub max_attempts: Option<usize>,
    pub backoff: Backoff,
}

/// Extra wait added on top of the pacing delay before a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// Retry after the pacing delay alone.
    #[default]
    None,
    /// On HTTP 429, wait for `Retry-After` if the upstream sent one, else twice the pacing
    /// delay, capped at `max_delay`. Other failures retry without extra wait.
    RateLimited { max_delay: Duration },
}
