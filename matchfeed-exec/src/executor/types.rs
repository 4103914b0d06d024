use std::time::Duration;

use crate::retry::RetryConfig;

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Pacing delay applied before every attempt unless a request overrides it.
    pub default_delay: Duration,
    pub default_timeout: Duration,
    pub max_response_bytes: usize,
    pub retry: RetryConfig,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            default_delay: Duration::from_millis(1000),
            default_timeout: Duration::from_millis(5000),
            max_response_bytes: 64 * 1024 * 1024,
            retry: RetryConfig::default(),
        }
    }
}
