use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// Job payload: a JSON or YAML file, plus `key=value` overrides.
#[derive(Debug, Args, Clone)]
pub struct PayloadArgs {
    #[arg(long)]
    pub payload: Option<PathBuf>,
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set_fields: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ApiArgs {
    /// Comma-separated Steam Web API keys.
    #[arg(long = "api-key", env = "STEAM_API_KEY", hide_env_values = true)]
    pub api_keys: Option<String>,
    /// Comma-separated API hosts, each `name[:port][?size=N]`.
    #[arg(long = "api-host", env = "STEAM_API_HOST", default_value = "api.steampowered.com")]
    pub api_hosts: String,
    /// Pacing delay before every attempt, in milliseconds.
    #[arg(long, env = "DEFAULT_DELAY", default_value_t = 1000)]
    pub delay: u64,
}

#[derive(Debug, Args, Clone)]
pub struct FetchArgs {
    /// Per-attempt network timeout, in milliseconds.
    #[arg(long, default_value_t = 5000)]
    pub timeout: u64,
    #[arg(long)]
    pub proxy_affinity_range: Option<usize>,
    #[arg(long)]
    pub no_retry: bool,
    /// Give up after this many attempts. Unbounded when unset.
    #[arg(long)]
    pub max_attempts: Option<usize>,
    /// Back off on HTTP 429 (Retry-After or twice the delay), capped at this many milliseconds.
    #[arg(long, value_name = "MAX_MS")]
    pub rate_limit_backoff: Option<u64>,
    #[arg(long, default_value_t = 64 * 1024 * 1024)]
    pub max_response_bytes: usize,
    /// Stream fetch events to stdout as JSON lines.
    #[arg(long)]
    pub events: bool,
    /// Include request/retry counters in the result.
    #[arg(long)]
    pub metrics: bool,
}
