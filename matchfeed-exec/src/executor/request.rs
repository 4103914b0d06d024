use std::time::Duration;

use matchfeed_core::STEAM_API_HOST;
use url::Url;

use crate::executor::result::FetchError;
use crate::executor::types::FetcherConfig;
use crate::pool::ApiPool;
use crate::secrets::KEY_PARAM;

/// What to fetch: one URL, interchangeable mirrors, or a URL with per-request options.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Single(String),
    /// Equivalent URLs; each attempt picks one uniformly at random.
    Alternatives(Vec<String>),
    Config(FetchConfig),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchConfig {
    pub url: String,
    /// Pacing delay before each attempt. Defaults to the fetcher's configured delay.
    pub delay: Option<Duration>,
    /// Restrict host selection to the first N configured API hosts.
    pub proxy_affinity_range: Option<usize>,
    /// Per-attempt network timeout. Defaults to the fetcher's timeout (5s).
    pub timeout: Option<Duration>,
    /// Report the first failure instead of retrying.
    pub no_retry: bool,
}

impl FetchConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn proxy_affinity_range(mut self, range: usize) -> Self {
        self.proxy_affinity_range = Some(range);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn no_retry(mut self) -> Self {
        self.no_retry = true;
        self
    }
}

impl From<&str> for FetchRequest {
    fn from(url: &str) -> Self {
        FetchRequest::Single(url.to_string())
    }
}

impl From<String> for FetchRequest {
    fn from(url: String) -> Self {
        FetchRequest::Single(url)
    }
}

impl From<Vec<String>> for FetchRequest {
    fn from(urls: Vec<String>) -> Self {
        FetchRequest::Alternatives(urls)
    }
}

impl From<FetchConfig> for FetchRequest {
    fn from(cfg: FetchConfig) -> Self {
        FetchRequest::Config(cfg)
    }
}

/// Per-request options with fetcher defaults filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedOptions {
    pub delay: Duration,
    pub timeout: Duration,
    pub proxy_affinity_range: Option<usize>,
    pub no_retry: bool,
}

impl FetchRequest {
    pub(crate) fn resolve(&self, cfg: &FetcherConfig) -> Result<ResolvedOptions, FetchError> {
        let mut opts = ResolvedOptions {
            delay: cfg.default_delay,
            timeout: cfg.default_timeout,
            proxy_affinity_range: None,
            no_retry: false,
        };
        match self {
            FetchRequest::Alternatives(urls) if urls.is_empty() => {
                return Err(FetchError::InvalidRequest("no URL alternatives given".to_string()));
            }
            FetchRequest::Config(c) => {
                opts.delay = c.delay.unwrap_or(opts.delay);
                opts.timeout = c.timeout.unwrap_or(opts.timeout);
                opts.proxy_affinity_range = c.proxy_affinity_range;
                opts.no_retry = c.no_retry;
            }
            _ => {}
        }
        Ok(opts)
    }

    /// The URL for one attempt. Alternatives are re-drawn on every call.
    pub(crate) fn pick_url(&self) -> &str {
        match self {
            FetchRequest::Single(url) => url,
            FetchRequest::Alternatives(urls) => {
                // `resolve` rejects empty lists before any attempt is made.
                urls.get(fastrand::usize(..urls.len().max(1)))
                    .map(String::as_str)
                    .unwrap_or_default()
            }
            FetchRequest::Config(c) => &c.url,
        }
    }
}

/// The concrete URL an attempt is sent to.
#[derive(Debug, Clone)]
pub(crate) struct PreparedTarget {
    pub url: Url,
    pub hostname: String,
    pub steam_api: bool,
}

/// Parse the URL and, for Steam Web API URLs, attach a pooled key and a pooled host.
pub(crate) fn prepare_target(
    pool: &ApiPool,
    raw: &str,
    proxy_affinity_range: Option<usize>,
) -> Result<PreparedTarget, FetchError> {
    let mut url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;

    let steam_api = url.host_str() == Some(STEAM_API_HOST);
    if !steam_api {
        let hostname = host_with_port(&url);
        return Ok(PreparedTarget {
            url,
            hostname,
            steam_api,
        });
    }

    set_key(&mut url, pool.pick_key().expose());

    let host = pool.pick_host(proxy_affinity_range);
    let invalid = |message: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        message,
    };
    url.set_host(Some(&host.host))
        .map_err(|e| invalid(format!("cannot use API host {host}: {e}")))?;
    url.set_port(host.port)
        .map_err(|_| invalid(format!("cannot use API port for {host}")))?;

    Ok(PreparedTarget {
        url,
        hostname: host.to_string(),
        steam_api,
    })
}

/// Set the credential parameter, dropping any value already there. It goes first in the query.
fn set_key(url: &mut Url, key: &str) {
    let rest = url
        .query_pairs()
        .filter(|(k, _)| k != KEY_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect::<Vec<_>>();

    let mut qp = url.query_pairs_mut();
    qp.clear();
    qp.append_pair(KEY_PARAM, key);
    for (k, v) in &rest {
        qp.append_pair(k, v);
    }
}

fn host_with_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
