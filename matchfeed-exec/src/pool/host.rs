use std::fmt;

use url::Url;

use crate::pool::PoolError;

/// One Steam Web API endpoint (the real API host or a proxy in front of it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiHost {
    pub host: String,
    pub port: Option<u16>,
}

impl ApiHost {
    pub fn new(host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ApiHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{port}", self.host),
            None => f.write_str(&self.host),
        }
    }
}

/// Parse a comma-separated host list.
///
/// Each entry is `name[:port][?size=N]`. `size` weights the entry by repeating it N times in the
/// selection list; a missing or zero size counts as 1. Order is preserved so that affinity
/// ranges keep addressing the leading entries.
pub fn parse_host_list(list: &str) -> Result<Vec<ApiHost>, PoolError> {
    let mut out = Vec::new();
    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (host, weight) = parse_host_entry(entry)?;
        out.extend(std::iter::repeat(host).take(weight));
    }
    Ok(out)
}

fn parse_host_entry(entry: &str) -> Result<(ApiHost, usize), PoolError> {
    let invalid = || PoolError::InvalidHost(entry.to_string());

    let parsed = Url::parse(&format!("http://{entry}")).map_err(|_| invalid())?;
    if parsed.path() != "/" || !parsed.username().is_empty() {
        return Err(invalid());
    }
    let host = parsed.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;

    let weight = match parsed.query_pairs().find(|(k, _)| k == "size") {
        Some((_, v)) => v.parse::<usize>().map_err(|_| invalid())?.max(1),
        None => 1,
    };

    Ok((ApiHost::new(host, parsed.port()), weight))
}
