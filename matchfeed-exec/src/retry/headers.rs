use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use httpdate::parse_http_date;

/// Read how long the upstream asked us to back off via `Retry-After`.
///
/// Accepts delta seconds or an HTTP-date; the header name is matched case-insensitively.
/// Dates in the past and unparseable values yield `None`.
pub fn parse_retry_after(headers: &BTreeMap<String, String>, now: SystemTime) -> Option<Duration> {
    let value = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("retry-after"))
        .map(|(_, v)| v.trim())?;

    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    parse_http_date(value).ok()?.duration_since(now).ok()
}
