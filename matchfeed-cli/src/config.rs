use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use matchfeed_core::STEAM_API_HOST;
use matchfeed_exec::executor::{
    EventSink, MetricsCollector, MetricsEventSink, NoOpEventSink, StdoutEventSink,
};
use matchfeed_exec::pool::parse_host_list;
use matchfeed_exec::retry::{Backoff, RetryConfig};
use matchfeed_exec::secrets::parse_key_list;
use matchfeed_exec::{ApiKey, ApiPool, Fetcher, FetcherConfig, ReqwestHttpClient};
use serde_json::Value as JsonValue;

use crate::{ApiArgs, FetchArgs, PayloadArgs};

/// Read the job payload (JSON first, then YAML) and apply `--set` overrides.
///
/// No file and no overrides yields `null`, which every payload-less job accepts.
pub fn load_payload(args: &PayloadArgs) -> Result<JsonValue, String> {
    let mut payload = match &args.payload {
        Some(path) => Some(read_payload_file(path)?),
        None => None,
    };
    merge_set_fields(&mut payload, &args.set_fields)?;
    Ok(payload.unwrap_or(JsonValue::Null))
}

fn read_payload_file(path: &Path) -> Result<JsonValue, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read payload {}: {e}", path.display()))?;
    if let Ok(v) = serde_json::from_str(&content) {
        return Ok(v);
    }
    if let Ok(v) = serde_yaml::from_str(&content) {
        return Ok(v);
    }
    Err(format!("payload {} is neither valid JSON nor YAML", path.display()))
}

pub fn merge_set_fields(payload: &mut Option<JsonValue>, set_fields: &[String]) -> Result<(), String> {
    if set_fields.is_empty() {
        return Ok(());
    }
    let obj = payload.get_or_insert_with(|| serde_json::json!({}));
    let Some(map) = obj.as_object_mut() else {
        return Err("--set needs the payload to be an object".to_string());
    };
    for s in set_fields {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| format!("--set expects KEY=VALUE, got {s:?}"))?;
        map.insert(k.trim().to_string(), JsonValue::String(v.to_string()));
    }
    Ok(())
}

/// Build the key/host pool.
///
/// Keys are only mandatory when a URL targets the Steam Web API; other URLs are fetched
/// as-is and never carry a key.
pub fn build_pool(api: &ApiArgs, needs_key: bool) -> Result<ApiPool, String> {
    let mut keys = api.api_keys.as_deref().map(parse_key_list).unwrap_or_default();
    if keys.is_empty() {
        if needs_key {
            return Err("no Steam API key configured. Set --api-key or STEAM_API_KEY".to_string());
        }
        keys.push(ApiKey::new(String::new()));
    }
    let hosts = parse_host_list(&api.api_hosts).map_err(|e| e.to_string())?;
    ApiPool::new(keys, hosts).map_err(|e| e.to_string())
}

pub fn build_fetcher_config(api: &ApiArgs, fetch: &FetchArgs) -> FetcherConfig {
    FetcherConfig {
        default_delay: Duration::from_millis(api.delay),
        default_timeout: Duration::from_millis(fetch.timeout),
        max_response_bytes: fetch.max_response_bytes,
        retry: RetryConfig {
            max_attempts: fetch.max_attempts,
            backoff: match fetch.rate_limit_backoff {
                Some(max_ms) => Backoff::RateLimited {
                    max_delay: Duration::from_millis(max_ms),
                },
                None => Backoff::None,
            },
        },
    }
}

pub fn targets_steam_api(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|u| u.host_str() == Some(STEAM_API_HOST))
}

pub struct FetchSetup {
    pub fetcher: Fetcher,
    pub metrics: Option<Arc<MetricsCollector>>,
}

pub fn build_fetcher(api: &ApiArgs, fetch: &FetchArgs, needs_key: bool) -> Result<FetchSetup, String> {
    let pool = build_pool(api, needs_key)?;
    let http = ReqwestHttpClient::new().map_err(|e| e.to_string())?;

    let mut sink: Arc<dyn EventSink> = if fetch.events {
        Arc::new(StdoutEventSink)
    } else {
        Arc::new(NoOpEventSink)
    };
    let metrics = fetch.metrics.then(|| Arc::new(MetricsCollector::new()));
    if let Some(collector) = &metrics {
        sink = Arc::new(MetricsEventSink::new(collector.clone(), sink));
    }

    let fetcher = Fetcher::new(
        build_fetcher_config(api, fetch),
        Arc::new(pool),
        Arc::new(http),
    )
    .with_event_sink(sink);
    Ok(FetchSetup { fetcher, metrics })
}
