use std::sync::Arc;
use std::time::Duration;

use matchfeed_exec::executor::MetricsCollector;
use matchfeed_exec::{FetchConfig, FetchError, FetchRequest, FetchStatus, Fetched};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::config::{build_fetcher, targets_steam_api};
use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::{ApiArgs, FetchArgs, OutputArgs};

#[derive(Serialize)]
pub(crate) struct FetchResult {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    pub hostname: String,
    pub attempts: usize,
    pub data: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<JsonValue>,
}

impl FetchResult {
    pub(crate) async fn new(fetched: Fetched, metrics: Option<&Arc<MetricsCollector>>) -> Self {
        let (status, reason) = match fetched.status {
            FetchStatus::Ok => ("ok", None),
            FetchStatus::Unavailable(r) => ("unavailable", Some(r.as_str())),
        };
        let metrics = match metrics {
            Some(m) => Some(m.get_metrics().await.to_json()),
            None => None,
        };
        Self {
            status,
            reason,
            hostname: fetched.hostname,
            attempts: fetched.attempts,
            data: fetched.data,
            metrics,
        }
    }
}

pub async fn fetch_cmd(
    url: String,
    alternatives: Vec<String>,
    api: ApiArgs,
    fetch: FetchArgs,
    output: OutputArgs,
) -> i32 {
    let needs_key = targets_steam_api(&url) || alternatives.iter().any(|u| targets_steam_api(u));
    let request = if alternatives.is_empty() {
        FetchRequest::Config(fetch_config(url, &fetch))
    } else {
        let mut urls = vec![url];
        urls.extend(alternatives);
        FetchRequest::Alternatives(urls)
    };
    run_fetch(request, &api, &fetch, &output, needs_key).await
}

pub(crate) fn fetch_config(url: String, fetch: &FetchArgs) -> FetchConfig {
    let mut cfg = FetchConfig::new(url).timeout(Duration::from_millis(fetch.timeout));
    if let Some(range) = fetch.proxy_affinity_range {
        cfg = cfg.proxy_affinity_range(range);
    }
    if fetch.no_retry {
        cfg = cfg.no_retry();
    }
    cfg
}

pub(crate) async fn run_fetch(
    request: FetchRequest,
    api: &ApiArgs,
    fetch: &FetchArgs,
    output: &OutputArgs,
    needs_key: bool,
) -> i32 {
    match execute(request, api, fetch, needs_key).await {
        Ok(result) => {
            print_result(output.format, output.quiet, &result);
            exit_codes::SUCCESS
        }
        Err((code, message)) => {
            print_error(output.format, output.quiet, &message);
            code
        }
    }
}

pub(crate) async fn execute(
    request: FetchRequest,
    api: &ApiArgs,
    fetch: &FetchArgs,
    needs_key: bool,
) -> Result<FetchResult, (i32, String)> {
    let setup = build_fetcher(api, fetch, needs_key).map_err(|e| (exit_codes::RUNTIME_ERROR, e))?;
    match setup.fetcher.fetch(request).await {
        Ok(fetched) => Ok(FetchResult::new(fetched, setup.metrics.as_ref()).await),
        Err(e) => Err((exit_code_for(&e), e.to_string())),
    }
}

fn exit_code_for(err: &FetchError) -> i32 {
    match err {
        FetchError::InvalidRequest(_) | FetchError::InvalidUrl { .. } => exit_codes::VALIDATION_FAILED,
        _ => exit_codes::FETCH_FAILED,
    }
}
