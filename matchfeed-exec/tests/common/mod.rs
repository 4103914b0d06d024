#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use matchfeed_exec::executor::{EventSink, FetchEvent};
use matchfeed_exec::{ApiPool, FetcherConfig, HttpClient, HttpError, HttpResponse};
use url::Url;

/// Replays a fixed script of responses, then repeats `fallback` forever.
pub struct ScriptedHttpClient {
    script: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    fallback: Result<HttpResponse, HttpError>,
    seen: Mutex<Vec<Url>>,
}

impl ScriptedHttpClient {
    pub fn new(
        script: Vec<Result<HttpResponse, HttpError>>,
        fallback: Result<HttpResponse, HttpError>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn always(resp: HttpResponse) -> Self {
        Self::new(vec![], Ok(resp))
    }

    pub fn seen(&self) -> Vec<Url> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(
        &self,
        url: Url,
        _timeout: Duration,
        _max_response_bytes: usize,
    ) -> Result<HttpResponse, HttpError> {
        self.seen.lock().unwrap().push(url);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<FetchEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<FetchEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, event: FetchEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub const API_URL: &str =
    "http://api.steampowered.com/IDOTA2Match_570/GetMatchDetails/V001/?key=&match_id=42";

pub fn pool() -> Arc<ApiPool> {
    Arc::new(ApiPool::from_lists("SECRETKEY1,SECRETKEY2", "api.steampowered.com").unwrap())
}

pub fn config() -> FetcherConfig {
    FetcherConfig {
        default_delay: Duration::from_millis(100),
        ..Default::default()
    }
}

pub fn ok_match() -> HttpResponse {
    HttpResponse::json(200, &serde_json::json!({ "result": { "match_id": 42, "radiant_win": true } }))
}
