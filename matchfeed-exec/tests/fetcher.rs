mod common;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{config, ok_match, pool, RecordingSink, ScriptedHttpClient, API_URL};
use matchfeed_exec::executor::{FetchEvent, MetricsCollector, MetricsEventSink, NoOpEventSink};
use matchfeed_exec::retry::{Backoff, RetryConfig};
use matchfeed_exec::{
    ApiPool, FetchConfig, FetchError, FetchRequest, FetchStatus, Fetcher, FetcherConfig,
    HttpError, HttpResponse, ReqwestHttpClient, UnavailableReason,
};
use serde_json::json;
use tokio::time::Instant;

fn fetcher(http: &Arc<ScriptedHttpClient>) -> Fetcher {
    Fetcher::new(config(), pool(), http.clone())
}

#[tokio::test(start_paused = true)]
async fn upstream_error_is_retried_until_clean_envelope() {
    let http = Arc::new(ScriptedHttpClient::new(
        vec![Ok(HttpResponse::json(200, &json!({ "result": { "error": "Failed to get match details" } })))],
        Ok(ok_match()),
    ));

    let fetched = fetcher(&http).fetch(API_URL).await.unwrap();

    assert_eq!(fetched.status, FetchStatus::Ok);
    assert_eq!(fetched.attempts, 2);
    assert_eq!(fetched.data["result"]["match_id"], 42);
    assert_eq!(fetched.hostname, "api.steampowered.com");
    assert_eq!(http.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn transport_and_shape_failures_are_retried() {
    let http = Arc::new(ScriptedHttpClient::new(
        vec![
            Err(HttpError::Timeout),
            Ok(HttpResponse::new(502, "bad gateway")),
            Ok(HttpResponse::new(200, "")),
            Ok(HttpResponse::json(200, &json!({ "something": "else" }))),
            Ok(HttpResponse::json(200, &json!({ "result": { "status": 2 } }))),
        ],
        Ok(ok_match()),
    ));

    let fetched = fetcher(&http).fetch(API_URL).await.unwrap();
    assert_eq!(fetched.attempts, 6);
}

#[tokio::test(start_paused = true)]
async fn private_match_is_returned_after_one_attempt() {
    let body = json!({ "result": { "status": 15 } });
    let http = Arc::new(ScriptedHttpClient::always(HttpResponse::json(200, &body)));

    let fetched = fetcher(&http).fetch(API_URL).await.unwrap();

    assert_eq!(fetched.status, FetchStatus::Unavailable(UnavailableReason::PrivateMatch));
    assert!(fetched.is_unavailable());
    assert_eq!(fetched.data, body);
    assert_eq!(http.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn match_not_found_is_terminal() {
    let body = json!({ "result": { "error": "Match ID not found" } });
    let http = Arc::new(ScriptedHttpClient::always(HttpResponse::json(200, &body)));

    let fetched = fetcher(&http).fetch(API_URL).await.unwrap();

    assert_eq!(fetched.status, FetchStatus::Unavailable(UnavailableReason::MatchNotFound));
    assert_eq!(http.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn no_retry_reports_first_failure() {
    let http = Arc::new(ScriptedHttpClient::always(HttpResponse::new(500, "boom")));

    let err = fetcher(&http)
        .fetch(FetchConfig::new(API_URL).no_retry())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::InvalidResponse { attempts: 1, .. }), "{err:?}");
    assert_eq!(http.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn no_retry_upstream_error_is_invalid_data() {
    let http = Arc::new(ScriptedHttpClient::always(HttpResponse::json(
        200,
        &json!({ "result": { "error": "Failed to get match details" } }),
    )));

    let err = fetcher(&http)
        .fetch(FetchConfig::new(API_URL).no_retry())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::InvalidData { attempts: 1, .. }), "{err:?}");
}

#[tokio::test(start_paused = true)]
async fn no_retry_transport_error_is_transport() {
    let http = Arc::new(ScriptedHttpClient::new(vec![], Err(HttpError::Network("refused".into()))));

    let err = fetcher(&http)
        .fetch(FetchConfig::new(API_URL).no_retry())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport { attempts: 1, .. }), "{err:?}");
    assert_eq!(err.attempts(), Some(1));
}

#[tokio::test(start_paused = true)]
async fn max_attempts_bounds_retries() {
    let http = Arc::new(ScriptedHttpClient::always(HttpResponse::new(503, "")));
    let cfg = FetcherConfig {
        retry: RetryConfig {
            max_attempts: Some(4),
            ..Default::default()
        },
        ..config()
    };

    let err = Fetcher::new(cfg, pool(), http.clone()).fetch(API_URL).await.unwrap_err();

    assert!(matches!(err, FetchError::AttemptsExhausted { attempts: 4, .. }), "{err:?}");
    assert_eq!(http.calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn pacing_delay_precedes_every_attempt() {
    let http = Arc::new(ScriptedHttpClient::new(
        vec![Ok(HttpResponse::new(500, "")), Ok(HttpResponse::new(500, ""))],
        Ok(ok_match()),
    ));

    let started = Instant::now();
    fetcher(&http)
        .fetch(FetchConfig::new(API_URL).delay(Duration::from_millis(250)))
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_millis(750));
    assert!(started.elapsed() < Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn rate_limited_backoff_honours_retry_after() {
    let http = Arc::new(ScriptedHttpClient::new(
        vec![Ok(HttpResponse::new(429, "").with_header("Retry-After", "3"))],
        Ok(ok_match()),
    ));
    let cfg = FetcherConfig {
        default_delay: Duration::ZERO,
        retry: RetryConfig {
            backoff: Backoff::RateLimited { max_delay: Duration::from_secs(60) },
            ..Default::default()
        },
        ..Default::default()
    };

    let started = Instant::now();
    let fetched = Fetcher::new(cfg, pool(), http.clone()).fetch(API_URL).await.unwrap();

    assert_eq!(fetched.attempts, 2);
    assert!(started.elapsed() >= Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn key_and_host_are_taken_from_pool() {
    let pool = Arc::new(ApiPool::from_lists("SECRETKEY", "proxy.internal:8080").unwrap());
    let http = Arc::new(ScriptedHttpClient::always(ok_match()));
    let url = "http://api.steampowered.com/IDOTA2Match_570/GetMatchDetails/V001/?key=stale&match_id=42";

    let fetched = Fetcher::new(config(), pool, http.clone()).fetch(url).await.unwrap();

    let sent = &http.seen()[0];
    assert_eq!(sent.host_str(), Some("proxy.internal"));
    assert_eq!(sent.port(), Some(8080));
    assert_eq!(sent.path(), "/IDOTA2Match_570/GetMatchDetails/V001/");
    assert_eq!(sent.query(), Some("key=SECRETKEY&match_id=42"));
    assert_eq!(fetched.hostname, "proxy.internal:8080");
}

#[tokio::test(start_paused = true)]
async fn proxy_affinity_range_limits_hosts() {
    let pool = Arc::new(ApiPool::from_lists("k", "h0.local,h1.local,h2.local,h3.local,h4.local").unwrap());
    let http = Arc::new(ScriptedHttpClient::always(ok_match()));
    let f = Fetcher::new(config(), pool, http.clone());

    for _ in 0..100 {
        f.fetch(FetchConfig::new(API_URL).proxy_affinity_range(2)).await.unwrap();
    }

    for url in http.seen() {
        let host = url.host_str().unwrap().to_string();
        assert!(host == "h0.local" || host == "h1.local", "{host}");
    }
}

#[tokio::test(start_paused = true)]
async fn other_hosts_are_fetched_verbatim() {
    let http = Arc::new(ScriptedHttpClient::always(HttpResponse::new(200, "replay-index")));
    let url = "http://replay123.valve.net/570/42_99.dem.bz2";

    let fetched = fetcher(&http).fetch(url).await.unwrap();

    assert_eq!(http.seen()[0].as_str(), url);
    assert_eq!(fetched.data, json!("replay-index"));
    assert_eq!(fetched.hostname, "replay123.valve.net");
}

#[tokio::test(start_paused = true)]
async fn alternatives_are_drawn_uniformly() {
    let http = Arc::new(ScriptedHttpClient::always(HttpResponse::json(200, &json!({ "ok": true }))));
    let f = Fetcher::new(
        FetcherConfig {
            default_delay: Duration::ZERO,
            ..Default::default()
        },
        pool(),
        http.clone(),
    );
    let urls = vec![
        "http://mirror-a.local/x".to_string(),
        "http://mirror-b.local/x".to_string(),
        "http://mirror-c.local/x".to_string(),
    ];

    for _ in 0..900 {
        f.fetch(urls.clone()).await.unwrap();
    }

    let mut counts = BTreeMap::new();
    for url in http.seen() {
        *counts.entry(url.host_str().unwrap().to_string()).or_insert(0usize) += 1;
    }
    assert_eq!(counts.len(), 3);
    for (host, n) in counts {
        assert!((200..400).contains(&n), "{host}: {n}");
    }
}

#[tokio::test(start_paused = true)]
async fn empty_alternatives_are_rejected() {
    let http = Arc::new(ScriptedHttpClient::always(ok_match()));
    let err = fetcher(&http)
        .fetch(FetchRequest::Alternatives(vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::InvalidRequest(_)));
    assert_eq!(http.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn unparseable_url_is_rejected() {
    let http = Arc::new(ScriptedHttpClient::always(ok_match()));
    let err = fetcher(&http).fetch("not a url").await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl { .. }));
    assert_eq!(http.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn events_never_carry_the_key() {
    let http = Arc::new(ScriptedHttpClient::new(
        vec![Ok(HttpResponse::new(500, ""))],
        Ok(ok_match()),
    ));
    let sink = Arc::new(RecordingSink::default());
    let f = fetcher(&http).with_event_sink(sink.clone());

    f.fetch(API_URL).await.unwrap();

    let events = sink.events();
    assert!(matches!(events.first(), Some(FetchEvent::AttemptStarted { attempt_no: 1, .. })));
    assert!(matches!(events.last(), Some(FetchEvent::Completed { attempts: 2, unavailable: None, .. })));
    assert!(events.iter().all(|e| e.fetch_id() == events[0].fetch_id()));
    for event in &events {
        let rendered = event.to_json().to_string();
        assert!(!rendered.contains("SECRETKEY"), "{rendered}");
    }
    let FetchEvent::AttemptStarted { target, .. } = &events[0] else {
        unreachable!()
    };
    assert!(target.contains("key=<redacted>"));
}

#[tokio::test]
async fn transport_errors_never_carry_the_key() {
    // Nothing listens on port 1, so the connect fails inside reqwest.
    let pool = Arc::new(ApiPool::from_lists("SECRETKEY123", "127.0.0.1:1").unwrap());
    let http = Arc::new(ReqwestHttpClient::new().unwrap());
    let sink = Arc::new(RecordingSink::default());
    let f = Fetcher::new(config(), pool, http).with_event_sink(sink.clone());

    let err = f
        .fetch(
            FetchConfig::new(API_URL)
                .delay(Duration::ZERO)
                .timeout(Duration::from_secs(2))
                .no_retry(),
        )
        .await
        .unwrap_err();

    assert!(
        matches!(err, FetchError::Transport { attempts: 1, .. }),
        "{err:?}"
    );
    assert!(!err.to_string().contains("SECRETKEY123"), "{err}");
    assert!(!format!("{err:?}").contains("SECRETKEY123"));

    let events = sink.events();
    assert!(events.iter().any(|e| matches!(e, FetchEvent::AttemptFailed { .. })));
    assert!(events.iter().any(|e| matches!(e, FetchEvent::Failed { .. })));
    for event in &events {
        let rendered = event.to_json().to_string();
        assert!(!rendered.contains("SECRETKEY123"), "{rendered}");
    }
}

#[tokio::test(start_paused = true)]
async fn metrics_sink_counts_attempts_and_outcomes() {
    let http = Arc::new(ScriptedHttpClient::new(
        vec![Err(HttpError::Timeout), Ok(HttpResponse::new(500, ""))],
        Ok(ok_match()),
    ));
    let collector = Arc::new(MetricsCollector::new());
    let sink = Arc::new(MetricsEventSink::new(collector.clone(), Arc::new(NoOpEventSink)));

    fetcher(&http).with_event_sink(sink).fetch(API_URL).await.unwrap();

    let m = collector.get_metrics().await;
    assert_eq!(m.http_requests, 3);
    assert_eq!(m.http_errors, 2);
    assert_eq!(m.retries, 2);
    assert_eq!(m.succeeded, 1);
    assert_eq!(m.failed, 0);
    assert_eq!(m.to_json()["fetches"]["succeeded"], 1);
}

#[tokio::test(start_paused = true)]
async fn spawn_fetch_invokes_callback_once() {
    let http = Arc::new(ScriptedHttpClient::new(
        vec![Ok(HttpResponse::new(500, ""))],
        Ok(ok_match()),
    ));
    let f = Arc::new(fetcher(&http));
    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = tokio::sync::oneshot::channel();

    let counter = calls.clone();
    let handle = f.spawn_fetch(API_URL, move |outcome| {
        counter.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(outcome.map(|f| f.attempts));
    });

    handle.await.unwrap();
    assert_eq!(rx.await.unwrap().unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
