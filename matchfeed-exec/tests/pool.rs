use std::collections::BTreeMap;

use matchfeed_exec::pool::parse_host_list;
use matchfeed_exec::{ApiHost, ApiKey, ApiPool, PoolError};

fn five_hosts() -> ApiPool {
    ApiPool::from_lists("k", "h0.example,h1.example,h2.example,h3.example,h4.example").unwrap()
}

#[test]
fn affinity_range_pins_selection_to_leading_hosts() {
    let pool = five_hosts();
    let mut seen = BTreeMap::new();
    for _ in 0..2000 {
        *seen.entry(pool.pick_host(Some(2)).host.clone()).or_insert(0) += 1;
    }
    assert_eq!(seen.keys().cloned().collect::<Vec<_>>(), vec!["h0.example", "h1.example"]);
}

#[test]
fn no_affinity_spreads_over_every_host() {
    let pool = five_hosts();
    let mut seen = BTreeMap::new();
    for _ in 0..2000 {
        *seen.entry(pool.pick_host(None).host.clone()).or_insert(0) += 1;
    }
    assert_eq!(seen.len(), 5);
}

#[test]
fn zero_or_oversized_affinity_means_all_hosts() {
    let pool = five_hosts();
    let mut zero = std::collections::BTreeSet::new();
    let mut big = std::collections::BTreeSet::new();
    for _ in 0..2000 {
        zero.insert(pool.pick_host(Some(0)).host.clone());
        big.insert(pool.pick_host(Some(50)).host.clone());
    }
    assert_eq!(zero.len(), 5);
    assert_eq!(big.len(), 5);
}

#[test]
fn keys_are_all_used() {
    let pool = ApiPool::from_lists("a, b ,c,,", "api.steampowered.com").unwrap();
    assert_eq!(pool.keys().len(), 3);
    let mut seen = std::collections::BTreeSet::new();
    for _ in 0..500 {
        seen.insert(pool.pick_key().expose().to_string());
    }
    assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[test]
fn empty_lists_are_rejected() {
    assert_eq!(ApiPool::from_lists(" , ", "h").unwrap_err(), PoolError::NoKeys);
    assert_eq!(ApiPool::from_lists("k", "").unwrap_err(), PoolError::NoHosts);
}

#[test]
fn host_entries_parse_port_and_weight() {
    let hosts = parse_host_list("api.steampowered.com, 10.0.0.5:8080?size=2 ,proxy.local?size=0").unwrap();
    assert_eq!(
        hosts,
        vec![
            ApiHost::new("api.steampowered.com", None),
            ApiHost::new("10.0.0.5", Some(8080)),
            ApiHost::new("10.0.0.5", Some(8080)),
            ApiHost::new("proxy.local", None),
        ]
    );
    assert_eq!(hosts[1].to_string(), "10.0.0.5:8080");
}

#[test]
fn malformed_host_entries_are_rejected() {
    assert!(matches!(parse_host_list("bad host"), Err(PoolError::InvalidHost(_))));
    assert!(matches!(parse_host_list("h.example/path"), Err(PoolError::InvalidHost(_))));
    assert!(matches!(parse_host_list("h.example?size=many"), Err(PoolError::InvalidHost(_))));
}

#[test]
fn api_key_debug_is_redacted() {
    let key = ApiKey::new("SUPERSECRET");
    assert_eq!(format!("{key:?}"), "ApiKey(<redacted>)");
    let pool = ApiPool::new(vec![key], vec![ApiHost::new("h", None)]).unwrap();
    assert!(!format!("{pool:?}").contains("SUPERSECRET"));
}
