// Orchestrator tests against stub fetchers — no network involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use cdn_warmup::config::WarmupConfig;
use cdn_warmup::engine::orchestrator::WarmupEngine;
use cdn_warmup::engine::results::{CacheStatus, FetchOutcome};
use cdn_warmup::fetch::traits::TargetFetcher;

/// Answers every URL with a canned 200 unless the URL contains "fail",
/// in which case it reports a transport failure.
struct StubFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl TargetFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.contains("fail") {
            FetchOutcome::failure(url, "simulated outage")
        } else {
            FetchOutcome {
                url: url.to_string(),
                status: 200,
                connect_time: Some(Duration::from_millis(10)),
                age: Some(0),
                cache: CacheStatus::NotFound,
            }
        }
    }
}

fn engine_with_stub(concurrency: usize) -> (WarmupEngine, Arc<StubFetcher>) {
    let fetcher = Arc::new(StubFetcher {
        calls: AtomicUsize::new(0),
    });
    let config = WarmupConfig {
        concurrency,
        ..Default::default()
    };
    let engine = WarmupEngine::with_fetcher(config, fetcher.clone());
    (engine, fetcher)
}

#[tokio::test]
async fn test_every_target_fetched_exactly_once() {
    let (engine, fetcher) = engine_with_stub(4);
    let urls: Vec<String> = (0..25).map(|i| format!("http://t.test/{}", i)).collect();

    let report = engine.run(&urls).await.unwrap();

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 25);
    assert_eq!(report.outcomes.len(), 25);
}

#[tokio::test]
async fn test_failures_do_not_leak_limiter_slots() {
    // With a single slot, a leaked permit on failure would deadlock
    // the remaining targets.
    let (engine, _) = engine_with_stub(1);
    let urls = vec![
        "http://t.test/fail/1".to_string(),
        "http://t.test/fail/2".to_string(),
        "http://t.test/ok".to_string(),
    ];

    let report = tokio::time::timeout(Duration::from_secs(5), engine.run(&urls))
        .await
        .expect("run deadlocked")
        .unwrap();

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.summary.by_status.get(&0), Some(&2));
    assert_eq!(report.summary.by_status.get(&200), Some(&1));
    // Two distinct groups: the shared error text and "Not found".
    assert_eq!(report.summary.by_cache.get("simulated outage"), Some(&2));
    assert_eq!(report.summary.by_cache.get("Not found"), Some(&1));
}

#[tokio::test]
async fn test_mean_latency_ignores_failed_fetches() {
    let (engine, _) = engine_with_stub(4);
    let urls = vec![
        "http://t.test/a".to_string(),
        "http://t.test/fail".to_string(),
        "http://t.test/b".to_string(),
    ];

    let report = engine.run(&urls).await.unwrap();

    // Stub latencies are a flat 10ms; the failure contributes nothing.
    let mean = report.summary.mean_connect_ms.unwrap();
    assert!((mean - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_empty_target_list() {
    let (engine, _) = engine_with_stub(4);
    let report = engine.run(&[]).await.unwrap();
    assert!(report.outcomes.is_empty());
    assert_eq!(report.summary.total, 0);
    assert!(report.summary.mean_connect_ms.is_none());
}
