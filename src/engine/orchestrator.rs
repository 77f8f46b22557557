// Warm-up run driver — semaphore-bounded fan-out over the target list.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tracing::{debug, info};

use super::results::{FetchOutcome, ResultSet};
use super::stats::Summary;
use crate::config::WarmupConfig;
use crate::fetch::http_fetcher::TimedFetcher;
use crate::fetch::traits::TargetFetcher;

/// Everything a run produces: the drained result set plus its summary.
pub struct WarmupReport {
    pub outcomes: Vec<FetchOutcome>,
    pub summary: Summary,
}

/// Drives a URL list through the fetcher under the concurrency cap.
/// Reusable across runs; the result set is drained on completion so no
/// state leaks between runs.
pub struct WarmupEngine {
    config: WarmupConfig,
    fetcher: Arc<dyn TargetFetcher>,
    results: Arc<ResultSet>,
}

impl WarmupEngine {
    pub fn new(config: WarmupConfig) -> Result<Self> {
        let fetcher = TimedFetcher::new(config.timeout(), config.inspect_non_success_headers)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Engine over a caller-supplied fetcher. Tests use this to swap
    /// in controlled transports.
    pub fn with_fetcher(config: WarmupConfig, fetcher: Arc<dyn TargetFetcher>) -> Self {
        Self {
            config,
            fetcher,
            results: Arc::new(ResultSet::new()),
        }
    }

    pub fn config(&self) -> &WarmupConfig {
        &self.config
    }

    /// Warm every target and wait for all of them to reach a terminal
    /// state. Per-URL failures are data in the report, never errors;
    /// only a panicked task surfaces as `Err`.
    pub async fn run(&self, urls: &[String]) -> Result<WarmupReport> {
        info!(
            "starting warm-up targets={} concurrency={} timeout={}s",
            urls.len(),
            self.config.concurrency,
            self.config.timeout_secs
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut handles = Vec::with_capacity(urls.len());

        for url in urls {
            let url = url.clone();
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.fetcher);
            let results = Arc::clone(&self.results);

            handles.push(tokio::spawn(async move {
                // Permit released on drop, success or failure.
                let _permit = semaphore.acquire_owned().await?;
                debug!("fetching {}", url);
                let outcome = fetcher.fetch(&url).await;
                results.push(outcome);
                anyhow::Ok(())
            }));
        }

        for handle in handles {
            handle.await.context("warm-up task panicked")??;
        }

        let outcomes = self.results.take();
        let summary = Summary::compute(&outcomes);
        info!(
            "warm-up complete targets={} mean_connect_ms={:?}",
            summary.total, summary.mean_connect_ms
        );

        Ok(WarmupReport { outcomes, summary })
    }
}
