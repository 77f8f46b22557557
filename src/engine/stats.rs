// Summary statistics over a completed result set — grouped counts and mean latency.

use std::collections::BTreeMap;

use crate::engine::results::FetchOutcome;

/// Derived, read-only view over a result set. Recomputed per report,
/// never stored.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Arithmetic mean of connection-establishment latency in
    /// milliseconds. Outcomes without a latency are excluded from both
    /// numerator and denominator; `None` when no outcome has one.
    pub mean_connect_ms: Option<f64>,
    /// Outcome count per HTTP status code; 0 groups the failures.
    pub by_status: BTreeMap<u16, usize>,
    /// Outcome count per cache classification string. Failure outcomes
    /// group by their error text, so distinct errors form distinct
    /// groups, matching the reference warmer.
    pub by_cache: BTreeMap<String, usize>,
    pub total: usize,
}

impl Summary {
    pub fn compute(outcomes: &[FetchOutcome]) -> Self {
        let mut by_status: BTreeMap<u16, usize> = BTreeMap::new();
        let mut by_cache: BTreeMap<String, usize> = BTreeMap::new();

        let mut latency_sum_ms = 0.0_f64;
        let mut latency_count = 0_usize;

        for outcome in outcomes {
            *by_status.entry(outcome.status).or_insert(0) += 1;
            *by_cache.entry(outcome.cache.to_string()).or_insert(0) += 1;

            if let Some(t) = outcome.connect_time {
                latency_sum_ms += t.as_secs_f64() * 1000.0;
                latency_count += 1;
            }
        }

        let mean_connect_ms = if latency_count > 0 {
            Some(latency_sum_ms / latency_count as f64)
        } else {
            None
        };

        Self {
            mean_connect_ms,
            by_status,
            by_cache,
            total: outcomes.len(),
        }
    }
}
