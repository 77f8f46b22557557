use std::time::Duration;

use serde::Deserialize;

/// Maximum number of concurrent fetches when none is configured.
pub const DEFAULT_CONCURRENCY: usize = 150;

/// Per-request timeout in seconds, applied to the connect and read
/// phases independently.
pub const DEFAULT_TIMEOUT_SECS: u64 = 2;

/// User-Agent sent with every warm-up request.
pub const USER_AGENT: &str = "CDNWarmup/1.0";

/// Top-level configuration for one warm-up run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WarmupConfig {
    /// Maximum number of in-flight fetches.
    pub concurrency: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Suppress per-request output except failures and 4xx/5xx.
    pub quiet: bool,
    /// Persist the result set as a CSV export after the run.
    pub output: bool,
    /// Read `age`/`x-cache` on non-200 responses too. The reference
    /// warmer skips them; leave off to reproduce that behavior.
    pub inspect_non_success_headers: bool,
}

impl WarmupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for WarmupConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            quiet: false,
            output: false,
            inspect_non_success_headers: false,
        }
    }
}
