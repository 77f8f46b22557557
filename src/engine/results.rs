// Per-URL outcomes and the shared result set accumulated during a run.

use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;

/// Cache behavior observed for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStatus {
    /// Literal `x-cache` header value, e.g. "HIT", "MISS", "HIT-EDGE".
    Header(String),
    /// Response received but no `x-cache` header present.
    NotFound,
    /// The request never produced a response; carries the failure text.
    Error(String),
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheStatus::Header(v) => f.write_str(v),
            CacheStatus::NotFound => f.write_str("Not found"),
            CacheStatus::Error(e) => f.write_str(e),
        }
    }
}

/// One fetch result. Exactly one is produced per URL target, created
/// at fetch completion and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub url: String,
    /// HTTP status code, or 0 if the request never completed.
    pub status: u16,
    /// Connection-establishment latency (connect start to transport
    /// usable). `None` when the request failed.
    pub connect_time: Option<Duration>,
    /// `age` header value; defaults to 0 on responses without one,
    /// `None` when the request failed.
    pub age: Option<u64>,
    pub cache: CacheStatus,
}

impl FetchOutcome {
    /// Outcome for a request that never completed.
    pub fn failure(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: 0,
            connect_time: None,
            age: None,
            cache: CacheStatus::Error(reason.into()),
        }
    }
}

/// Shared, append-only collection of outcomes for the current run.
///
/// Concurrent fetch tasks push into it; each push lands a fully-formed
/// outcome under a single lock hold. Draining resets it for the next
/// run, so one engine instance can be reused without carrying state.
#[derive(Default)]
pub struct ResultSet {
    outcomes: Mutex<Vec<FetchOutcome>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, outcome: FetchOutcome) {
        self.outcomes.lock().push(outcome);
    }

    pub fn len(&self) -> usize {
        self.outcomes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.lock().is_empty()
    }

    /// Remove and return all accumulated outcomes, leaving the set empty.
    pub fn take(&self) -> Vec<FetchOutcome> {
        std::mem::take(&mut *self.outcomes.lock())
    }
}
