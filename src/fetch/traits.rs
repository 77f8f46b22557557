use async_trait::async_trait;

use crate::engine::results::FetchOutcome;

/// A single-URL fetcher. Implementations never fail at the call level:
/// every transport or protocol problem is folded into the returned
/// outcome (status 0, error classification).
#[async_trait]
pub trait TargetFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}
