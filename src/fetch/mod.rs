// Transport layer — timed HTTP fetching behind a pluggable trait.

pub mod http_fetcher;
pub mod traits;
