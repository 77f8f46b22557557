// CDN cache warm-up engine — bounded-concurrency GET fan-out with connect timing.

pub mod config;
pub mod engine;
pub mod fetch;
pub mod input;
pub mod report;
