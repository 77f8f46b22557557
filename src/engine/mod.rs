// Engine core — result accumulation, aggregation, and run orchestration.

pub mod orchestrator;
pub mod results;
pub mod stats;
