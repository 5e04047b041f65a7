//! Parallel per-satellite pipeline with failure isolation and a run deadline.

mod error;
mod runner;
mod types;

pub use error::BatchError;
pub use runner::{BatchConfig, BatchRunner};
pub use types::{BatchOutput, RunSummary, SatelliteFailure, SatelliteSeries, StatePoint};
