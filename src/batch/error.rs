use thiserror::Error;

/// Errors setting up a batch. Per-satellite problems never surface here;
/// they are recorded in the run summary.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
