//! Earth orientation parameters: polar motion, UT1-UTC and celestial pole
//! offsets, either from a published IERS series or from an analytic model.

mod approximate;
mod error;
mod finals;
mod source;
mod types;

use chrono::{DateTime, Utc};

pub use approximate::ApproximateEop;
pub use error::EopError;
pub use finals::{FinalsRow, FinalsTable, PublishedEop};
pub use source::{load_provider, EarthOrientationSource};
pub use types::{EarthOrientationSample, EopParameters, EopProvenance};

/// Read-only source of Earth orientation samples, shared across workers.
pub trait EarthOrientationProvider: Send + Sync {
    fn sample_at(&self, instant: DateTime<Utc>) -> EarthOrientationSample;

    /// Provenance the provider aims for; individual samples may still be
    /// approximated when published data does not cover them.
    fn provenance(&self) -> EopProvenance;
}
