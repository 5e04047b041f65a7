//! Orbital state propagation and reference-frame transformation for large
//! fleets of satellites described by two-line element sets.
//!
//! The per-satellite pipeline is:
//! element set → [`epoch::resolve`] → [`epoch::plan`] →
//! [`propagator::Propagator`] → [`frames::FrameTransformer`] (fed by an
//! [`eop::EarthOrientationProvider`]) → [`validate::PrecisionValidator`].
//! [`batch::BatchRunner`] drives it over a whole catalogue in parallel.

pub mod batch;
pub mod config;
pub mod elements;
pub mod eop;
pub mod epoch;
pub mod frames;
pub mod propagator;
pub mod reason;
pub mod validate;

pub use batch::{BatchOutput, BatchRunner, RunSummary, SatelliteSeries};
pub use config::Config;
pub use elements::OrbitalElementSet;
pub use reason::ReasonCode;
