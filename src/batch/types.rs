use serde::Serialize;

use crate::frames::{EarthFixedState, GeodeticPosition};
use crate::propagator::{PropagatedState, Regime};
use crate::reason::ReasonCode;
use crate::validate::ValidationReport;

/// One emitted time step of a satellite.
#[derive(Debug, Clone, Serialize)]
pub struct StatePoint {
    pub state: PropagatedState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itrs: Option<EarthFixedState>,
    pub geodetic: GeodeticPosition,
}

#[derive(Debug, Clone, Serialize)]
pub struct SatelliteSeries {
    pub norad_id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
    pub regime: Regime,
    pub points: Vec<StatePoint>,
    pub dropped_points: usize,
    pub report: ValidationReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct SatelliteFailure {
    pub norad_id: u32,
    pub name: String,
    pub reason: ReasonCode,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_points: usize,
    pub dropped_points: usize,
    /// Recoverable issues across all emitted series.
    pub warnings: usize,
    pub deadline_hit: bool,
    pub failures: Vec<SatelliteFailure>,
    pub elapsed_ms: u64,
}

impl RunSummary {
    /// Number of failures carrying `reason`.
    pub fn count(&self, reason: ReasonCode) -> usize {
        self.failures.iter().filter(|f| f.reason == reason).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    pub series: Vec<SatelliteSeries>,
    pub summary: RunSummary,
}
