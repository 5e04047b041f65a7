use serde::Serialize;

use crate::propagator::GravityModel;
use crate::reason::ReasonCode;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    /// Allowed relative difference between derived and mean-motion periods.
    pub kepler_tolerance_ratio: f64,
    pub min_altitude_km: f64,
    /// Upper end of the geodetic altitude band for LEO element sets.
    pub max_altitude_km: f64,
    /// Radius ceiling, raised for orbits whose own apogee lies beyond it.
    pub max_radius_km: f64,
    /// Allowed relative deviation from the vis-viva speed.
    pub speed_tolerance_ratio: f64,
    pub min_speed_km_s: f64,
    pub max_speed_km_s: f64,
    pub gravity: GravityModel,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            kepler_tolerance_ratio: 0.03,
            min_altitude_km: 100.0,
            max_altitude_km: 3_000.0,
            max_radius_km: 6_378.135 + 36_000.0,
            speed_tolerance_ratio: 0.25,
            min_speed_km_s: 1.0,
            max_speed_km_s: 12.0,
            gravity: GravityModel::default(),
        }
    }
}

/// Radii of the mean orbit an element set describes, in km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitEnvelope {
    pub semi_major_axis_km: f64,
    pub perigee_radius_km: f64,
    pub apogee_radius_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Output is kept and annotated.
    Warning,
    /// The affected point is dropped.
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub code: ReasonCode,
    pub severity: Severity,
    /// Offset of the offending point, if the issue concerns a single point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_minutes: Option<f64>,
    pub message: String,
}

impl ValidationIssue {
    pub fn warning(code: ReasonCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            offset_minutes: None,
            message: message.into(),
        }
    }

    pub fn fatal(code: ReasonCode, offset_minutes: f64, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Fatal,
            offset_minutes: Some(offset_minutes),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Pass,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub reasons: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn pass() -> Self {
        Self {
            status: ValidationStatus::Pass,
            reasons: Vec::new(),
        }
    }

    /// Adds an issue; any issue downgrades the status to `Warn`.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.status = ValidationStatus::Warn;
        self.reasons.push(issue);
    }

    pub fn has(&self, code: ReasonCode) -> bool {
        self.reasons.iter().any(|issue| issue.code == code)
    }
}
