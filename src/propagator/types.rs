use chrono::{DateTime, Utc};
use serde::Serialize;

/// Propagation regime, fixed per satellite at initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Period below 225 minutes: near-Earth SGP4 with drag.
    ShortPeriod,
    /// Period of 225 minutes or more: SDP4 with lunar-solar and resonance terms.
    LongPeriod,
}

impl Regime {
    pub const BOUNDARY_MINUTES: f64 = 225.0;

    pub fn select(period_minutes: f64) -> Self {
        if period_minutes >= Self::BOUNDARY_MINUTES {
            Regime::LongPeriod
        } else {
            Regime::ShortPeriod
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Frame {
    /// True equator, mean equinox of date.
    #[serde(rename = "TEME")]
    Teme,
}

/// Position and velocity of one satellite at one offset from its epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropagatedState {
    pub satellite_id: u32,
    pub timestamp: DateTime<Utc>,
    pub offset_minutes: f64,
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
    pub frame: Frame,
}

impl PropagatedState {
    pub fn radius_km(&self) -> f64 {
        norm(&self.position_km)
    }

    pub fn speed_km_s(&self) -> f64 {
        norm(&self.velocity_km_s)
    }
}

fn norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_boundary() {
        assert_eq!(Regime::select(224.999), Regime::ShortPeriod);
        assert_eq!(Regime::select(225.0), Regime::LongPeriod);
        assert_eq!(Regime::select(95.6), Regime::ShortPeriod);
        assert_eq!(Regime::select(1436.0), Regime::LongPeriod);
    }
}
