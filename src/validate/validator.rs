use std::f64::consts::TAU;

use crate::elements::MeanElements;
use crate::propagator::PropagatedState;
use crate::reason::ReasonCode;
use crate::validate::{OrbitEnvelope, ValidationConfig, ValidationIssue, ValidationReport};

const MINUTES_PER_DAY: f64 = 1440.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
/// Slack on the mean apogee for osculating and lunar-solar excursions.
const APOGEE_MARGIN: f64 = 0.05;

pub struct PrecisionValidator {
    config: ValidationConfig,
    mu: f64,
    earth_radius_km: f64,
}

impl PrecisionValidator {
    pub fn new(config: &ValidationConfig) -> Self {
        let constants = config.gravity.constants();
        Self {
            config: config.clone(),
            mu: constants.mu,
            earth_radius_km: constants.radius_km,
        }
    }

    /// Checks a whole series against the element set's mean motion
    /// (revolutions per day). Issues raised here never drop points.
    pub fn validate(&self, states: &[PropagatedState], mean_motion: f64) -> ValidationReport {
        let mut report = ValidationReport::pass();
        if states.is_empty() || mean_motion <= 0.0 {
            return report;
        }
        let expected = MINUTES_PER_DAY / mean_motion;

        if let Some(period) = self.vis_viva_period(states) {
            if let Some(issue) = self.compare_periods("vis-viva", period, expected) {
                report.push(issue);
            }
        }
        if let Some(period) = period_from_node_crossings(states) {
            if let Some(issue) = self.compare_periods("node-crossing", period, expected) {
                report.push(issue);
            }
        }
        report
    }

    /// Mean orbit radii from the element set's mean motion.
    pub fn envelope(&self, elements: &MeanElements) -> Option<OrbitEnvelope> {
        let n = elements.mean_motion * TAU / SECONDS_PER_DAY;
        if !(n.is_finite() && n > 0.0) || !(0.0..1.0).contains(&elements.eccentricity) {
            return None;
        }
        let a = (self.mu / (n * n)).cbrt();
        Some(OrbitEnvelope {
            semi_major_axis_km: a,
            perigee_radius_km: a * (1.0 - elements.eccentricity),
            apogee_radius_km: a * (1.0 + elements.eccentricity),
        })
    }

    /// Plausibility of a single point: radius, speed and geodetic altitude,
    /// judged against the orbit the element set describes.
    pub fn check_point(
        &self,
        state: &PropagatedState,
        altitude_m: f64,
        orbit: &OrbitEnvelope,
    ) -> Result<(), ValidationIssue> {
        let offset = state.offset_minutes;
        let radius = state.radius_km();
        let min_radius = self.earth_radius_km + self.config.min_altitude_km;
        let max_radius = self
            .config
            .max_radius_km
            .max(orbit.apogee_radius_km * (1.0 + APOGEE_MARGIN));
        if !(min_radius..=max_radius).contains(&radius) {
            return Err(violation(
                offset,
                format!("radius {radius:.3} km outside [{min_radius:.3}, {max_radius:.3}] km"),
            ));
        }

        let speed = state.speed_km_s();
        if !(self.config.min_speed_km_s..=self.config.max_speed_km_s).contains(&speed) {
            return Err(violation(
                offset,
                format!(
                    "speed {speed:.4} km/s outside [{}, {}] km/s",
                    self.config.min_speed_km_s, self.config.max_speed_km_s
                ),
            ));
        }
        let energy = 2.0 / radius - 1.0 / orbit.semi_major_axis_km;
        if energy <= 0.0 {
            return Err(violation(
                offset,
                format!(
                    "radius {radius:.3} km unreachable with semi-major axis {:.3} km",
                    orbit.semi_major_axis_km
                ),
            ));
        }
        let reference = (self.mu * energy).sqrt();
        let deviation = (speed - reference).abs() / reference;
        if deviation > self.config.speed_tolerance_ratio {
            return Err(violation(
                offset,
                format!(
                    "speed {speed:.4} km/s deviates {:.1}% from vis-viva {reference:.4} km/s",
                    deviation * 100.0
                ),
            ));
        }

        let altitude_km = altitude_m / 1000.0;
        let low_orbit = orbit.apogee_radius_km - self.earth_radius_km <= self.config.max_altitude_km;
        let max_altitude = if low_orbit {
            self.config.max_altitude_km
        } else {
            f64::INFINITY
        };
        if !(self.config.min_altitude_km..=max_altitude).contains(&altitude_km) {
            return Err(violation(
                offset,
                format!(
                    "altitude {altitude_km:.3} km outside [{}, {max_altitude}] km",
                    self.config.min_altitude_km
                ),
            ));
        }
        Ok(())
    }

    /// Period in minutes from the mean vis-viva semi-major axis.
    fn vis_viva_period(&self, states: &[PropagatedState]) -> Option<f64> {
        let axes: Vec<f64> = states
            .iter()
            .map(|s| {
                let r = s.radius_km();
                let v = s.speed_km_s();
                1.0 / (2.0 / r - v * v / self.mu)
            })
            .filter(|a| a.is_finite() && *a > 0.0)
            .collect();
        if axes.is_empty() {
            return None;
        }
        let a = axes.iter().sum::<f64>() / axes.len() as f64;
        Some(TAU * (a * a * a / self.mu).sqrt() / 60.0)
    }

    fn compare_periods(&self, method: &str, derived: f64, expected: f64) -> Option<ValidationIssue> {
        let ratio = (derived - expected).abs() / expected;
        if ratio <= self.config.kepler_tolerance_ratio {
            return None;
        }
        Some(ValidationIssue::warning(
            ReasonCode::KeplerConsistencyWarning,
            format!(
                "{method} period {derived:.3} min differs {:.2}% from mean-motion period {expected:.3} min",
                ratio * 100.0
            ),
        ))
    }
}

fn violation(offset_minutes: f64, message: String) -> ValidationIssue {
    ValidationIssue::fatal(ReasonCode::PhysicalBoundsViolation, offset_minutes, message)
}

/// Orbital period in minutes from successive ascending-node crossings.
///
/// Crossing times are linearly interpolated on the sign change of z.
/// Returns `None` with fewer than two crossings.
pub fn period_from_node_crossings(states: &[PropagatedState]) -> Option<f64> {
    let crossings: Vec<f64> = states
        .windows(2)
        .filter_map(|pair| {
            let (before, after) = (&pair[0], &pair[1]);
            let (z0, z1) = (before.position_km[2], after.position_km[2]);
            if z0 < 0.0 && z1 >= 0.0 {
                let fraction = -z0 / (z1 - z0);
                Some(before.offset_minutes + fraction * (after.offset_minutes - before.offset_minutes))
            } else {
                None
            }
        })
        .collect();

    match crossings.as_slice() {
        [first, .., last] => Some((last - first) / (crossings.len() - 1) as f64),
        _ => None,
    }
}
