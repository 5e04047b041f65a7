use chrono::{DateTime, Utc};
use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

use super::ellipsoid::ecef_to_geodetic;
use super::nutation::{
    celestial_to_intermediate, cio_locator, equation_of_equinoxes, PrecessionNutation,
};
use super::rotation::{rx, ry, rz};
use super::time_scales::TimeArguments;
use crate::eop::{EarthOrientationSample, EopProvenance};
use crate::propagator::PropagatedState;

pub const EARTH_ROTATION_RAD_S: f64 = 7.292_115_146_706_979e-5;

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / 648_000.0;
const MAS_TO_RAD: f64 = ARCSEC_TO_RAD / 1_000.0;
/// TIO locator rate, arcseconds per Julian century.
const TIO_RATE_ARCSEC: f64 = -47e-6;

/// Truncation error of the precession-nutation series at LEO distances.
const FRAME_MODEL_ERROR_M: f64 = 0.25;
const PUBLISHED_EOP_ERROR_M: f64 = 0.5;
const APPROXIMATE_DUT1_ERROR_S: f64 = 0.9;
const APPROXIMATE_POLE_ERROR_ARCSEC: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    pub convergence_tolerance: f64,
    pub max_iterations: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            convergence_tolerance: 1e-12,
            max_iterations: 20,
        }
    }
}

/// ITRS position and velocity, metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EarthFixedState {
    pub satellite_id: u32,
    pub timestamp: DateTime<Utc>,
    pub position_m: [f64; 3],
    pub velocity_m_s: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionMethod {
    IterativeConverged,
    /// Iteration cap reached; the last estimate is reported.
    BestEffort,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticPosition {
    pub satellite_id: u32,
    pub timestamp: DateTime<Utc>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    pub estimated_accuracy_m: f64,
    pub precision: PrecisionMethod,
    pub eop: EopProvenance,
}

/// Converts TEME states to ITRS and WGS84 geodetic coordinates.
#[derive(Debug, Clone)]
pub struct FrameTransformer {
    config: FrameConfig,
}

impl FrameTransformer {
    pub fn new(config: &FrameConfig) -> Self {
        Self { config: *config }
    }

    /// Rotates a TEME state into the ITRS, removing the Earth-rotation
    /// term from the velocity.
    pub fn to_itrs(&self, state: &PropagatedState, eop: &EarthOrientationSample) -> EarthFixedState {
        let params = eop.params();
        let args = TimeArguments::new(state.timestamp, params.dut1_s);
        let t = args.tt_centuries;

        let pn = PrecessionNutation::at(t);
        let teme_to_tod = rz(-equation_of_equinoxes(t, pn.dpsi, pn.eps_a));

        let (x, y) = pn.cip();
        let x = x + params.dx_mas * MAS_TO_RAD;
        let y = y + params.dy_mas * MAS_TO_RAD;
        let s = cio_locator(t, x, y);
        let gcrs_to_cirs = celestial_to_intermediate(x, y, s);

        let teme_to_cirs = gcrs_to_cirs * pn.matrix.transpose() * teme_to_tod;
        let cirs_to_tirs = rz(args.earth_rotation_angle());
        let polar_motion = polar_motion(params.xp_arcsec, params.yp_arcsec, t);

        let position_km = Vector3::from(state.position_km);
        let velocity_km_s = Vector3::from(state.velocity_km_s);

        let r_tirs = cirs_to_tirs * teme_to_cirs * position_km;
        let v_tirs = cirs_to_tirs * teme_to_cirs * velocity_km_s
            - Vector3::new(0.0, 0.0, EARTH_ROTATION_RAD_S).cross(&r_tirs);

        let r_itrs = polar_motion * r_tirs * 1_000.0;
        let v_itrs = polar_motion * v_tirs * 1_000.0;

        EarthFixedState {
            satellite_id: state.satellite_id,
            timestamp: state.timestamp,
            position_m: [r_itrs.x, r_itrs.y, r_itrs.z],
            velocity_m_s: [v_itrs.x, v_itrs.y, v_itrs.z],
        }
    }

    pub fn to_geodetic(&self, itrs: &EarthFixedState, eop: &EarthOrientationSample) -> GeodeticPosition {
        let solution = ecef_to_geodetic(
            itrs.position_m,
            self.config.convergence_tolerance,
            self.config.max_iterations,
        );
        let precision = if solution.converged {
            PrecisionMethod::IterativeConverged
        } else {
            PrecisionMethod::BestEffort
        };
        if !solution.converged {
            log::debug!(
                "satellite {}: ellipsoidal inversion stopped after {} iterations (residual {:e} rad)",
                itrs.satellite_id,
                solution.iterations,
                solution.residual_rad
            );
        }

        GeodeticPosition {
            satellite_id: itrs.satellite_id,
            timestamp: itrs.timestamp,
            latitude_deg: solution.latitude_rad.to_degrees(),
            longitude_deg: solution.longitude_rad.to_degrees(),
            altitude_m: solution.altitude_m,
            estimated_accuracy_m: estimated_accuracy(itrs.position_m, solution.residual_rad, eop),
            precision,
            eop: eop.provenance(),
        }
    }

    pub fn transform(&self, state: &PropagatedState, eop: &EarthOrientationSample) -> GeodeticPosition {
        self.transform_with_itrs(state, eop).1
    }

    pub fn transform_with_itrs(
        &self,
        state: &PropagatedState,
        eop: &EarthOrientationSample,
    ) -> (EarthFixedState, GeodeticPosition) {
        let itrs = self.to_itrs(state, eop);
        let geodetic = self.to_geodetic(&itrs, eop);
        (itrs, geodetic)
    }
}

/// TIRS to ITRS rotation W = R1(-yp)·R2(-xp)·R3(s′).
fn polar_motion(xp_arcsec: f64, yp_arcsec: f64, t: f64) -> Matrix3<f64> {
    let sp = TIO_RATE_ARCSEC * t * ARCSEC_TO_RAD;
    rx(-yp_arcsec * ARCSEC_TO_RAD) * ry(-xp_arcsec * ARCSEC_TO_RAD) * rz(sp)
}

fn estimated_accuracy(position_m: [f64; 3], residual_rad: f64, eop: &EarthOrientationSample) -> f64 {
    let [x, y, z] = position_m;
    let axis_distance = x.hypot(y);
    let radius = axis_distance.hypot(z);

    let orientation = match eop {
        EarthOrientationSample::Published {
            dut1_error_s,
            pole_error_arcsec,
            ..
        } => {
            let ut1 = dut1_error_s * EARTH_ROTATION_RAD_S * axis_distance;
            let pole = pole_error_arcsec * ARCSEC_TO_RAD * radius;
            (PUBLISHED_EOP_ERROR_M.powi(2) + ut1.powi(2) + pole.powi(2)).sqrt()
        }
        EarthOrientationSample::Approximated { .. } => {
            let ut1 = APPROXIMATE_DUT1_ERROR_S * EARTH_ROTATION_RAD_S * axis_distance;
            let pole = APPROXIMATE_POLE_ERROR_ARCSEC * ARCSEC_TO_RAD * radius;
            ut1.hypot(pole)
        }
    };
    let residual = if residual_rad.is_finite() {
        residual_rad * radius
    } else {
        0.0
    };

    (FRAME_MODEL_ERROR_M.powi(2) + orientation.powi(2) + residual.powi(2)).sqrt()
}
