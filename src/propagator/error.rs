use thiserror::Error;

use crate::reason::ReasonCode;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropagationError {
    #[error("invalid elements: {0}")]
    InvalidElements(String),
    #[error("eccentric anomaly did not converge at {offset_minutes} min (last correction {correction:e})")]
    KeplerDivergence { offset_minutes: f64, correction: f64 },
    #[error("eccentricity {eccentricity} out of range at {offset_minutes} min")]
    EccentricityOutOfRange { offset_minutes: f64, eccentricity: f64 },
    #[error("mean motion {mean_motion} is not positive at {offset_minutes} min")]
    NegativeMeanMotion { offset_minutes: f64, mean_motion: f64 },
    #[error("semi-latus rectum {value} is negative at {offset_minutes} min")]
    NegativeSemiLatusRectum { offset_minutes: f64, value: f64 },
    #[error("orbit decayed at {offset_minutes} min (radius {radius_er} Earth radii)")]
    Decayed { offset_minutes: f64, radius_er: f64 },
}

impl PropagationError {
    pub fn reason_code(&self) -> ReasonCode {
        ReasonCode::PropagationDivergence
    }
}
