use thiserror::Error;

use crate::reason::ReasonCode;

#[derive(Debug, Error)]
pub enum EopError {
    #[error("EOP file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("EOP parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("EOP series contains no usable rows")]
    Empty,
    #[error("no EOP data for MJD {mjd:.3} (series covers {first:.1} to {last:.1})")]
    Unavailable { mjd: f64, first: f64, last: f64 },
}

impl EopError {
    pub fn reason_code(&self) -> ReasonCode {
        ReasonCode::EarthOrientationUnavailable
    }
}
