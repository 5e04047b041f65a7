use thiserror::Error;

use crate::reason::ReasonCode;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EpochError {
    #[error("line {line} has {len} characters, expected 69")]
    BadLength { line: u8, len: usize },
    #[error("line {line} does not start with '{line} '")]
    BadLineNumber { line: u8 },
    #[error("line {line} checksum mismatch: computed {computed}, found {found:?}")]
    ChecksumMismatch { line: u8, computed: u8, found: char },
    #[error("epoch year field is not numeric: {0:?}")]
    InvalidYear(String),
    #[error("epoch day-of-year field is not numeric: {0:?}")]
    InvalidDay(String),
    #[error("epoch day-of-year {day} outside [1, {limit}) for {year}")]
    DayOutOfRange { year: i32, day: f64, limit: u32 },
}

impl EpochError {
    pub fn reason_code(&self) -> ReasonCode {
        ReasonCode::MalformedEpoch
    }
}
