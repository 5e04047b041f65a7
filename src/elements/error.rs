use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElementError {
    #[error("TLE path not found: {0}")]
    PathNotFound(String),
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("line {line} is not ASCII")]
    NotAscii { line: u8 },
    #[error("line {line} too short for field '{field}' ({len} characters)")]
    Truncated {
        line: u8,
        field: &'static str,
        len: usize,
    },
    #[error("invalid field '{field}': {value:?}")]
    InvalidField { field: &'static str, value: String },
    #[error("catalog numbers differ between lines: {0} vs {1}")]
    IdMismatch(u32, u32),
}
