//! Physical plausibility checks on propagated series.

mod types;
mod validator;

pub use types::{OrbitEnvelope, Severity, ValidationConfig, ValidationIssue, ValidationReport, ValidationStatus};
pub use validator::{period_from_node_crossings, PrecisionValidator};
