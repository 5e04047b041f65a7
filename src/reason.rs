use serde::{Deserialize, Serialize};

/// Machine-readable reason attached to failures and annotations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// Epoch fields could not be turned into an instant. Satellite skipped.
    MalformedEpoch,
    /// The propagator failed for this satellite. Satellite skipped.
    PropagationDivergence,
    /// Published Earth-orientation data did not cover an instant; the
    /// approximate model was used instead.
    EarthOrientationUnavailable,
    /// Ellipsoidal inversion hit its iteration cap; best estimate emitted.
    EllipsoidalConvergenceFailure,
    /// Derived orbital period disagrees with the element set's mean motion.
    KeplerConsistencyWarning,
    /// A state point is physically impossible and was dropped.
    PhysicalBoundsViolation,
    /// The run deadline expired before the satellite was dispatched.
    DeadlineExceeded,
    /// Every state point of the satellite was dropped.
    NoValidPoints,
}

impl ReasonCode {
    /// Whether output is still emitted when this reason is raised.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReasonCode::EarthOrientationUnavailable
                | ReasonCode::EllipsoidalConvergenceFailure
                | ReasonCode::KeplerConsistencyWarning
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_render_in_screaming_snake_case() {
        assert_eq!(ReasonCode::MalformedEpoch.to_string(), "MALFORMED_EPOCH");
        assert_eq!(
            ReasonCode::PhysicalBoundsViolation.as_ref(),
            "PHYSICAL_BOUNDS_VIOLATION"
        );
        let json = serde_json::to_string(&ReasonCode::PropagationDivergence).unwrap();
        assert_eq!(json, "\"PROPAGATION_DIVERGENCE\"");
    }

    #[test]
    fn only_annotations_are_recoverable() {
        assert!(ReasonCode::KeplerConsistencyWarning.is_recoverable());
        assert!(ReasonCode::EarthOrientationUnavailable.is_recoverable());
        assert!(!ReasonCode::MalformedEpoch.is_recoverable());
        assert!(!ReasonCode::PhysicalBoundsViolation.is_recoverable());
    }
}
