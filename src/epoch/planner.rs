use serde::Serialize;

use crate::epoch::EpochTime;

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub time_step_seconds: f64,
    pub coverage_cycles: f64,
    pub min_points: usize,
    pub max_points: usize,
    pub default_span_minutes: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            time_step_seconds: 30.0,
            coverage_cycles: 1.0,
            min_points: 60,
            max_points: 10_000,
            default_span_minutes: 120.0,
        }
    }
}

/// Offsets (minutes from epoch) at which one satellite is propagated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeOffsetPlan {
    epoch: EpochTime,
    step_minutes: f64,
    offsets: Vec<f64>,
}

impl TimeOffsetPlan {
    pub fn epoch(&self) -> EpochTime {
        self.epoch
    }

    pub fn step_minutes(&self) -> f64 {
        self.step_minutes
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn span_minutes(&self) -> f64 {
        self.offsets.last().copied().unwrap_or(0.0)
    }
}

/// Build the offset plan. With a period estimate the span covers
/// `coverage_cycles` orbits, otherwise `default_span_minutes`. The point
/// count is clamped to `[min_points, max_points]`.
pub fn plan(epoch: &EpochTime, period_minutes: Option<f64>, config: &PlannerConfig) -> TimeOffsetPlan {
    let step_minutes = config.time_step_seconds / 60.0;
    let span = period_minutes
        .filter(|p| p.is_finite() && *p > 0.0)
        .map(|p| p * config.coverage_cycles)
        .unwrap_or(config.default_span_minutes);

    // Tolerate float noise so 90 min / 1 min yields 90, not 89.
    let raw = (span / step_minutes + 1e-9).floor();
    let raw = if raw.is_finite() && raw > 0.0 { raw as usize } else { 0 };
    let count = raw.min(config.max_points).max(config.min_points);

    let offsets = (0..count).map(|i| i as f64 * step_minutes).collect();
    TimeOffsetPlan {
        epoch: *epoch,
        step_minutes,
        offsets,
    }
}
