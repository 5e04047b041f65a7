use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::batch::BatchConfig;
use crate::eop::EarthOrientationSource;
use crate::epoch::PlannerConfig;
use crate::frames::FrameConfig;
use crate::propagator::GravityModel;
use crate::validate::ValidationConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Run configuration. Keys are camelCase; snake_case spellings are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_time_step", alias = "time_step_seconds")]
    pub time_step_seconds: f64,
    #[serde(default = "default_coverage_cycles", alias = "coverage_cycles")]
    pub coverage_cycles: f64,
    #[serde(default = "default_min_points", alias = "min_time_series_points")]
    pub min_time_series_points: usize,
    #[serde(default = "default_max_points", alias = "max_time_series_points")]
    pub max_time_series_points: usize,
    #[serde(default = "default_span", alias = "default_span_minutes")]
    pub default_span_minutes: f64,
    #[serde(default, alias = "earth_orientation_source")]
    pub earth_orientation_source: EarthOrientationSource,
    #[serde(default = "default_tolerance", alias = "convergence_tolerance")]
    pub convergence_tolerance: f64,
    #[serde(default = "default_max_iterations", alias = "max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_kepler_ratio", alias = "kepler_tolerance_ratio")]
    pub kepler_tolerance_ratio: f64,
    #[serde(default, alias = "gravity_model")]
    pub gravity_model: GravityModel,
    #[serde(default = "default_min_altitude", alias = "min_altitude_km")]
    pub min_altitude_km: f64,
    #[serde(default = "default_max_altitude", alias = "max_altitude_km")]
    pub max_altitude_km: f64,
    #[serde(default)]
    pub workers: Option<usize>,
    /// Human-readable duration such as `30s` or `2m`.
    #[serde(default, deserialize_with = "deserialize_duration")]
    pub deadline: Option<Duration>,
    #[serde(default = "default_include_itrs", alias = "include_itrs")]
    pub include_itrs: bool,
}

fn default_time_step() -> f64 {
    30.0
}

fn default_coverage_cycles() -> f64 {
    1.0
}

fn default_min_points() -> usize {
    60
}

fn default_max_points() -> usize {
    10_000
}

fn default_span() -> f64 {
    120.0
}

fn default_tolerance() -> f64 {
    1e-12
}

fn default_max_iterations() -> u32 {
    20
}

fn default_kepler_ratio() -> f64 {
    0.03
}

fn default_min_altitude() -> f64 {
    100.0
}

fn default_max_altitude() -> f64 {
    3_000.0
}

fn default_include_itrs() -> bool {
    true
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom))
        .transpose()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_step_seconds: default_time_step(),
            coverage_cycles: default_coverage_cycles(),
            min_time_series_points: default_min_points(),
            max_time_series_points: default_max_points(),
            default_span_minutes: default_span(),
            earth_orientation_source: EarthOrientationSource::default(),
            convergence_tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            kepler_tolerance_ratio: default_kepler_ratio(),
            gravity_model: GravityModel::default(),
            min_altitude_km: default_min_altitude(),
            max_altitude_km: default_max_altitude(),
            workers: None,
            deadline: None,
            include_itrs: default_include_itrs(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if !(self.time_step_seconds.is_finite() && self.time_step_seconds > 0.0) {
            return invalid(format!("timeStepSeconds must be positive, got {}", self.time_step_seconds));
        }
        if !(self.coverage_cycles.is_finite() && self.coverage_cycles > 0.0) {
            return invalid(format!("coverageCycles must be positive, got {}", self.coverage_cycles));
        }
        if !(self.default_span_minutes.is_finite() && self.default_span_minutes > 0.0) {
            return invalid(format!("defaultSpanMinutes must be positive, got {}", self.default_span_minutes));
        }
        if self.min_time_series_points == 0 || self.min_time_series_points > self.max_time_series_points {
            return invalid(format!(
                "time series point bounds [{}, {}] are empty",
                self.min_time_series_points, self.max_time_series_points
            ));
        }
        if !(self.convergence_tolerance.is_finite() && self.convergence_tolerance > 0.0) {
            return invalid(format!("convergenceTolerance must be positive, got {}", self.convergence_tolerance));
        }
        if self.max_iterations == 0 {
            return invalid("maxIterations must be at least 1".to_string());
        }
        if !(self.kepler_tolerance_ratio.is_finite() && self.kepler_tolerance_ratio >= 0.0) {
            return invalid(format!("keplerToleranceRatio must be non-negative, got {}", self.kepler_tolerance_ratio));
        }
        if !(self.min_altitude_km < self.max_altitude_km) {
            return invalid(format!(
                "minAltitudeKm {} must be below maxAltitudeKm {}",
                self.min_altitude_km, self.max_altitude_km
            ));
        }
        if self.workers == Some(0) {
            return invalid("workers must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn planner(&self) -> PlannerConfig {
        PlannerConfig {
            time_step_seconds: self.time_step_seconds,
            coverage_cycles: self.coverage_cycles,
            min_points: self.min_time_series_points,
            max_points: self.max_time_series_points,
            default_span_minutes: self.default_span_minutes,
        }
    }

    pub fn frames(&self) -> FrameConfig {
        FrameConfig {
            convergence_tolerance: self.convergence_tolerance,
            max_iterations: self.max_iterations,
        }
    }

    pub fn validation(&self) -> ValidationConfig {
        ValidationConfig {
            kepler_tolerance_ratio: self.kepler_tolerance_ratio,
            min_altitude_km: self.min_altitude_km,
            max_altitude_km: self.max_altitude_km,
            gravity: self.gravity_model,
            ..ValidationConfig::default()
        }
    }

    pub fn batch(&self) -> BatchConfig {
        BatchConfig {
            planner: self.planner(),
            frames: self.frames(),
            validation: self.validation(),
            gravity: self.gravity_model,
            workers: self.workers,
            deadline: self.deadline,
            include_itrs: self.include_itrs,
        }
    }
}
