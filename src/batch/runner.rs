use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::batch::{BatchError, BatchOutput, RunSummary, SatelliteFailure, SatelliteSeries, StatePoint};
use crate::elements::OrbitalElementSet;
use crate::eop::EarthOrientationProvider;
use crate::epoch::{plan, resolve, PlannerConfig};
use crate::frames::{FrameConfig, FrameTransformer, PrecisionMethod};
use crate::propagator::{GravityModel, Propagator};
use crate::reason::ReasonCode;
use crate::validate::{PrecisionValidator, ValidationConfig, ValidationIssue, ValidationReport};

#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    pub planner: PlannerConfig,
    pub frames: FrameConfig,
    pub validation: ValidationConfig,
    pub gravity: GravityModel,
    /// Worker threads; `None` uses the available parallelism.
    pub workers: Option<usize>,
    /// Satellites not yet started when this elapses are skipped.
    pub deadline: Option<Duration>,
    /// Keep the intermediate ITRS state of every point.
    pub include_itrs: bool,
}

pub struct BatchRunner {
    config: BatchConfig,
    eop: Arc<dyn EarthOrientationProvider>,
    transformer: FrameTransformer,
    validator: PrecisionValidator,
    pool: ThreadPool,
}

impl BatchRunner {
    pub fn new(config: BatchConfig, eop: Arc<dyn EarthOrientationProvider>) -> Result<Self, BatchError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers.unwrap_or(0))
            .thread_name(|i| format!("orbit-worker-{i}"))
            .build()?;
        Ok(Self {
            transformer: FrameTransformer::new(&config.frames),
            validator: PrecisionValidator::new(&config.validation),
            config,
            eop,
            pool,
        })
    }

    /// Runs every element set through the pipeline. Failures are isolated
    /// per satellite and reported in the summary.
    pub fn run(&self, sets: &[OrbitalElementSet]) -> BatchOutput {
        let started = Instant::now();
        let deadline = self.config.deadline.map(|d| started + d);
        let deadline_hit = AtomicBool::new(false);

        log::info!(
            "Processing {} satellites on {} workers (EOP: {:?})",
            sets.len(),
            self.pool.current_num_threads(),
            self.eop.provenance()
        );

        let results: Vec<Result<SatelliteSeries, SatelliteFailure>> = self.pool.install(|| {
            sets.par_iter()
                .map(|set| {
                    if deadline.is_some_and(|at| Instant::now() >= at) {
                        deadline_hit.store(true, Ordering::Relaxed);
                        return Err(failure(set, ReasonCode::DeadlineExceeded, "run deadline expired before dispatch"));
                    }
                    self.process(set)
                })
                .collect()
        });

        let mut summary = RunSummary {
            attempted: sets.len(),
            deadline_hit: deadline_hit.load(Ordering::Relaxed),
            ..RunSummary::default()
        };
        let mut series = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(s) => {
                    summary.total_points += s.points.len();
                    summary.dropped_points += s.dropped_points;
                    summary.warnings += s.report.reasons.iter().filter(|r| r.code.is_recoverable()).count();
                    series.push(s);
                }
                Err(f) => {
                    log::warn!("Skipping {} ({}): {} {}", f.name, f.norad_id, f.reason, f.message);
                    summary.failures.push(f);
                }
            }
        }
        series.sort_by_key(|s| s.norad_id);
        summary.failures.sort_by_key(|f| f.norad_id);
        summary.succeeded = series.len();
        summary.failed = summary.failures.len();
        summary.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        log::info!(
            "Run finished: {}/{} satellites, {} points ({} dropped), {} failures in {} ms",
            summary.succeeded,
            summary.attempted,
            summary.total_points,
            summary.dropped_points,
            summary.failed,
            summary.elapsed_ms
        );

        BatchOutput { series, summary }
    }

    /// Full pipeline for one satellite.
    pub fn process(&self, set: &OrbitalElementSet) -> Result<SatelliteSeries, SatelliteFailure> {
        let epoch = resolve(set).map_err(|e| failure(set, e.reason_code(), e.to_string()))?;
        let offsets = plan(&epoch, set.elements.period_minutes(), &self.config.planner);
        let propagator =
            Propagator::new(set, &epoch, self.config.gravity).map_err(|e| failure(set, e.reason_code(), e.to_string()))?;
        let envelope = self.validator.envelope(&set.elements).ok_or_else(|| {
            failure(set, ReasonCode::PropagationDivergence, "element set describes no bound orbit")
        })?;

        log::debug!(
            "{} ({}): epoch {}, {:?}, {} offsets",
            set.name,
            set.norad_id,
            epoch.instant(),
            propagator.regime(),
            offsets.len()
        );

        let mut report = ValidationReport::pass();
        let mut points = Vec::with_capacity(offsets.len());
        let mut dropped_points = 0;
        let mut substituted = 0;
        let mut best_effort = 0;

        for &offset in offsets.offsets() {
            let state = propagator
                .propagate(offset)
                .map_err(|e| failure(set, e.reason_code(), e.to_string()))?;
            let sample = self.eop.sample_at(state.timestamp);
            if sample.is_substituted() {
                substituted += 1;
            }
            let (itrs, geodetic) = self.transformer.transform_with_itrs(&state, &sample);

            if let Err(issue) = self.validator.check_point(&state, geodetic.altitude_m, &envelope) {
                dropped_points += 1;
                report.push(issue);
                continue;
            }
            if geodetic.precision == PrecisionMethod::BestEffort {
                best_effort += 1;
            }
            points.push(StatePoint {
                state,
                itrs: self.config.include_itrs.then_some(itrs),
                geodetic,
            });
        }

        if points.is_empty() {
            return Err(failure(
                set,
                ReasonCode::NoValidPoints,
                format!("all {dropped_points} points failed physical bounds checks"),
            ));
        }
        if substituted > 0 {
            report.push(ValidationIssue::warning(
                ReasonCode::EarthOrientationUnavailable,
                format!("{substituted} points used approximate Earth orientation"),
            ));
        }
        if best_effort > 0 {
            report.push(ValidationIssue::warning(
                ReasonCode::EllipsoidalConvergenceFailure,
                format!("{best_effort} points did not converge to geodetic coordinates"),
            ));
        }

        let states: Vec<_> = points.iter().map(|p| p.state).collect();
        for issue in self.validator.validate(&states, set.elements.mean_motion).reasons {
            report.push(issue);
        }

        Ok(SatelliteSeries {
            norad_id: set.norad_id,
            name: set.name.clone(),
            constellation: set.constellation.clone(),
            regime: propagator.regime(),
            points,
            dropped_points,
            report,
        })
    }
}

fn failure(set: &OrbitalElementSet, reason: ReasonCode, message: impl Into<String>) -> SatelliteFailure {
    SatelliteFailure {
        norad_id: set.norad_id,
        name: set.name.clone(),
        reason,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eop::ApproximateEop;
    use crate::propagator::Regime;
    use crate::validate::ValidationStatus;

    const L1: &str = "1 44713U 19074A   24015.25000000  .00001200  00000-0  82000-4 0  9996";
    const L2: &str = "2 44713  53.0540 120.0000 0001400  90.0000 270.0000 15.06400000 23454";

    fn runner(config: BatchConfig) -> BatchRunner {
        BatchRunner::new(config, Arc::new(ApproximateEop)).unwrap()
    }

    #[test]
    fn processes_leo_satellite() {
        let set = OrbitalElementSet::from_tle(Some("STARLINK-1007".into()), L1, L2).unwrap();
        let mut config = BatchConfig::default();
        config.planner.time_step_seconds = 60.0;
        config.include_itrs = true;
        let series = runner(config).process(&set).unwrap();

        assert_eq!(series.points.len(), 95);
        assert_eq!(series.dropped_points, 0);
        assert_eq!(series.constellation.as_deref(), Some("STARLINK"));
        assert_eq!(series.report.status, ValidationStatus::Pass, "{:?}", series.report.reasons);
        for point in &series.points {
            assert!(point.itrs.is_some());
            let altitude_km = point.geodetic.altitude_m / 1000.0;
            assert!((500.0..600.0).contains(&altitude_km), "{altitude_km}");
        }
    }

    #[test]
    fn medium_orbit_series_is_complete() {
        let set = OrbitalElementSet::from_tle(
            None,
            "1 28129U 03058A   24015.50000000 -.00000030  00000-0  00000+0 0  9998",
            "2 28129  55.1000 120.2000 0085000 250.0000 109.5000  2.00563000 12341",
        )
        .unwrap();
        let series = runner(BatchConfig::default()).process(&set).unwrap();
        assert_eq!(series.regime, Regime::LongPeriod);
        assert_eq!(series.dropped_points, 0, "{:?}", series.report.reasons);
        assert_eq!(series.points.len(), 1435);
        assert!(!series.report.has(ReasonCode::PhysicalBoundsViolation));
        for point in &series.points {
            let altitude_km = point.geodetic.altitude_m / 1000.0;
            assert!((19_500.0..21_000.0).contains(&altitude_km), "{altitude_km}");
        }
    }

    #[test]
    fn eccentric_orbit_keeps_apogee_arc() {
        let set = OrbitalElementSet::from_tle(
            None,
            "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753",
            "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667",
        )
        .unwrap();
        let series = runner(BatchConfig::default()).process(&set).unwrap();
        assert_eq!(series.dropped_points, 0, "{:?}", series.report.reasons);
        let highest = series
            .points
            .iter()
            .map(|p| p.geodetic.altitude_m / 1000.0)
            .fold(f64::MIN, f64::max);
        assert!(highest > 3_000.0, "{highest}");
    }

    #[test]
    fn decaying_satellite_fails_alone() {
        let healthy = OrbitalElementSet::from_tle(None, L1, L2).unwrap();
        let decaying = OrbitalElementSet::from_tle(
            None,
            "1 44799U 19074Z   24015.25000000  .00500000  00000-0  80000-0 0  9996",
            "2 44799  51.6000   0.0000 0100000  90.0000   0.0000 15.90000000 23456",
        )
        .unwrap();
        let output = runner(BatchConfig::default()).run(&[decaying, healthy]);

        assert_eq!(output.summary.attempted, 2);
        assert_eq!(output.summary.succeeded, 1);
        assert_eq!(output.summary.count(ReasonCode::PropagationDivergence), 1);
        let failure = &output.summary.failures[0];
        assert_eq!(failure.norad_id, 44799);
        assert!(failure.message.contains("decayed"), "{}", failure.message);
        assert_eq!(output.series[0].norad_id, 44713);
        assert_eq!(output.series[0].dropped_points, 0);
    }

    #[test]
    fn expired_deadline_skips_everything() {
        let set = OrbitalElementSet::from_tle(None, L1, L2).unwrap();
        let config = BatchConfig {
            deadline: Some(Duration::ZERO),
            ..BatchConfig::default()
        };
        let output = runner(config).run(&[set.clone(), set]);
        assert!(output.series.is_empty());
        assert!(output.summary.deadline_hit);
        assert_eq!(output.summary.count(ReasonCode::DeadlineExceeded), 2);
        assert_eq!(output.summary.failed, 2);
    }
}
