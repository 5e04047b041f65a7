use std::f64::consts::TAU;

use chrono::{DateTime, Utc};

use crate::eop::{EarthOrientationProvider, EarthOrientationSample, EopParameters, EopProvenance};
use crate::epoch::modified_julian_date;

const MJD_J2000: f64 = 51_544.5;
/// Phase origin of the annual and Chandler terms (2024-01-01).
const MJD_PHASE_REF: f64 = 60_310.0;
const CHANDLER_PERIOD_DAYS: f64 = 435.0;

/// Analytic Earth orientation model used when no published series is
/// available: the IERS secular mean pole with annual and Chandler wobble
/// terms, and UT1-UTC reduced to the seasonal UT2-UT1 variation.
///
/// Polar motion is good to a few tenths of an arcsecond and UT1-UTC can be
/// wrong by up to the 0.9 s leap-second tolerance; accuracy estimates take
/// both into account.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateEop;

impl ApproximateEop {
    pub fn parameters_at(&self, mjd: f64) -> EopParameters {
        let years = (mjd - MJD_J2000) / 365.25;
        // Secular pole, milliarcseconds.
        let xs = 55.0 + 1.677 * years;
        let ys = 320.5 + 3.460 * years;

        let a = TAU * (mjd - MJD_PHASE_REF) / 365.25;
        let c = TAU * (mjd - MJD_PHASE_REF) / CHANDLER_PERIOD_DAYS;
        let x_wobble = 0.080 * a.cos() - 0.035 * a.sin() + 0.030 * c.cos() + 0.050 * c.sin();
        let y_wobble = -0.030 * a.cos() - 0.075 * a.sin() + 0.050 * c.cos() - 0.030 * c.sin();

        EopParameters {
            mjd,
            xp_arcsec: xs / 1000.0 + x_wobble,
            yp_arcsec: ys / 1000.0 + y_wobble,
            dut1_s: -seasonal_ut2_minus_ut1(mjd),
            dx_mas: 0.0,
            dy_mas: 0.0,
        }
    }

    pub(crate) fn sample(&self, mjd: f64, substituted: bool) -> EarthOrientationSample {
        EarthOrientationSample::Approximated {
            params: self.parameters_at(mjd),
            substituted,
        }
    }
}

impl EarthOrientationProvider for ApproximateEop {
    fn sample_at(&self, instant: DateTime<Utc>) -> EarthOrientationSample {
        self.sample(modified_julian_date(instant), false)
    }

    fn provenance(&self) -> EopProvenance {
        EopProvenance::Approximated
    }
}

/// Conventional seasonal variation UT2-UT1 in seconds.
fn seasonal_ut2_minus_ut1(mjd: f64) -> f64 {
    let besselian = 2000.0 + (mjd - 51_544.03) / 365.2422;
    let phase = TAU * besselian.fract();
    0.022 * phase.sin() - 0.012 * phase.cos() - 0.006 * (2.0 * phase).sin()
        + 0.007 * (2.0 * phase).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn samples_are_tagged_approximated() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        let sample = ApproximateEop.sample_at(instant);
        assert_eq!(sample.provenance(), EopProvenance::Approximated);
        assert!(!sample.is_substituted());
        let p = sample.params();
        assert!(p.xp_arcsec.abs() < 0.5, "xp {}", p.xp_arcsec);
        assert!(p.yp_arcsec.abs() < 0.7, "yp {}", p.yp_arcsec);
        assert!(p.dut1_s.abs() < 0.05);
        assert_eq!((p.dx_mas, p.dy_mas), (0.0, 0.0));
    }

    #[test]
    fn seasonal_term_is_bounded() {
        for day in 0..366 {
            assert!(seasonal_ut2_minus_ut1(60_310.0 + day as f64).abs() < 0.05);
        }
    }
}
