use std::f64::consts::TAU;

use chrono::{DateTime, Utc};

use crate::epoch::modified_julian_date;

const MJD_J2000: f64 = 51_544.5;
const DAYS_PER_CENTURY: f64 = 36_525.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const TT_MINUS_TAI_S: f64 = 32.184;

/// (MJD of 00:00 UTC when the value takes effect, TAI-UTC seconds).
const LEAP_SECONDS: [(f64, f64); 28] = [
    (41_317.0, 10.0), // 1972-01-01
    (41_499.0, 11.0), // 1972-07-01
    (41_683.0, 12.0), // 1973-01-01
    (42_048.0, 13.0), // 1974-01-01
    (42_413.0, 14.0), // 1975-01-01
    (42_778.0, 15.0), // 1976-01-01
    (43_144.0, 16.0), // 1977-01-01
    (43_509.0, 17.0), // 1978-01-01
    (43_874.0, 18.0), // 1979-01-01
    (44_239.0, 19.0), // 1980-01-01
    (44_786.0, 20.0), // 1981-07-01
    (45_151.0, 21.0), // 1982-07-01
    (45_516.0, 22.0), // 1983-07-01
    (46_247.0, 23.0), // 1985-07-01
    (47_161.0, 24.0), // 1988-01-01
    (47_892.0, 25.0), // 1990-01-01
    (48_257.0, 26.0), // 1991-01-01
    (48_804.0, 27.0), // 1992-07-01
    (49_169.0, 28.0), // 1993-07-01
    (49_534.0, 29.0), // 1994-07-01
    (50_083.0, 30.0), // 1996-01-01
    (50_630.0, 31.0), // 1997-07-01
    (51_179.0, 32.0), // 1999-01-01
    (53_736.0, 33.0), // 2006-01-01
    (54_832.0, 34.0), // 2009-01-01
    (56_109.0, 35.0), // 2012-07-01
    (57_204.0, 36.0), // 2015-07-01
    (57_754.0, 37.0), // 2017-01-01
];

/// TAI-UTC in seconds at a UTC modified Julian date. Before 1972 the
/// initial 10 s is returned.
pub fn tai_minus_utc(mjd_utc: f64) -> f64 {
    let idx = LEAP_SECONDS.partition_point(|&(mjd, _)| mjd <= mjd_utc);
    if idx == 0 {
        LEAP_SECONDS[0].1
    } else {
        LEAP_SECONDS[idx - 1].1
    }
}

/// Time arguments of the frame models at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeArguments {
    pub mjd_utc: f64,
    /// Julian centuries of TT since J2000.0.
    pub tt_centuries: f64,
    /// Days of UT1 since J2000.0.
    pub ut1_days: f64,
}

impl TimeArguments {
    pub fn new(instant: DateTime<Utc>, dut1_s: f64) -> Self {
        let mjd_utc = modified_julian_date(instant);
        let tt_offset = (tai_minus_utc(mjd_utc) + TT_MINUS_TAI_S) / SECONDS_PER_DAY;
        Self {
            mjd_utc,
            tt_centuries: (mjd_utc - MJD_J2000 + tt_offset) / DAYS_PER_CENTURY,
            ut1_days: mjd_utc - MJD_J2000 + dut1_s / SECONDS_PER_DAY,
        }
    }

    /// UT1 Julian date.
    pub fn jd_ut1(&self) -> f64 {
        self.ut1_days + 2_451_545.0
    }

    /// Earth rotation angle (IAU 2000), radians in [0, 2π).
    pub fn earth_rotation_angle(&self) -> f64 {
        let turns = self.ut1_days.rem_euclid(1.0) + 0.779_057_273_264_0
            + 0.002_737_811_911_354_48 * self.ut1_days;
        (TAU * turns).rem_euclid(TAU)
    }
}
