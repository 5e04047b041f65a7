use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::elements::{checksum, OrbitalElementSet};
use crate::epoch::EpochError;

const TLE_LINE_LENGTH: usize = 69;
const MICROS_PER_DAY: f64 = 86_400_000_000.0;
const MJD_OFFSET: f64 = 2_400_000.5;

/// Absolute UTC instant of one element set's epoch.
///
/// The only way to obtain one is [`resolve`], so every time origin in the
/// crate is traceable back to element-set fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EpochTime {
    instant: DateTime<Utc>,
}

impl EpochTime {
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The instant `minutes` after the epoch, rounded to the microsecond.
    pub fn at_offset(&self, minutes: f64) -> DateTime<Utc> {
        let micros = (minutes * 60_000_000.0).round() as i64;
        self.instant + Duration::microseconds(micros)
    }

    pub fn julian_date(&self) -> f64 {
        julian_date(self.instant)
    }

    /// Days since 1949 December 31 00:00 UT, the deep-space time base.
    pub fn days_since_1950(&self) -> f64 {
        self.julian_date() - 2_433_281.5
    }
}

/// Julian date of a UTC instant.
pub fn julian_date(instant: DateTime<Utc>) -> f64 {
    modified_julian_date(instant) + MJD_OFFSET
}

pub fn modified_julian_date(instant: DateTime<Utc>) -> f64 {
    // 1970-01-01 is MJD 40587
    let micros = instant.timestamp_micros() as f64;
    40_587.0 + micros / MICROS_PER_DAY
}

/// Two-digit year rule used by element sets: 00-56 are 2000-2056 and
/// 57-99 are 1957-1999.
pub fn full_year(two_digit: u32) -> i32 {
    if two_digit < 57 {
        2000 + two_digit as i32
    } else {
        1900 + two_digit as i32
    }
}

/// Derive the epoch of an element set from its own lines.
pub fn resolve(set: &OrbitalElementSet) -> Result<EpochTime, EpochError> {
    check_line(&set.line1, 1)?;
    check_line(&set.line2, 2)?;

    let line1 = set.line1.trim_end();
    // Columns 19-20 and 21-32; check_line guarantees the length.
    let year_field = &line1[18..20];
    let day_field = &line1[20..32];

    if !year_field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EpochError::InvalidYear(year_field.to_string()));
    }
    let year = full_year(
        year_field
            .parse()
            .map_err(|_| EpochError::InvalidYear(year_field.to_string()))?,
    );

    let day_trimmed = day_field.trim();
    if day_trimmed.is_empty()
        || !day_trimmed.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        || day_trimmed.bytes().filter(|&b| b == b'.').count() > 1
    {
        return Err(EpochError::InvalidDay(day_field.to_string()));
    }
    let day: f64 = day_trimmed
        .parse()
        .map_err(|_| EpochError::InvalidDay(day_field.to_string()))?;

    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| EpochError::InvalidYear(year_field.to_string()))?;
    let days_in_year = NaiveDate::from_ymd_opt(year, 12, 31).map_or(365, |d| d.ordinal());
    let limit = days_in_year + 1;
    if !(1.0..limit as f64).contains(&day) {
        return Err(EpochError::DayOutOfRange { year, day, limit });
    }

    let micros = ((day - 1.0) * MICROS_PER_DAY).round() as i64;
    let midnight = jan1
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| EpochError::InvalidYear(year_field.to_string()))?;
    let instant = Utc.from_utc_datetime(&midnight) + Duration::microseconds(micros);

    log::debug!("Resolved epoch for {} ({}): {}", set.name, set.norad_id, instant);
    Ok(EpochTime { instant })
}

fn check_line(line: &str, number: u8) -> Result<(), EpochError> {
    let line = line.trim_end();
    if line.len() != TLE_LINE_LENGTH || !line.is_ascii() {
        return Err(EpochError::BadLength {
            line: number,
            len: line.chars().count(),
        });
    }
    let prefix = [b'0' + number, b' '];
    if line.as_bytes()[..2] != prefix {
        return Err(EpochError::BadLineNumber { line: number });
    }
    let found = line.as_bytes()[68] as char;
    let computed = checksum(line);
    if found.to_digit(10) != Some(computed as u32) {
        return Err(EpochError::ChecksumMismatch {
            line: number,
            computed,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn set(line1: &str, line2: &str) -> OrbitalElementSet {
        OrbitalElementSet::from_tle(None, line1, line2).unwrap()
    }

    const L1: &str = "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753";
    const L2: &str = "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";

    #[test]
    fn resolves_vallado_epoch() {
        let epoch = resolve(&set(L1, L2)).unwrap();
        let t = epoch.instant();
        assert_eq!((t.year(), t.month(), t.day()), (2000, 6, 27));
        assert_eq!((t.hour(), t.minute(), t.second()), (18, 50, 19));
        // 0.78495062 d = 67819.733568 s
        assert_eq!(t.timestamp_subsec_micros(), 733_568);
        assert!((epoch.julian_date() - 2_451_723.28495062).abs() < 1e-8);
    }

    #[test]
    fn resolution_is_deterministic() {
        let s = set(L1, L2);
        assert_eq!(resolve(&s).unwrap(), resolve(&s).unwrap());
    }

    #[test]
    fn two_digit_year_rule() {
        assert_eq!(full_year(0), 2000);
        assert_eq!(full_year(24), 2024);
        assert_eq!(full_year(56), 2056);
        assert_eq!(full_year(57), 1957);
        assert_eq!(full_year(99), 1999);

        let epoch = resolve(&set(
            "1 99999U 24001A   57001.00000000  .00000000  00000-0  00000+0 0  9994",
            "2 99999  51.6000   0.0000 0001000   0.0000   0.0000 15.50000000    12",
        ))
        .unwrap();
        assert_eq!(epoch.instant().year(), 1957);
        assert_eq!(epoch.instant().ordinal(), 1);
    }

    #[test]
    fn leap_day_366_accepted_in_leap_year() {
        let epoch = resolve(&set(
            "1 99998U 24001A   56366.50000000  .00000000  00000-0  00000+0 0  9991",
            "2 99998  51.6000   0.0000 0001000   0.0000   0.0000 15.50000000    11",
        ))
        .unwrap();
        let t = epoch.instant();
        assert_eq!((t.year(), t.month(), t.day(), t.hour()), (2056, 12, 31, 12));
    }

    #[test]
    fn corrupted_checksum_rejected() {
        let corrupted = format!("{}0", &L1[..68]);
        let err = resolve(&set(&corrupted, L2)).unwrap_err();
        assert!(matches!(err, EpochError::ChecksumMismatch { line: 1, computed: 3, .. }));
        assert_eq!(err.reason_code(), crate::reason::ReasonCode::MalformedEpoch);

        let corrupted2 = format!("{}0", &L2[..68]);
        assert!(matches!(
            resolve(&set(L1, &corrupted2)),
            Err(EpochError::ChecksumMismatch { line: 2, .. })
        ));
    }

    #[test]
    fn short_line_rejected() {
        let mut s = set(L1, L2);
        s.line1.truncate(68);
        assert!(matches!(resolve(&s), Err(EpochError::BadLength { line: 1, len: 68 })));
    }

    #[test]
    fn offsets_round_to_microseconds() {
        let epoch = resolve(&set(L1, L2)).unwrap();
        let later = epoch.at_offset(1.5);
        assert_eq!((later - epoch.instant()).num_microseconds(), Some(90_000_000));
        assert!((epoch.days_since_1950() - (2_451_723.28495062 - 2_433_281.5)).abs() < 1e-8);
    }
}
