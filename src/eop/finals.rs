use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::eop::{
    ApproximateEop, EarthOrientationProvider, EarthOrientationSample, EopError, EopParameters,
    EopProvenance,
};
use crate::epoch::modified_julian_date;

/// UT1-UTC steps larger than this between daily rows are leap seconds.
const LEAP_SECOND_JUMP_S: f64 = 0.5;

/// One daily row of an IERS `finals2000A` series (Bulletin A columns).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalsRow {
    pub mjd: f64,
    pub xp_arcsec: f64,
    pub xp_error_arcsec: f64,
    pub yp_arcsec: f64,
    pub yp_error_arcsec: f64,
    pub dut1_s: f64,
    pub dut1_error_s: f64,
    pub dx_mas: f64,
    pub dy_mas: f64,
    /// Row flagged as a prediction rather than an IERS determination.
    pub predicted: bool,
}

/// Immutable daily EOP series, sorted by MJD.
#[derive(Debug, Clone)]
pub struct FinalsTable {
    rows: Vec<FinalsRow>,
}

impl FinalsTable {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EopError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse fixed-column `finals2000A` text. Rows without polar motion or
    /// UT1-UTC (the far-future tail of the file) are skipped; missing
    /// nutation offsets read as zero.
    pub fn parse(content: &str) -> Result<Self, EopError> {
        let mut rows: Vec<FinalsRow> = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx + 1;
            let parse_err = |message: String| EopError::Parse {
                line: line_no,
                message,
            };

            let mjd = field(line, 8, 15)
                .ok_or_else(|| parse_err("missing MJD".to_string()))
                .and_then(|raw| {
                    raw.parse::<f64>()
                        .map_err(|_| parse_err(format!("invalid MJD {:?}", raw)))
                })?;

            let (Some(xp), Some(yp), Some(dut1)) =
                (field(line, 19, 27), field(line, 38, 46), field(line, 59, 68))
            else {
                continue;
            };

            let number = |raw: &str, name: &str| {
                raw.parse::<f64>()
                    .map_err(|_| parse_err(format!("invalid {} {:?}", name, raw)))
            };
            let optional = |start, end, name: &str| match field(line, start, end) {
                Some(raw) => number(raw, name),
                None => Ok(0.0),
            };

            let row = FinalsRow {
                mjd,
                xp_arcsec: number(xp, "PM-x")?,
                xp_error_arcsec: optional(28, 36, "PM-x error")?,
                yp_arcsec: number(yp, "PM-y")?,
                yp_error_arcsec: optional(47, 55, "PM-y error")?,
                dut1_s: number(dut1, "UT1-UTC")?,
                dut1_error_s: optional(69, 78, "UT1-UTC error")?,
                dx_mas: optional(98, 106, "dX")?,
                dy_mas: optional(117, 125, "dY")?,
                predicted: field(line, 58, 58) == Some("P"),
            };

            if let Some(last) = rows.last() {
                if row.mjd <= last.mjd {
                    return Err(parse_err(format!(
                        "MJD {} does not follow {}",
                        row.mjd, last.mjd
                    )));
                }
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(EopError::Empty);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[FinalsRow] {
        &self.rows
    }

    /// (first, last) MJD covered.
    pub fn span(&self) -> (f64, f64) {
        let first = self.rows.first().map_or(f64::NAN, |r| r.mjd);
        let last = self.rows.last().map_or(f64::NAN, |r| r.mjd);
        (first, last)
    }

    /// Linear interpolation between the daily rows bracketing `mjd`.
    pub fn interpolate(&self, mjd: f64) -> Result<EarthOrientationSample, EopError> {
        let (first, last) = self.span();
        if !(first..=last).contains(&mjd) {
            return Err(EopError::Unavailable { mjd, first, last });
        }

        let upper = self.rows.partition_point(|r| r.mjd <= mjd);
        let before = &self.rows[upper.saturating_sub(1)];
        let after = self.rows.get(upper).unwrap_or(before);

        let span = after.mjd - before.mjd;
        let frac = if span > 0.0 { (mjd - before.mjd) / span } else { 0.0 };
        let lerp = |a: f64, b: f64| a + (b - a) * frac;

        // A leap second between the rows makes UT1-UTC jump by a whole
        // second at the later row; interpolate on the pre-jump side.
        let jump = after.dut1_s - before.dut1_s;
        let after_dut1 = if jump.abs() > LEAP_SECOND_JUMP_S {
            after.dut1_s - jump.round()
        } else {
            after.dut1_s
        };

        Ok(EarthOrientationSample::Published {
            params: EopParameters {
                mjd,
                xp_arcsec: lerp(before.xp_arcsec, after.xp_arcsec),
                yp_arcsec: lerp(before.yp_arcsec, after.yp_arcsec),
                dut1_s: lerp(before.dut1_s, after_dut1),
                dx_mas: lerp(before.dx_mas, after.dx_mas),
                dy_mas: lerp(before.dy_mas, after.dy_mas),
            },
            dut1_error_s: before.dut1_error_s.max(after.dut1_error_s),
            pole_error_arcsec: before
                .xp_error_arcsec
                .max(after.xp_error_arcsec)
                .max(before.yp_error_arcsec.max(after.yp_error_arcsec)),
        })
    }
}

/// Trimmed, non-empty field at 1-indexed inclusive columns. Lines may be
/// shorter than the full record.
fn field(line: &str, start: usize, end: usize) -> Option<&str> {
    let end = end.min(line.len());
    line.get(start - 1..end)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Provider backed by a published series, falling back to
/// [`ApproximateEop`] outside its range.
#[derive(Debug, Clone)]
pub struct PublishedEop {
    table: Arc<FinalsTable>,
    fallback: ApproximateEop,
}

impl PublishedEop {
    pub fn new(table: FinalsTable) -> Self {
        Self {
            table: Arc::new(table),
            fallback: ApproximateEop,
        }
    }
}

impl EarthOrientationProvider for PublishedEop {
    fn sample_at(&self, instant: DateTime<Utc>) -> EarthOrientationSample {
        let mjd = modified_julian_date(instant);
        match self.table.interpolate(mjd) {
            Ok(sample) => sample,
            Err(e) => {
                log::debug!("{}; using approximate Earth orientation", e);
                self.fallback.sample(mjd, true)
            }
        }
    }

    fn provenance(&self) -> EopProvenance {
        EopProvenance::Published
    }
}
