use serde::Serialize;

use crate::elements::parsing::{column, parse_f64, parse_implied_decimal};
use crate::elements::ElementError;

pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Mean orbital elements as published in the element lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanElements {
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub eccentricity: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    /// Revolutions per day.
    pub mean_motion: f64,
    /// First derivative of mean motion divided by two (rev/day²).
    pub mean_motion_dot: f64,
    /// Second derivative of mean motion divided by six (rev/day³).
    pub mean_motion_ddot: f64,
    /// B* drag term (1/Earth radii).
    pub bstar: f64,
}

impl MeanElements {
    /// Orbital period implied by the mean motion, in minutes.
    pub fn period_minutes(&self) -> Option<f64> {
        (self.mean_motion.is_finite() && self.mean_motion > 0.0)
            .then(|| MINUTES_PER_DAY / self.mean_motion)
    }
}

/// One satellite's element set. The raw lines are kept because the epoch is
/// only ever derived from them, by [`crate::epoch::resolve`].
#[derive(Debug, Clone, Serialize)]
pub struct OrbitalElementSet {
    pub norad_id: u32,
    pub name: String,
    pub constellation: Option<String>,
    pub line1: String,
    pub line2: String,
    pub elements: MeanElements,
}

impl OrbitalElementSet {
    /// Build an element set from its two lines. Only the structured element
    /// fields are parsed here; length, checksum and epoch checks happen when
    /// the epoch is resolved so that a bad set is reported rather than lost.
    pub fn from_tle(name: Option<String>, line1: &str, line2: &str) -> Result<Self, ElementError> {
        let line1 = line1.trim_end();
        let line2 = line2.trim_end();
        if !line1.is_ascii() {
            return Err(ElementError::NotAscii { line: 1 });
        }
        if !line2.is_ascii() {
            return Err(ElementError::NotAscii { line: 2 });
        }

        let id1 = parse_catalog_number(column(line1, 1, 3, 7, "catalog number")?)?;
        let id2 = parse_catalog_number(column(line2, 2, 3, 7, "catalog number")?)?;
        if id1 != id2 {
            return Err(ElementError::IdMismatch(id1, id2));
        }

        let eccentricity_field = column(line2, 2, 27, 33, "eccentricity")?;
        let elements = MeanElements {
            mean_motion_dot: parse_f64(column(line1, 1, 34, 43, "ndot")?, "ndot")?,
            mean_motion_ddot: parse_implied_decimal(column(line1, 1, 45, 52, "nddot")?, "nddot")?,
            bstar: parse_implied_decimal(column(line1, 1, 54, 61, "bstar")?, "bstar")?,
            inclination_deg: parse_f64(column(line2, 2, 9, 16, "inclination")?, "inclination")?,
            raan_deg: parse_f64(column(line2, 2, 18, 25, "raan")?, "raan")?,
            eccentricity: parse_f64(&format!("0.{}", eccentricity_field.trim()), "eccentricity")?,
            arg_perigee_deg: parse_f64(
                column(line2, 2, 35, 42, "argument of perigee")?,
                "argument of perigee",
            )?,
            mean_anomaly_deg: parse_f64(column(line2, 2, 44, 51, "mean anomaly")?, "mean anomaly")?,
            mean_motion: parse_f64(column(line2, 2, 53, 63, "mean motion")?, "mean motion")?,
        };

        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("NORAD {}", id1));
        let constellation = constellation_from_name(&name);

        Ok(OrbitalElementSet {
            norad_id: id1,
            name,
            constellation,
            line1: line1.to_string(),
            line2: line2.to_string(),
            elements,
        })
    }

    pub fn with_constellation(mut self, constellation: impl Into<String>) -> Self {
        self.constellation = Some(constellation.into());
        self
    }
}

fn parse_catalog_number(raw: &str) -> Result<u32, ElementError> {
    raw.trim()
        .parse()
        .map_err(|_| ElementError::InvalidField {
            field: "catalog number",
            value: raw.to_string(),
        })
}

/// "STARLINK-1007" → "STARLINK", "ONEWEB-0012" → "ONEWEB".
fn constellation_from_name(name: &str) -> Option<String> {
    let prefix = name.split(['-', ' ', '_']).next()?.trim();
    let is_tag = prefix.len() >= 3
        && prefix.chars().any(|c| c.is_ascii_alphabetic())
        && prefix != name
        && prefix != "NORAD";
    is_tag.then(|| prefix.to_ascii_uppercase())
}
