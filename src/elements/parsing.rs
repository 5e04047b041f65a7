use crate::elements::ElementError;

/// Modulo-10 TLE checksum over the first 68 columns: digits count their
/// value, minus signs count one, everything else zero.
pub fn checksum(line: &str) -> u8 {
    let sum: u32 = line
        .bytes()
        .take(68)
        .map(|b| match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

/// Parse multi-satellite TLE content into `(name, line1, line2)` triples.
/// Accepts both the 2-line and the 3-line (named) layout; unknown lines are
/// skipped.
pub fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            let name = lines[i].trim().trim_start_matches("0 ").to_string();
            result.push((Some(name), lines[i + 1].to_string(), lines[i + 2].to_string()));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}

/// Fixed-column field, 1-indexed inclusive like the format documentation.
pub(crate) fn column<'a>(
    line: &'a str,
    line_number: u8,
    start: usize,
    end: usize,
    field: &'static str,
) -> Result<&'a str, ElementError> {
    line.get(start - 1..end).ok_or(ElementError::Truncated {
        line: line_number,
        field,
        len: line.len(),
    })
}

pub(crate) fn parse_f64(raw: &str, field: &'static str) -> Result<f64, ElementError> {
    let trimmed = raw.trim();
    let normalized = match trimmed.strip_prefix('-').or_else(|| trimmed.strip_prefix('+')) {
        // ".00016717" and "-.00002182" are both legal first-derivative fields
        Some(rest) if rest.starts_with('.') => format!("{}0{}", &trimmed[..1], rest),
        _ if trimmed.starts_with('.') => format!("0{}", trimmed),
        _ => trimmed.to_string(),
    };
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ElementError::InvalidField {
            field,
            value: raw.to_string(),
        })
}

/// Fields such as B* are written as a signed mantissa with an implied
/// leading decimal point followed by a signed power of ten: ` 10270-3`
/// is 0.10270e-3.
pub(crate) fn parse_implied_decimal(raw: &str, field: &'static str) -> Result<f64, ElementError> {
    let invalid = || ElementError::InvalidField {
        field,
        value: raw.to_string(),
    };
    let s = raw.trim();
    if s.is_empty() {
        return Ok(0.0);
    }

    let (sign, body) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let (mantissa, exponent) = match body.rfind(['-', '+']) {
        Some(idx) if idx > 0 => (&body[..idx], &body[idx..]),
        _ => (body, "0"),
    };
    let mantissa = mantissa.trim();
    if mantissa.is_empty() || !mantissa.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let mantissa: f64 = format!("0.{}", mantissa).parse().map_err(|_| invalid())?;
    let exponent: i32 = exponent.trim().parse().map_err(|_| invalid())?;

    Ok(sign * mantissa * 10f64.powi(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn checksum_matches_published_lines() {
        let line1 = "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753";
        let line2 = "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";
        assert_eq!(checksum(line1), 3);
        assert_eq!(checksum(line2), 7);
    }

    #[test]
    fn implied_decimal_fields() {
        assert_relative_eq!(parse_implied_decimal(" 10270-3", "bstar").unwrap(), 0.10270e-3);
        assert_relative_eq!(parse_implied_decimal("-11606-4", "bstar").unwrap(), -0.11606e-4);
        assert_eq!(parse_implied_decimal(" 00000-0", "bstar").unwrap(), 0.0);
        assert_eq!(parse_implied_decimal(" 00000+0", "bstar").unwrap(), 0.0);
        assert!(parse_implied_decimal(" 1x270-3", "bstar").is_err());
    }

    #[test]
    fn leading_decimal_point_fields() {
        assert_relative_eq!(parse_f64(" .00016717", "ndot").unwrap(), 0.00016717);
        assert_relative_eq!(parse_f64("-.00002182", "ndot").unwrap(), -0.00002182);
        assert!(parse_f64("  abc", "ndot").is_err());
        assert!(parse_f64("NaN", "ndot").is_err());
    }

    #[test]
    fn multi_tle_with_and_without_names() {
        let content = "\
STARLINK-1007
1 44713U 19074A   24015.25000000  .00001200  00000-0  82000-4 0  9996
2 44713  53.0540 120.0000 0001400  90.0000 270.0000 15.06400000 23454
1 44714U 19074B   24015.25000000  .00001100  00000-0  79000-4 0  9992
2 44714  53.0540 150.0000 0001500  85.0000 275.0000 15.06390000 23456

garbage line
";
        let parsed = parse_multi_tle(content);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].0.as_deref(), Some("STARLINK-1007"));
        assert!(parsed[1].0.is_none());
        assert!(parsed[1].1.starts_with("1 44714"));
    }
}
