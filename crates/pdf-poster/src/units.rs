//! Length and dimension string parsing
//!
//! Lengths are written as a number followed by a unit (`"20mm"`,
//! `"1.5 in"`). Dimensions are two lengths separated by `x`
//! (`"36in x 24in"`, `"36 x 24 in"`). Everything resolves to points.

use crate::constants::{CM_PER_INCH, POINTS_PER_INCH, mm_to_pt};
use crate::types::{Dimension, PosterError, Result};

/// Supported length units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    Point,
    Inch,
    Centimeter,
    Millimeter,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Inch, Unit::Centimeter, Unit::Millimeter, Unit::Point];

    /// Suffix used in length strings
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Point => "pt",
            Unit::Inch => "in",
            Unit::Centimeter => "cm",
            Unit::Millimeter => "mm",
        }
    }

    /// Convert a value in this unit to points
    pub fn to_points(self, value: f64) -> f64 {
        match self {
            Unit::Point => value,
            Unit::Inch => value * POINTS_PER_INCH,
            Unit::Centimeter => value * POINTS_PER_INCH / CM_PER_INCH,
            Unit::Millimeter => mm_to_pt(value),
        }
    }

    fn strip_from(text: &str) -> Option<(&str, Unit)> {
        Unit::ALL.into_iter().find_map(|unit| {
            let suffix = unit.suffix();
            let split = text.len().checked_sub(suffix.len())?;
            let (number, tail) = text.split_at_checked(split)?;
            tail.eq_ignore_ascii_case(suffix).then_some((number, unit))
        })
    }
}

/// Parse a length such as `"20mm"` or `"1 in"` into points.
///
/// The unit is case-insensitive and may be separated from the number by
/// whitespace. A missing or unknown unit is an `UnrecognizedUnit` error.
pub fn parse_length(text: &str) -> Result<f64> {
    match split_unit(text)? {
        (value, Some(unit)) => Ok(unit.to_points(value)),
        (_, None) => Err(PosterError::UnrecognizedUnit(text.to_string())),
    }
}

/// Parse an explicit `"W U x H U"` dimension string into points.
///
/// When only the height carries a unit (`"36 x 24 in"`) the width uses it
/// too. Explicit dimensions are never rotated.
pub fn parse_dimensions(text: &str) -> Result<Dimension> {
    let (width, height) = split_dimensions(text)
        .ok_or_else(|| PosterError::InvalidLength(text.to_string()))?;

    let (height_value, height_unit) = split_unit(height)?;
    let height_unit =
        height_unit.ok_or_else(|| PosterError::UnrecognizedUnit(text.to_string()))?;

    let (width_value, width_unit) = split_unit(width)?;
    let width_unit = width_unit.unwrap_or(height_unit);

    Ok(Dimension::new(
        width_unit.to_points(width_value),
        height_unit.to_points(height_value),
    ))
}

/// Whether `text` has the shape of an explicit dimension string
/// (digits, an `x`, digits) rather than a paper name.
pub fn looks_like_dimensions(text: &str) -> bool {
    split_dimensions(text).is_some_and(|(width, height)| {
        width.bytes().any(|b| b.is_ascii_digit()) && height.bytes().any(|b| b.is_ascii_digit())
    })
}

fn split_dimensions(text: &str) -> Option<(&str, &str)> {
    let idx = text.find(['x', 'X'])?;
    Some((text[..idx].trim(), text[idx + 1..].trim()))
}

/// Split `"20 mm"` into `(20.0, Some(Millimeter))`, `"20"` into `(20.0, None)`
fn split_unit(text: &str) -> Result<(f64, Option<Unit>)> {
    let trimmed = text.trim();
    let (number, unit) = match Unit::strip_from(trimmed) {
        Some((number, unit)) => (number.trim_end(), Some(unit)),
        None => (trimmed, None),
    };

    if number.is_empty() {
        return Err(PosterError::UnrecognizedUnit(text.to_string()));
    }
    if unit.is_none() && number.ends_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(PosterError::UnrecognizedUnit(text.to_string()));
    }

    let value = number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PosterError::InvalidLength(text.to_string()))?;

    Ok((value, unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::round2;

    #[test]
    fn test_parse_length_units() {
        assert_eq!(parse_length("1in").unwrap(), 72.0);
        assert_eq!(parse_length("72pt").unwrap(), 72.0);
        assert_eq!(round2(parse_length("2.54cm").unwrap()), 72.0);
        assert_eq!(round2(parse_length("25.4mm").unwrap()), 72.0);
        assert_eq!(round2(parse_length("20mm").unwrap()), 56.69);
    }

    #[test]
    fn test_parse_length_case_and_whitespace() {
        assert_eq!(parse_length("1 IN").unwrap(), 72.0);
        assert_eq!(parse_length("  10 Pt ").unwrap(), 10.0);
        assert_eq!(parse_length("0.5In").unwrap(), 36.0);
    }

    #[test]
    fn test_parse_length_rejects_missing_unit() {
        assert!(matches!(
            parse_length("12"),
            Err(PosterError::UnrecognizedUnit(_))
        ));
        assert!(matches!(
            parse_length("12ft"),
            Err(PosterError::UnrecognizedUnit(_))
        ));
        assert!(matches!(
            parse_length("mm"),
            Err(PosterError::UnrecognizedUnit(_))
        ));
    }

    #[test]
    fn test_parse_length_rejects_bad_number() {
        assert!(matches!(
            parse_length("1.2.3mm"),
            Err(PosterError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_parse_dimensions() {
        let dim = parse_dimensions("36in x 24in").unwrap();
        assert_eq!(dim, Dimension::new(2592.0, 1728.0));

        let dim = parse_dimensions("36 x 24 in").unwrap();
        assert_eq!(dim, Dimension::new(2592.0, 1728.0));

        let dim = parse_dimensions("100pt X 50pt").unwrap();
        assert_eq!(dim, Dimension::new(100.0, 50.0));
    }

    #[test]
    fn test_parse_dimensions_mixed_units() {
        let dim = parse_dimensions("1in x 72pt").unwrap();
        assert_eq!(dim, Dimension::new(72.0, 72.0));
    }

    #[test]
    fn test_parse_dimensions_requires_height_unit() {
        assert!(matches!(
            parse_dimensions("36in x 24"),
            Err(PosterError::UnrecognizedUnit(_))
        ));
    }

    #[test]
    fn test_looks_like_dimensions() {
        assert!(looks_like_dimensions("36in x 24in"));
        assert!(looks_like_dimensions("36x24cm"));
        assert!(!looks_like_dimensions("a4"));
        assert!(!looks_like_dimensions("executive"));
    }
}
