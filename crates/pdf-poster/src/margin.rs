//! Cut margin calculation

use crate::types::*;
use crate::units::parse_length;

/// Margin in points for the given media size.
///
/// `user_override` is either a percentage of the media width (`"5%"`) or a
/// length (`"1in"`). Without an override `default_cut_percent` of the media
/// width is used. The result is rounded to two decimals.
pub fn compute_margin(
    media: Dimension,
    default_cut_percent: f64,
    user_override: Option<&str>,
) -> Result<f64> {
    let margin = match user_override {
        Some(text) if text.contains('%') => {
            let number = text.replace('%', "");
            let percent = number
                .trim()
                .parse::<f64>()
                .map_err(|_| PosterError::InvalidLength(text.to_string()))?;
            percent_margin(media, percent)
        }
        Some(text) => parse_length(text)?,
        None => percent_margin(media, default_cut_percent),
    };

    let margin = round2(margin);
    if !margin.is_finite() || margin < 0.0 {
        return Err(PosterError::InvalidGeometry(format!(
            "margin must be non-negative, got {}",
            margin
        )));
    }
    Ok(margin)
}

fn percent_margin(media: Dimension, percent: f64) -> f64 {
    percent * media.width / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEDIA: Dimension = Dimension {
        width: 595.0,
        height: 842.0,
    };

    #[test]
    fn test_percent_override() {
        assert_eq!(compute_margin(MEDIA, 5.0, Some("5%")).unwrap(), 29.75);
        assert_eq!(compute_margin(MEDIA, 5.0, Some("10%")).unwrap(), 59.5);
        assert_eq!(compute_margin(MEDIA, 5.0, Some(" 10 % ")).unwrap(), 59.5);
    }

    #[test]
    fn test_length_override() {
        assert_eq!(compute_margin(MEDIA, 5.0, Some("1in")).unwrap(), 72.0);
        assert_eq!(compute_margin(MEDIA, 5.0, Some("20mm")).unwrap(), 56.69);
    }

    #[test]
    fn test_default_percent() {
        assert_eq!(compute_margin(MEDIA, 5.0, None).unwrap(), 29.75);
        assert_eq!(compute_margin(MEDIA, 0.0, None).unwrap(), 0.0);
    }

    #[test]
    fn test_rounding() {
        let a4 = Dimension::new(595.2755905511812, 841.8897637795276);
        assert_eq!(compute_margin(a4, 5.0, None).unwrap(), 29.76);
    }

    #[test]
    fn test_negative_margin_rejected() {
        assert!(matches!(
            compute_margin(MEDIA, 5.0, Some("-1in")),
            Err(PosterError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_bad_override() {
        assert!(matches!(
            compute_margin(MEDIA, 5.0, Some("abc%")),
            Err(PosterError::InvalidLength(_))
        ));
        assert!(matches!(
            compute_margin(MEDIA, 5.0, Some("3")),
            Err(PosterError::UnrecognizedUnit(_))
        ));
    }
}
