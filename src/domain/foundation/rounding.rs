//! Decimal rounding for floating point values.

/// Rounds `value` to `places` decimal places, halves away from zero.
///
/// The scaled value is first trimmed to 15 significant digits so that
/// binary representation error does not decide the tie: `1.005` rounds to
/// `1.01` even though its nearest `f64` lies slightly below.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    let trimmed = format!("{:.14e}", scaled)
        .parse::<f64>()
        .unwrap_or(scaled);
    trimmed.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to(0.005, 2), 0.01);
        assert_eq!(round_to(-0.005, 2), -0.01);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn ignores_representation_error_at_the_tie() {
        assert_eq!(round_to(1.005, 2), 1.01);
        assert_eq!(round_to(0.015, 2), 0.02);
        assert_eq!(round_to(0.285, 2), 0.29);
    }

    #[test]
    fn leaves_short_values_untouched() {
        assert_eq!(round_to(33.33, 2), 33.33);
        assert_eq!(round_to(100.0, 2), 100.0);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn truncates_below_the_tie() {
        assert_eq!(round_to(66.663, 2), 66.66);
        assert_eq!(round_to(99.994, 2), 99.99);
    }

    #[test]
    fn passes_non_finite_values_through() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }
}
