//! Canonical number formatting for table cells
//!
//! Every numeric cell of an encoded model goes through a [`ValueFormatter`].
//! The canonical formatter is locale independent and round-trips: parsing
//! the output with `str::parse::<f64>` yields the original value bit for bit
//! (NaN payloads aside).
//!
//! Rules of [`CanonicalFormatter`]:
//! - integral values with magnitude below 2^53 print without a fractional
//!   part (`10`, `-3`); negative zero prints `-0`
//! - other finite values print the shortest decimal that parses back to
//!   the same `f64`, switching to exponent notation (`1e-7`, `1.5e300`) for
//!   very small or very large magnitudes
//! - `NaN`, `INF` and `-INF` for the non-finite values

/// Largest magnitude below which every integer is exactly representable
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

pub trait ValueFormatter {
    fn format(&self, value: f64) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalFormatter;

impl ValueFormatter for CanonicalFormatter {
    fn format(&self, value: f64) -> String {
        format_value(value)
    }
}

impl<F> ValueFormatter for F
where
    F: Fn(f64) -> String,
{
    fn format(&self, value: f64) -> String {
        self(value)
    }
}

/// Format `value` with the canonical rules
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
        return format!("{}", value as i64);
    }
    // Debug output is the shortest round-trip representation
    format!("{:?}", value)
}

/// Inverse of [`format_value`]
pub fn parse_value(s: &str) -> Option<f64> {
    match s {
        "NaN" => Some(f64::NAN),
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        _ => s.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integral_values() {
        assert_eq!(format_value(10.0), "10");
        assert_eq!(format_value(-3.0), "-3");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-0.0), "-0");
        assert_eq!(format_value(123456789.0), "123456789");
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(format_value(0.1), "0.1");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(-1.25), "-1.25");
        assert_eq!(format_value(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_extreme_magnitudes() {
        assert_eq!(format_value(1e-7), "1e-7");
        assert_eq!(format_value(1.5e300), "1.5e300");
        assert_eq!(parse_value(&format_value(1e20)), Some(1e20));
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "INF");
        assert_eq!(format_value(f64::NEG_INFINITY), "-INF");
        assert!(parse_value("NaN").unwrap().is_nan());
        assert_eq!(parse_value("-INF"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_closure_formatter() {
        let fixed = |v: f64| format!("{:.2}", v);
        assert_eq!(fixed.format(1.0), "1.00");
        assert_eq!(CanonicalFormatter.format(1.0), "1");
    }

    proptest! {
        #[test]
        fn prop_round_trip(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            let parsed = parse_value(&format_value(value)).unwrap();
            prop_assert_eq!(parsed.to_bits(), value.to_bits());
        }

        #[test]
        fn prop_integers_have_no_fraction(value in -1_000_000i64..1_000_000) {
            let text = format_value(value as f64);
            prop_assert_eq!(text, value.to_string());
        }
    }
}
