//! Numeric formatting for XML attribute values
//!
//! Values are rounded to four decimals, `-0` is normalized to `0`, and
//! components are joined by single spaces (`"1 0.5 -2"`).

/// Decimal digits kept in emitted numbers
pub const DECIMALS: i32 = 4;

/// Round to `decimals` digits, folding negative zero into zero
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

pub fn format_scalar(value: f64) -> String {
    round_to(value, DECIMALS).to_string()
}

/// Format every component, never suppressed
pub fn format_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_scalar(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a vector, returning `None` when it formats to exactly `"0 0 0"`
///
/// A zero position or rotation is the XML default, so callers omit the
/// attribute. A true origin therefore cannot be told apart from "not set".
pub fn format_vector(values: &[f64]) -> Option<String> {
    let formatted = format_values(values);
    if formatted == "0 0 0" {
        None
    } else {
        Some(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_four_decimals() {
        assert_eq!(format_values(&[1.23456, 0.00004, 2.0]), "1.2346 0 2");
        assert_eq!(format_values(&[0.1 + 0.2]), "0.3");
        assert_eq!(format_scalar(57.32 / 57.32), "1");
    }

    #[test]
    fn test_never_emits_negative_zero() {
        assert_eq!(format_values(&[-0.0, -0.00001, 1.0]), "0 0 1");
        assert_eq!(format_vector(&[-0.0, 0.0, -0.0]), None);
        assert!(!format_values(&[-0.00004]).contains('-'));
    }

    #[test]
    fn test_zero_vector_is_absent() {
        assert_eq!(format_vector(&[0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn test_short_zero_tuples_are_kept() {
        assert_eq!(format_vector(&[0.0, 0.0]).as_deref(), Some("0 0"));
        assert_eq!(format_vector(&[0.0]).as_deref(), Some("0"));
        assert_eq!(format_vector(&[0.0, 0.0, 0.0, 1.0]).as_deref(), Some("0 0 0 1"));
    }

    #[test]
    fn test_negative_values_kept() {
        assert_eq!(format_vector(&[-1.5, 0.0, 0.25]).as_deref(), Some("-1.5 0 0.25"));
    }
}
