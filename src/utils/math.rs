// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

/// Decimal places kept when printing numbers into generated scripts
pub const OUTPUT_PRECISION: i32 = 6;

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Round a value to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Clamp a value so it never drops below zero
pub fn non_negative(value: f64) -> f64 {
    if value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Format a number for script output.
///
/// Integral values print without a fraction, `-0` prints as `0`, and
/// exponent notation never appears.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    // Beyond ~1.8e302 the scaled value overflows; such numbers have no
    // fractional digits to round anyway
    let rounded = if (value * 10f64.powi(OUTPUT_PRECISION)).is_finite() {
        round_to(value, OUTPUT_PRECISION)
    } else {
        value
    };
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Convert degrees to radians
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0001, 0.001));
        assert!(!approx_eq(1.0, 1.1, 0.001));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234567, 2), 1.23);
        assert_eq!(round_to(-0.000004, 5), -0.0);
        assert_eq!(round_to(19.999999, 5), 20.0);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(3.0), 3.0);
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(8.0), "8");
        assert_eq!(fmt_num(0.001), "0.001");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(-2.5), "-2.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
        assert_eq!(fmt_num(1e-9), "0");
    }

    #[test]
    fn test_fmt_num_huge_values() {
        let text = fmt_num(1e308);
        assert!(text.chars().all(|c| c.is_ascii_digit()), "{}", text);
        assert_eq!(text.len(), 309);
        assert!(fmt_num(-1e305).starts_with("-1"));
        assert_eq!(fmt_num(f64::INFINITY), "0");
        assert_eq!(fmt_num(f64::NAN), "0");
    }

    #[test]
    fn test_angle_conversion() {
        assert!(approx_eq(deg_to_rad(180.0), std::f64::consts::PI, 1e-12));
    }
}
