// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Length and volume unit conversions

use super::math::round_to;

pub const MM_PER_INCH: f64 = 25.4;
pub const MM_PER_CM: f64 = 10.0;
pub const CUBIC_MM_PER_CUBIC_CM: f64 = 1_000.0;
pub const CUBIC_CM_PER_CUBIC_M: f64 = 1_000_000.0;
pub const CUBIC_IN_PER_CUBIC_FT: f64 = 1_728.0;

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

pub fn mm_to_cm(mm: f64) -> f64 {
    mm / MM_PER_CM
}

pub fn cubic_mm_to_cubic_cm(volume: f64) -> f64 {
    volume / CUBIC_MM_PER_CUBIC_CM
}

pub fn cubic_cm_to_cubic_m(volume: f64) -> f64 {
    volume / CUBIC_CM_PER_CUBIC_M
}

pub fn cubic_in_to_cubic_ft(volume: f64) -> f64 {
    volume / CUBIC_IN_PER_CUBIC_FT
}

/// Round to the nearest whole unit, used for imperial extent labels
pub fn whole_units(value: f64) -> f64 {
    round_to(value, 0)
}

/// Express a length in inches as a mixed fraction (`1 1/2`, `3/16`).
///
/// The value is snapped to the nearest `1/max_denominator` and the fraction
/// is reduced. A zero or negative denominator falls back to whole inches.
pub fn inch_fraction(inches: f64, max_denominator: u32) -> String {
    let sign = if inches < 0.0 { "-" } else { "" };
    let magnitude = inches.abs();

    if max_denominator == 0 {
        return format!("{}{}", sign, whole_units(magnitude));
    }

    let steps = (magnitude * max_denominator as f64).round() as u64;
    let whole = steps / max_denominator as u64;
    let mut numerator = steps % max_denominator as u64;
    let mut denominator = max_denominator as u64;

    if numerator == 0 {
        return if whole == 0 {
            "0".to_string()
        } else {
            format!("{}{}", sign, whole)
        };
    }

    let divisor = gcd(numerator, denominator);
    numerator /= divisor;
    denominator /= divisor;

    if whole == 0 {
        format!("{}{}/{}", sign, numerator, denominator)
    } else {
        format!("{}{} {}/{}", sign, whole, numerator, denominator)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_conversion() {
        assert_relative_eq!(mm_to_inches(25.4), 1.0);
        assert_relative_eq!(inches_to_mm(0.25), 6.35);
        assert_relative_eq!(mm_to_cm(300.0), 30.0);
    }

    #[test]
    fn test_volume_conversion() {
        assert_relative_eq!(cubic_mm_to_cubic_cm(27_000_000.0), 27_000.0);
        assert_relative_eq!(cubic_cm_to_cubic_m(27_000.0), 0.027);
        assert_relative_eq!(cubic_in_to_cubic_ft(3_456.0), 2.0);
    }

    #[test]
    fn test_inch_fraction() {
        assert_eq!(inch_fraction(0.25, 32), "1/4");
        assert_eq!(inch_fraction(0.03125, 32), "1/32");
        assert_eq!(inch_fraction(1.5, 32), "1 1/2");
        assert_eq!(inch_fraction(-0.125, 32), "-1/8");
        assert_eq!(inch_fraction(2.0, 32), "2");
        assert_eq!(inch_fraction(0.0, 32), "0");
        assert_eq!(inch_fraction(2.6, 0), "3");
    }
}
