// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Axis settings: unit system, theme and per-axis bounds

use crate::utils::units;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Finest imperial step is 1/32 inch
pub const IMPERIAL_DENOMINATOR: u32 = 32;

const METRIC_TIERS: [f64; 4] = [20.0, 10.0, 5.0, 1.0];
const IMPERIAL_TIERS: [f64; 4] = [1.0 / 4.0, 1.0 / 8.0, 1.0 / 16.0, 1.0 / 32.0];

/// Unit system of the axis overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Unit every coordinate is expressed in
    pub fn base_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "mm",
            UnitSystem::Imperial => "in",
        }
    }

    /// Unit the tick labels are shown in
    pub fn label_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "in",
        }
    }

    /// Factor from base unit to label unit
    pub fn label_scale(&self) -> f64 {
        match self {
            UnitSystem::Metric => units::mm_to_cm(1.0),
            UnitSystem::Imperial => 1.0,
        }
    }

    /// Linear and scaled volume unit names
    pub fn volume_units(&self) -> (&'static str, &'static str) {
        match self {
            UnitSystem::Metric => ("cm^3", "m^3"),
            UnitSystem::Imperial => ("in^3", "ft^3"),
        }
    }

    /// Multiplier turning base-unit coordinates into whole grid steps
    pub fn precision(&self) -> f64 {
        match self {
            UnitSystem::Metric => 1.0,
            UnitSystem::Imperial => IMPERIAL_DENOMINATOR as f64,
        }
    }

    pub fn increments(&self) -> Increments {
        match self {
            UnitSystem::Metric => Increments::new(METRIC_TIERS),
            UnitSystem::Imperial => Increments::new(IMPERIAL_TIERS),
        }
    }

    /// Human readable step, e.g. `20 mm` or `1/8 in`
    pub fn describe_step(&self, step: f64) -> String {
        match self {
            UnitSystem::Metric => format!("{} mm", crate::utils::fmt_num(step)),
            UnitSystem::Imperial => {
                format!("{} in", units::inch_fraction(step, IMPERIAL_DENOMINATOR))
            }
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "mm" => Ok(UnitSystem::Metric),
            "imperial" | "in" | "inch" => Ok(UnitSystem::Imperial),
            other => Err(format!("unknown unit system '{}'", other)),
        }
    }
}

/// Four nested grid spacings, coarse to fine, in the base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Increments {
    pub tiers: [f64; 4],
}

impl Increments {
    pub fn new(tiers: [f64; 4]) -> Self {
        Self { tiers }
    }

    pub fn coarsest(&self) -> f64 {
        self.tiers[0]
    }

    pub fn finest(&self) -> f64 {
        self.tiers[3]
    }
}

/// Background the overlay is drawn against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundTheme {
    #[default]
    Light,
    Dark,
}

impl BackgroundTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundTheme::Light => "light",
            BackgroundTheme::Dark => "dark",
        }
    }

    /// Colour of ticks and labels, contrasting with the background
    pub fn ink_color(&self) -> &'static str {
        match self {
            BackgroundTheme::Light => "DimGray",
            BackgroundTheme::Dark => "Gainsboro",
        }
    }
}

impl fmt::Display for BackgroundTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackgroundTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(BackgroundTheme::Light),
            "dark" => Ok(BackgroundTheme::Dark),
            other => Err(format!("unknown background theme '{}'", other)),
        }
    }
}

/// Minimum and maximum coordinate along one axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn extent(&self) -> f64 {
        self.max - self.min
    }
}

/// Bounds of all three axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisBounds {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl AxisBounds {
    pub fn new(x: AxisRange, y: AxisRange, z: AxisRange) -> Self {
        Self { x, y, z }
    }

    /// Bounds from the six raw values MinX, MaxX, MinY, MaxY, MinZ, MaxZ
    pub fn from_raw(min_x: f64, max_x: f64, min_y: f64, max_y: f64, min_z: f64, max_z: f64) -> Self {
        Self {
            x: AxisRange::new(min_x, max_x),
            y: AxisRange::new(min_y, max_y),
            z: AxisRange::new(min_z, max_z),
        }
    }

    pub fn axes(&self) -> [(Axis, AxisRange); 3] {
        [(Axis::X, self.x), (Axis::Y, self.y), (Axis::Z, self.z)]
    }

    pub fn map(self, mut f: impl FnMut(AxisRange) -> AxisRange) -> Self {
        Self {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
        }
    }

    pub fn origin(&self) -> [f64; 3] {
        [self.x.min, self.y.min, self.z.min]
    }

    pub fn origin_is_zero(&self) -> bool {
        self.origin().iter().all(|v| *v == 0.0)
    }
}

/// One of the three axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Loop variable used for this axis in generated scripts
    pub fn var(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Everything one overlay generation needs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSettings {
    pub unit_system: UnitSystem,
    pub theme: BackgroundTheme,
    pub bounds: AxisBounds,
}

impl AxisSettings {
    pub fn new(unit_system: UnitSystem, theme: BackgroundTheme, bounds: AxisBounds) -> Self {
        Self {
            unit_system,
            theme,
            bounds,
        }
    }

    /// Increment tiers derived from the unit system
    pub fn increments(&self) -> Increments {
        self.unit_system.increments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_tiers() {
        assert_eq!(UnitSystem::Metric.increments().tiers, [20.0, 10.0, 5.0, 1.0]);
        let imperial = UnitSystem::Imperial.increments();
        assert_eq!(imperial.coarsest(), 0.25);
        assert_eq!(imperial.finest() * UnitSystem::Imperial.precision(), 1.0);
    }

    #[test]
    fn test_tiers_are_nested() {
        for unit in [UnitSystem::Metric, UnitSystem::Imperial] {
            let p = unit.precision();
            let tiers = unit.increments().tiers;
            for pair in tiers.windows(2) {
                let ratio = (pair[0] * p) / (pair[1] * p);
                assert_eq!(ratio.fract(), 0.0, "{} tiers not nested", unit);
            }
        }
    }

    #[test]
    fn test_parse_settings_enums() {
        assert_eq!("Imperial".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert_eq!("mm".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
        assert_eq!("dark".parse::<BackgroundTheme>().unwrap(), BackgroundTheme::Dark);
        assert!("sepia".parse::<BackgroundTheme>().is_err());
    }

    #[test]
    fn test_describe_step() {
        assert_eq!(UnitSystem::Metric.describe_step(20.0), "20 mm");
        assert_eq!(UnitSystem::Imperial.describe_step(0.0625), "1/16 in");
    }

    #[test]
    fn test_bounds_origin() {
        let bounds = AxisBounds::from_raw(0.0, 10.0, 0.0, 10.0, 0.0, 10.0);
        assert!(bounds.origin_is_zero());
        let bounds = AxisBounds::from_raw(-20.0, 10.0, 0.0, 10.0, 0.0, 10.0);
        assert!(!bounds.origin_is_zero());
        assert_eq!(bounds.x.extent(), 30.0);
    }
}
