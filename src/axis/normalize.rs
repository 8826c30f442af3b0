// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Axis range normalization
//!
//! Raw user bounds are anchored to the origin and snapped outwards onto the
//! coarsest grid increment. Every input produces some output; there is no
//! error path.

use super::settings::{AxisBounds, AxisRange, UnitSystem};
use crate::utils::math::round_to;
use log::debug;

/// Span used when a range has zero length
pub const DEFAULT_SPAN: f64 = 300.0;

/// Decimal places the grid remainder is rounded to before comparing with zero
const REMAINDER_PLACES: i32 = 5;

/// Normalize all three axes with the default span
pub fn normalize(bounds: AxisBounds, unit_system: UnitSystem) -> AxisBounds {
    normalize_with_span(bounds, unit_system, DEFAULT_SPAN)
}

/// Normalize all three axes; each axis is handled independently
pub fn normalize_with_span(bounds: AxisBounds, unit_system: UnitSystem, default_span: f64) -> AxisBounds {
    let increment = unit_system.increments().coarsest() * unit_system.precision();
    let precision = unit_system.precision();

    let normalized = bounds.map(|range| normalize_range(range, default_span, increment, precision));
    debug!(
        "normalized {:?} bounds {:?} -> {:?}",
        unit_system, bounds, normalized
    );
    normalized
}

/// Anchor one range to the origin, then snap both ends onto the grid.
///
/// `increment` is expressed in grid steps, i.e. already multiplied by
/// `precision`.
pub fn normalize_range(range: AxisRange, default_span: f64, increment: f64, precision: f64) -> AxisRange {
    let anchored = anchor(range, default_span);
    AxisRange::new(
        snap_to_increment(anchored.min, increment, precision),
        snap_to_increment(anchored.max, increment, precision),
    )
}

fn anchor(range: AxisRange, default_span: f64) -> AxisRange {
    let AxisRange { min, max } = range;

    if min == max || !(max - min).is_finite() {
        AxisRange::new(0.0, default_span)
    } else if max < min {
        // Swapped entry: keep the span, pick the side from the sign of max
        let span = min - max;
        if max < 0.0 {
            AxisRange::new(-span, 0.0)
        } else {
            AxisRange::new(0.0, span)
        }
    } else if min > 0.0 && max > 0.0 {
        AxisRange::new(0.0, max - min)
    } else if min < 0.0 && max < 0.0 {
        AxisRange::new(-(max - min), 0.0)
    } else {
        range
    }
}

/// Round a coordinate away from zero onto the next multiple of `increment`.
///
/// A zero increment or precision returns the coordinate unchanged.
pub fn snap_to_increment(coordinate: f64, increment: f64, precision: f64) -> f64 {
    if increment == 0.0 || precision == 0.0 {
        return coordinate;
    }

    let scaled = coordinate * precision;
    if !scaled.is_finite() || round_to(scaled % increment, REMAINDER_PLACES) == 0.0 {
        return coordinate;
    }

    let steps = scaled / increment;
    let steps = if scaled > 0.0 { steps.ceil() } else { steps.floor() };
    steps * increment / precision
}

/// Whether a coordinate already lies on the grid
pub fn is_aligned(coordinate: f64, increment: f64, precision: f64) -> bool {
    increment == 0.0
        || precision == 0.0
        || round_to((coordinate * precision) % increment, REMAINDER_PLACES) == 0.0
}
