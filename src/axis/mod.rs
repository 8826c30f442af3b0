// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Axis reference overlay: range normalization and module rendering

mod normalize;
mod render;
mod settings;

pub use normalize::{
    is_aligned, normalize, normalize_range, normalize_with_span, snap_to_increment, DEFAULT_SPAN,
};
pub use render::{
    extent_label, module_name, render, volumes, AxisRenderResult, AxisRenderer, AxisStyle,
    TickStyle, DECIMAL_TOKEN, NEGATIVE_TOKEN,
};
pub use settings::{
    Axis, AxisBounds, AxisRange, AxisSettings, BackgroundTheme, Increments, UnitSystem,
    IMPERIAL_DENOMINATOR,
};

/// Normalize the settings' bounds and render the overlay module.
///
/// The caller's settings are not modified.
pub fn generate(settings: &AxisSettings) -> AxisRenderResult {
    let bounds = normalize(settings.bounds, settings.unit_system);
    render(&bounds, settings.unit_system, settings.theme)
}
