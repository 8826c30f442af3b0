// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Axis module rendering
//!
//! Emits one named OpenSCAD module drawing tick marks at the four increment
//! tiers plus labels for every axis. Ticks and labels at the zero coordinate
//! are suppressed so they do not pile up on the origin.

use super::settings::{Axis, AxisBounds, AxisRange, BackgroundTheme, UnitSystem};
use crate::ast::quote;
use crate::utils::math::fmt_num;
use crate::utils::units;
use log::debug;
use serde::{Deserialize, Serialize};

/// Token replacing `-` in generated identifiers
pub const NEGATIVE_TOKEN: &str = "neg";
/// Token replacing `.` in generated identifiers
pub const DECIMAL_TOKEN: &str = "p";

/// Size of the tick marks of one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickStyle {
    pub length: f64,
    pub thickness: f64,
}

/// Visual dimensions of the overlay, in the base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    /// Coarse to fine, matching the increment tiers
    pub ticks: [TickStyle; 4],
    pub label_size: f64,
    pub label_offset: f64,
}

impl AxisStyle {
    pub fn for_unit(unit_system: UnitSystem) -> Self {
        let tick = |length, thickness| TickStyle { length, thickness };
        match unit_system {
            UnitSystem::Metric => Self {
                ticks: [tick(8.0, 0.6), tick(6.0, 0.5), tick(4.0, 0.4), tick(2.0, 0.3)],
                label_size: 4.0,
                label_offset: 10.0,
            },
            UnitSystem::Imperial => Self {
                ticks: [
                    tick(0.4, 0.03),
                    tick(0.3, 0.025),
                    tick(0.2, 0.02),
                    tick(0.1, 0.015),
                ],
                label_size: 0.2,
                label_offset: 0.5,
            },
        }
    }
}

/// Generated axis module and its derived figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisRenderResult {
    pub script: String,
    pub module_name: String,
    pub invocation: String,
    /// Volume in cm^3 or in^3
    pub volume_linear: f64,
    /// Volume in m^3 or ft^3
    pub volume_scaled: f64,
}

/// Renders normalized bounds into an axis module
#[derive(Debug, Clone, Copy)]
pub struct AxisRenderer {
    style: AxisStyle,
}

impl AxisRenderer {
    pub fn new(style: AxisStyle) -> Self {
        Self { style }
    }

    pub fn for_unit(unit_system: UnitSystem) -> Self {
        Self::new(AxisStyle::for_unit(unit_system))
    }

    pub fn render(
        &self,
        bounds: &AxisBounds,
        unit_system: UnitSystem,
        theme: BackgroundTheme,
    ) -> AxisRenderResult {
        let module_name = module_name(bounds, unit_system, theme);
        let invocation = format!("{}();", module_name);
        let (volume_linear, volume_scaled) = volumes(bounds, unit_system);
        let (linear_unit, scaled_unit) = unit_system.volume_units();

        let increments = unit_system.increments();
        let mut lines = vec![
            format!("module {}() {{", module_name),
            format!("    unit = {};", quote(unit_system.base_unit())),
            format!(
                "    label_scale = {}; // {} -> {}",
                fmt_num(unit_system.label_scale()),
                unit_system.base_unit(),
                unit_system.label_unit()
            ),
            format!("    color({}) {{", quote(theme.ink_color())),
        ];

        for (axis, range) in bounds.axes() {
            for (step, tick) in increments.tiers.iter().zip(self.style.ticks.iter()) {
                lines.push(format!(
                    "        // {} ticks every {}",
                    axis.label(),
                    unit_system.describe_step(*step)
                ));
                lines.push(format!("        {}", tick_pass(axis, &range, *step, tick)));
            }
        }

        for (axis, range) in bounds.axes() {
            lines.push(format!(
                "        // {} labels in {}",
                axis.label(),
                unit_system.label_unit()
            ));
            lines.push(format!(
                "        {}",
                label_pass(axis, &range, increments.coarsest(), &self.style)
            ));
        }

        lines.push("    }".to_string());
        lines.push("}".to_string());
        lines.push(format!(
            "// {}: {} {} ({} {})",
            module_name,
            fmt_num(volume_linear),
            linear_unit,
            fmt_num(volume_scaled),
            scaled_unit
        ));

        let mut script = lines.join("\n");
        script.push('\n');

        debug!("rendered axis module {} ({} bytes)", module_name, script.len());

        AxisRenderResult {
            script,
            module_name,
            invocation,
            volume_linear,
            volume_scaled,
        }
    }
}

/// Render with the default style for `unit_system`
pub fn render(bounds: &AxisBounds, unit_system: UnitSystem, theme: BackgroundTheme) -> AxisRenderResult {
    AxisRenderer::for_unit(unit_system).render(bounds, unit_system, theme)
}

/// Extent label: whole units for imperial, raw for metric
pub fn extent_label(range: &AxisRange, unit_system: UnitSystem) -> String {
    match unit_system {
        UnitSystem::Metric => fmt_num(range.extent()),
        UnitSystem::Imperial => fmt_num(units::whole_units(range.extent())),
    }
}

/// Identifier-safe module name
pub fn module_name(bounds: &AxisBounds, unit_system: UnitSystem, theme: BackgroundTheme) -> String {
    let mut name = format!(
        "axis_{}_{}x{}x{}_{}",
        theme.as_str(),
        identifier_number(&extent_label(&bounds.x, unit_system)),
        identifier_number(&extent_label(&bounds.y, unit_system)),
        identifier_number(&extent_label(&bounds.z, unit_system)),
        unit_system.base_unit()
    );

    if !bounds.origin_is_zero() {
        let origin: Vec<String> = bounds
            .origin()
            .iter()
            .map(|v| identifier_number(&fmt_num(*v)))
            .collect();
        name.push_str("_at_");
        name.push_str(&origin.join("_"));
    }

    name
}

fn identifier_number(formatted: &str) -> String {
    formatted
        .replace('-', NEGATIVE_TOKEN)
        .replace('.', DECIMAL_TOKEN)
}

/// Volume in the linear unit (cm^3 / in^3) and the scaled unit (m^3 / ft^3)
pub fn volumes(bounds: &AxisBounds, unit_system: UnitSystem) -> (f64, f64) {
    let raw = bounds.x.extent() * bounds.y.extent() * bounds.z.extent();
    match unit_system {
        UnitSystem::Metric => {
            let cubic_cm = units::cubic_mm_to_cubic_cm(raw);
            (cubic_cm, units::cubic_cm_to_cubic_m(cubic_cm))
        }
        UnitSystem::Imperial => (raw, units::cubic_in_to_cubic_ft(raw)),
    }
}

fn loop_header(axis: Axis, range: &AxisRange, step: f64) -> String {
    let var = axis.var();
    format!(
        "for ({} = [{}:{}:{}]) if ({} != 0)",
        var,
        fmt_num(range.min),
        fmt_num(step),
        fmt_num(range.max),
        var
    )
}

fn tick_pass(axis: Axis, range: &AxisRange, step: f64, tick: &TickStyle) -> String {
    let var = axis.var();
    let len = fmt_num(tick.length);
    let thick = fmt_num(tick.thickness);
    let (position, size) = match axis {
        Axis::X => (
            format!("[{}, 0, 0]", var),
            format!("[{}, {}, {}]", thick, len, thick),
        ),
        Axis::Y => (
            format!("[0, {}, 0]", var),
            format!("[{}, {}, {}]", len, thick, thick),
        ),
        Axis::Z => (
            format!("[0, 0, {}]", var),
            format!("[{}, {}, {}]", len, thick, thick),
        ),
    };
    format!(
        "{} translate({}) cube({}, center=true);",
        loop_header(axis, range, step),
        position,
        size
    )
}

fn label_pass(axis: Axis, range: &AxisRange, step: f64, style: &AxisStyle) -> String {
    let var = axis.var();
    let offset = fmt_num(-style.label_offset);
    let (placement, halign, valign) = match axis {
        Axis::X => (format!("translate([{}, {}, 0])", var, offset), "center", "top"),
        Axis::Y => (format!("translate([{}, {}, 0])", offset, var), "right", "center"),
        Axis::Z => (
            format!("translate([{}, 0, {}]) rotate([90, 0, 0])", offset, var),
            "right",
            "center",
        ),
    };
    format!(
        "{} {} text(str({} * label_scale), size={}, halign={}, valign={});",
        loop_header(axis, range, step),
        placement,
        var,
        fmt_num(style.label_size),
        quote(halign),
        quote(valign)
    )
}
