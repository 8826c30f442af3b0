// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! scadgen
//!
//! Parametric geometry description engine for OpenSCAD. Builds validated
//! geometry trees from loosely typed parameters and renders them to script
//! text, and generates unit-aware axis reference overlays.

pub mod ast;
pub mod axis;
pub mod config;
pub mod error;
pub mod factory;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod ffi;

pub use ast::{Node, NodeKind, RenderStyle, Rotation, Rounding};
pub use axis::{AxisBounds, AxisRenderResult, AxisSettings, BackgroundTheme, UnitSystem};
pub use config::Config;
pub use error::{DocumentError, KindParseError, NodeError};
pub use factory::{build, NodeFactory, ParamBag};

/// Build a node from a JSON document and render it to script text
pub fn render_json(json: &str) -> Result<String, DocumentError> {
    let node = NodeFactory::new().build_json(json)?;
    Ok(node.render())
}

/// Normalize the bounds and render the axis overlay module
pub fn generate_axis(settings: &AxisSettings) -> AxisRenderResult {
    axis::generate(settings)
}
