// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! WASM bindings using wasm-bindgen

use crate::axis::{generate, AxisSettings};
use crate::factory::NodeFactory;
use wasm_bindgen::prelude::*;

/// Build a node document (JSON) and render it to OpenSCAD text
#[wasm_bindgen]
pub fn render_node_json(document: &str, indented: bool) -> Result<String, JsValue> {
    let node = NodeFactory::new()
        .build_json(document)
        .map_err(|e| JsValue::from_str(&format!("Build error: {}", e)))?;

    Ok(if indented {
        node.render_indented()
    } else {
        node.render()
    })
}

/// Generate an axis module from JSON settings; returns the result as JSON
#[wasm_bindgen]
pub fn axis_module_json(settings: &str) -> Result<String, JsValue> {
    let settings: AxisSettings = serde_json::from_str(settings)
        .map_err(|e| JsValue::from_str(&format!("Settings error: {}", e)))?;

    serde_json::to_string(&generate(&settings))
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {}", e)))
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
