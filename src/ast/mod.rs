// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Abstract Syntax Tree module
//! 
//! Defines the geometry tree and its rendering to OpenSCAD script text

mod bounds;
mod derived;
mod node;
mod render;

pub use bounds::BoundingBox;
pub use derived::rounding_tool;
pub use node::{
    Node, NodeCategory, NodeKind, Rotation, Rounding, TextParams, Vec2, Vec3, DEFAULT_CONVEXITY,
    DEFAULT_RESOLUTION, DEFAULT_TOOL_HEIGHT,
};
pub use render::{quote, RenderStyle};
