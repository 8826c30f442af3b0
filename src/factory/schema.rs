// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parameter schemas for every node kind

use crate::ast::NodeKind;
use serde::Serialize;

/// Type a parameter is coerced into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    Number,
    Integer,
    Boolean,
    Text,
    Vector2,
    Vector3,
    /// Three booleans, or one broadcast to all axes
    Flags3,
    /// A scalar angle or a vector of Euler angles
    Angle,
    Points2,
    Points3,
    Indices,
    Matrix,
    Nodes,
}

impl ParamType {
    pub fn describe(&self) -> &'static str {
        match self {
            ParamType::Number => "number",
            ParamType::Integer => "non-negative integer",
            ParamType::Boolean => "boolean",
            ParamType::Text => "string",
            ParamType::Vector2 => "2D vector",
            ParamType::Vector3 => "3D vector",
            ParamType::Flags3 => "boolean or list of 3 booleans",
            ParamType::Angle => "angle or 3D vector of angles",
            ParamType::Points2 => "list of 2D points",
            ParamType::Points3 => "list of 3D points",
            ParamType::Indices => "list of index lists",
            ParamType::Matrix => "4x4 or 3x4 matrix",
            ParamType::Nodes => "list of node documents",
        }
    }
}

/// Value used when an optional parameter is omitted
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamDefault {
    Number(f64),
    Integer(u32),
    Boolean(bool),
    Text(&'static str),
    Vector3([f64; 3]),
    Flags3([bool; 3]),
    /// Empty child list
    NoNodes,
    /// Stays unset
    Absent,
    /// Factory's configured `$fn`
    Resolution,
    /// Factory's configured rounding tool height
    ToolHeight,
}

/// One declared parameter of a node kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: ParamType,
    pub default: Option<ParamDefault>,
}

impl ParamSpec {
    pub const fn required(name: &'static str, ty: ParamType) -> Self {
        Self {
            name,
            ty,
            default: None,
        }
    }

    pub const fn optional(name: &'static str, ty: ParamType, default: ParamDefault) -> Self {
        Self {
            name,
            ty,
            default: Some(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

use ParamDefault as D;
use ParamType as T;

const RESOLUTION: ParamSpec = ParamSpec::optional("resolution", T::Integer, D::Resolution);
const CENTER: ParamSpec = ParamSpec::optional("center", T::Boolean, D::Boolean(false));
const CONVEXITY: ParamSpec = ParamSpec::optional("convexity", T::Integer, D::Integer(10));
const CHILDREN: ParamSpec = ParamSpec::optional("children", T::Nodes, D::NoNodes);
const ROUND_R: ParamSpec = ParamSpec::required("round_r", T::Number);
const TOOL_HEIGHT: ParamSpec = ParamSpec::optional("tool_height", T::Number, D::ToolHeight);

const CUBE: &[ParamSpec] = &[ParamSpec::required("size", T::Vector3), CENTER];

const CYLINDER: &[ParamSpec] = &[
    ParamSpec::required("h", T::Number),
    ParamSpec::required("r", T::Number),
    ParamSpec::optional("r1", T::Number, D::Absent),
    ParamSpec::optional("r2", T::Number, D::Absent),
    CENTER,
    RESOLUTION,
];

const SPHERE: &[ParamSpec] = &[ParamSpec::required("r", T::Number), RESOLUTION];

const POLYHEDRON: &[ParamSpec] = &[
    ParamSpec::required("points", T::Points3),
    ParamSpec::required("faces", T::Indices),
    CONVEXITY,
];

const SURFACE: &[ParamSpec] = &[
    ParamSpec::required("file", T::Text),
    CENTER,
    ParamSpec::optional("invert", T::Boolean, D::Boolean(false)),
    CONVEXITY,
];

const SQUARE: &[ParamSpec] = &[ParamSpec::required("size", T::Vector2), CENTER];

const CIRCLE: &[ParamSpec] = &[ParamSpec::required("r", T::Number), RESOLUTION];

const POLYGON: &[ParamSpec] = &[
    ParamSpec::required("points", T::Points2),
    ParamSpec::optional("paths", T::Indices, D::Absent),
    CONVEXITY,
];

const LINE: &[ParamSpec] = &[
    ParamSpec::required("start", T::Vector2),
    ParamSpec::required("end", T::Vector2),
    ParamSpec::optional("width", T::Number, D::Number(1.0)),
    RESOLUTION,
];

const ARC: &[ParamSpec] = &[
    ParamSpec::required("r", T::Number),
    ParamSpec::required("start_angle", T::Number),
    ParamSpec::required("end_angle", T::Number),
    ParamSpec::optional("width", T::Number, D::Number(1.0)),
    RESOLUTION,
];

const TEXT: &[ParamSpec] = &[
    ParamSpec::required("text", T::Text),
    ParamSpec::optional("size", T::Number, D::Number(10.0)),
    ParamSpec::optional("font", T::Text, D::Text("Liberation Sans")),
    ParamSpec::optional("halign", T::Text, D::Text("left")),
    ParamSpec::optional("valign", T::Text, D::Text("baseline")),
    ParamSpec::optional("spacing", T::Number, D::Number(1.0)),
    ParamSpec::optional("direction", T::Text, D::Text("ltr")),
    ParamSpec::optional("language", T::Text, D::Text("en")),
    ParamSpec::optional("script", T::Text, D::Text("latin")),
    RESOLUTION,
];

const IMPORT: &[ParamSpec] = &[ParamSpec::required("file", T::Text), CONVEXITY, CENTER];

const TRANSLATE: &[ParamSpec] = &[ParamSpec::required("v", T::Vector3), CHILDREN];

const RESIZE: &[ParamSpec] = &[
    ParamSpec::required("newsize", T::Vector3),
    ParamSpec::optional("auto", T::Flags3, D::Flags3([false; 3])),
    CHILDREN,
];

const COMPOSE_MATRIX: &[ParamSpec] = &[ParamSpec::required("matrix", T::Matrix), CHILDREN];

const ROTATE: &[ParamSpec] = &[
    ParamSpec::required("a", T::Angle),
    ParamSpec::optional("v", T::Vector3, D::Vector3([0.0, 0.0, 1.0])),
    CHILDREN,
];

const SCALE: &[ParamSpec] = &[ParamSpec::required("v", T::Vector3), CHILDREN];

const MIRROR: &[ParamSpec] = &[ParamSpec::required("v", T::Vector3), CHILDREN];

const COMBINATOR: &[ParamSpec] = &[CHILDREN];

const FOR_LOOP: &[ParamSpec] = &[
    ParamSpec::required("expression", T::Text),
    ParamSpec::optional("body", T::Nodes, D::NoNodes),
];

const ROUNDED_CUBE: &[ParamSpec] = &[
    ParamSpec::required("size", T::Vector3),
    ROUND_R,
    CENTER,
    TOOL_HEIGHT,
    RESOLUTION,
];

const ROUNDED_CYLINDER: &[ParamSpec] = &[
    ParamSpec::required("h", T::Number),
    ParamSpec::required("r", T::Number),
    ROUND_R,
    ParamSpec::optional("r1", T::Number, D::Absent),
    ParamSpec::optional("r2", T::Number, D::Absent),
    CENTER,
    TOOL_HEIGHT,
    RESOLUTION,
];

const ROUNDED_SPHERE: &[ParamSpec] = &[
    ParamSpec::required("r", T::Number),
    ROUND_R,
    TOOL_HEIGHT,
    RESOLUTION,
];

const ROUNDED_POLYHEDRON: &[ParamSpec] = &[
    ParamSpec::required("points", T::Points3),
    ParamSpec::required("faces", T::Indices),
    ROUND_R,
    CONVEXITY,
    TOOL_HEIGHT,
    RESOLUTION,
];

const ROUNDED_SURFACE: &[ParamSpec] = &[
    ParamSpec::required("file", T::Text),
    ParamSpec::required("size", T::Vector3),
    ROUND_R,
    CENTER,
    ParamSpec::optional("invert", T::Boolean, D::Boolean(false)),
    CONVEXITY,
    TOOL_HEIGHT,
    RESOLUTION,
];

/// Declared parameters of `kind`, in validation order
pub fn schema(kind: NodeKind) -> &'static [ParamSpec] {
    match kind {
        NodeKind::Cube => CUBE,
        NodeKind::Cylinder => CYLINDER,
        NodeKind::Sphere => SPHERE,
        NodeKind::Polyhedron => POLYHEDRON,
        NodeKind::Surface => SURFACE,
        NodeKind::Square => SQUARE,
        NodeKind::Circle => CIRCLE,
        NodeKind::Polygon => POLYGON,
        NodeKind::Line => LINE,
        NodeKind::Arc => ARC,
        NodeKind::Text => TEXT,
        NodeKind::Import => IMPORT,
        NodeKind::Translate => TRANSLATE,
        NodeKind::Resize => RESIZE,
        NodeKind::ComposeMatrix => COMPOSE_MATRIX,
        NodeKind::Rotate => ROTATE,
        NodeKind::Scale => SCALE,
        NodeKind::Mirror => MIRROR,
        NodeKind::Union
        | NodeKind::Difference
        | NodeKind::Intersection
        | NodeKind::Minkowski
        | NodeKind::Hull => COMBINATOR,
        NodeKind::ForLoop => FOR_LOOP,
        NodeKind::RoundedCube => ROUNDED_CUBE,
        NodeKind::RoundedCylinder => ROUNDED_CYLINDER,
        NodeKind::RoundedSphere => ROUNDED_SPHERE,
        NodeKind::RoundedPolyhedron => ROUNDED_POLYHEDRON,
        NodeKind::RoundedSurface => ROUNDED_SURFACE,
    }
}

/// Names of the parameters `kind` cannot do without
pub fn required_keys(kind: NodeKind) -> impl Iterator<Item = &'static str> {
    schema(kind)
        .iter()
        .filter(|spec| spec.is_required())
        .map(|spec| spec.name)
}
