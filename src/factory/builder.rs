// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Node factory: validates parameter bags and constructs nodes

use super::coerce;
use super::schema::{schema, ParamDefault, ParamSpec, ParamType};
use crate::ast::{
    Node, NodeKind, Rotation, Rounding, TextParams, Vec2, Vec3, DEFAULT_RESOLUTION,
    DEFAULT_TOOL_HEIGHT,
};
use crate::error::{DocumentError, NodeError};
use log::{debug, trace, warn};
use nalgebra::{Matrix4, Point2, Point3};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Loosely typed parameter bag
pub type ParamBag = Map<String, Value>;

/// Defaults the factory fills in for omitted parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryOptions {
    pub resolution: u32,
    pub tool_height: f64,
}

impl Default for FactoryOptions {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            tool_height: DEFAULT_TOOL_HEIGHT,
        }
    }
}

/// Parameter value after coercion
#[derive(Debug, Clone, PartialEq)]
enum ParamValue {
    Number(f64),
    Integer(u32),
    Boolean(bool),
    Text(String),
    Vector2(Vec2),
    Vector3(Vec3),
    Flags3([bool; 3]),
    Points2(Vec<Point2<f64>>),
    Points3(Vec<Point3<f64>>),
    Indices(Vec<Vec<usize>>),
    Matrix(Matrix4<f64>),
    Nodes(Vec<Node>),
}

/// Validated parameters of a single node
struct Params {
    kind: NodeKind,
    values: HashMap<&'static str, ParamValue>,
}

impl Params {
    fn mismatch(&self, key: &str) -> NodeError {
        let expected = schema(self.kind)
            .iter()
            .find(|spec| spec.name == key)
            .map(|spec| spec.ty.describe())
            .unwrap_or("declared parameter");
        NodeError::invalid(self.kind, key, expected)
    }

    fn number(&self, key: &str) -> Result<f64, NodeError> {
        self.opt_number(key)?.ok_or_else(|| NodeError::missing(self.kind, key))
    }

    fn opt_number(&self, key: &str) -> Result<Option<f64>, NodeError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::Number(v)) => Ok(Some(*v)),
            Some(_) => Err(self.mismatch(key)),
        }
    }

    fn integer(&self, key: &str) -> Result<u32, NodeError> {
        match self.values.get(key) {
            Some(ParamValue::Integer(v)) => Ok(*v),
            Some(_) => Err(self.mismatch(key)),
            None => Err(NodeError::missing(self.kind, key)),
        }
    }

    fn boolean(&self, key: &str) -> Result<bool, NodeError> {
        match self.values.get(key) {
            Some(ParamValue::Boolean(v)) => Ok(*v),
            Some(_) => Err(self.mismatch(key)),
            None => Err(NodeError::missing(self.kind, key)),
        }
    }

    fn take_text(&mut self, key: &str) -> Result<String, NodeError> {
        match self.values.remove(key) {
            Some(ParamValue::Text(v)) => Ok(v),
            Some(_) => Err(self.mismatch(key)),
            None => Err(NodeError::missing(self.kind, key)),
        }
    }

    fn vector2(&self, key: &str) -> Result<Vec2, NodeError> {
        match self.values.get(key) {
            Some(ParamValue::Vector2(v)) => Ok(*v),
            Some(_) => Err(self.mismatch(key)),
            None => Err(NodeError::missing(self.kind, key)),
        }
    }

    fn vector3(&self, key: &str) -> Result<Vec3, NodeError> {
        match self.values.get(key) {
            Some(ParamValue::Vector3(v)) => Ok(*v),
            Some(_) => Err(self.mismatch(key)),
            None => Err(NodeError::missing(self.kind, key)),
        }
    }

    fn flags3(&self, key: &str) -> Result<[bool; 3], NodeError> {
        match self.values.get(key) {
            Some(ParamValue::Flags3(v)) => Ok(*v),
            Some(_) => Err(self.mismatch(key)),
            None => Err(NodeError::missing(self.kind, key)),
        }
    }

    fn take_points2(&mut self, key: &str) -> Result<Vec<Point2<f64>>, NodeError> {
        match self.values.remove(key) {
            Some(ParamValue::Points2(v)) => Ok(v),
            Some(_) => Err(self.mismatch(key)),
            None => Err(NodeError::missing(self.kind, key)),
        }
    }

    fn take_points3(&mut self, key: &str) -> Result<Vec<Point3<f64>>, NodeError> {
        match self.values.remove(key) {
            Some(ParamValue::Points3(v)) => Ok(v),
            Some(_) => Err(self.mismatch(key)),
            None => Err(NodeError::missing(self.kind, key)),
        }
    }

    fn take_opt_indices(&mut self, key: &str) -> Result<Option<Vec<Vec<usize>>>, NodeError> {
        match self.values.remove(key) {
            Some(ParamValue::Indices(v)) => Ok(Some(v)),
            Some(_) => Err(self.mismatch(key)),
            None => Ok(None),
        }
    }

    fn take_indices(&mut self, key: &str) -> Result<Vec<Vec<usize>>, NodeError> {
        self.take_opt_indices(key)?
            .ok_or_else(|| NodeError::missing(self.kind, key))
    }

    fn matrix(&self, key: &str) -> Result<Matrix4<f64>, NodeError> {
        match self.values.get(key) {
            Some(ParamValue::Matrix(v)) => Ok(*v),
            Some(_) => Err(self.mismatch(key)),
            None => Err(NodeError::missing(self.kind, key)),
        }
    }

    fn take_nodes(&mut self, key: &str) -> Result<Vec<Node>, NodeError> {
        match self.values.remove(key) {
            Some(ParamValue::Nodes(v)) => Ok(v),
            Some(_) => Err(self.mismatch(key)),
            None => Err(NodeError::missing(self.kind, key)),
        }
    }

    /// Angle given either as a scalar (about `axis_key`) or as Euler angles
    fn rotation(&self, angle_key: &str, axis_key: &str) -> Result<Rotation, NodeError> {
        match self.values.get(angle_key) {
            Some(ParamValue::Number(angle)) => Ok(Rotation::Axis {
                angle: *angle,
                axis: self.vector3(axis_key)?,
            }),
            Some(ParamValue::Vector3(angles)) => Ok(Rotation::Euler(*angles)),
            Some(_) => Err(self.mismatch(angle_key)),
            None => Err(NodeError::missing(self.kind, angle_key)),
        }
    }

    fn rounding(&self) -> Result<Rounding, NodeError> {
        Ok(Rounding::with_tool_height(
            self.number("round_r")?,
            self.number("tool_height")?,
        ))
    }
}

/// Builds validated nodes from parameter bags
#[derive(Debug, Clone, Default)]
pub struct NodeFactory {
    options: FactoryOptions,
}

impl NodeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FactoryOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FactoryOptions {
        &self.options
    }

    /// Validate `params` against the schema of `kind` and construct the node.
    ///
    /// The first absent required key (in declaration order) is reported
    /// before any value is coerced; after that, the first uncoercible value.
    pub fn build(&self, kind: NodeKind, params: &ParamBag) -> Result<Node, NodeError> {
        trace!("building {} from {} parameters", kind, params.len());
        let mut resolved = self.resolve(kind, params)?;
        let node = construct(&mut resolved)?;
        debug!("built {} ({} nodes)", kind, node.node_count());
        Ok(node)
    }

    /// Build from a `{"kind": ..., "params": {...}}` document
    pub fn build_document(&self, document: &Value) -> Result<Node, DocumentError> {
        let (tag, params) = document_parts(document).ok_or_else(|| {
            DocumentError::Malformed("expected an object with a string 'kind'".to_string())
        })?;
        let kind = tag.parse::<NodeKind>()?;
        let empty = ParamBag::new();
        Ok(self.build(kind, params.unwrap_or(&empty))?)
    }

    /// Build from JSON text holding one node document
    pub fn build_json(&self, json: &str) -> Result<Node, DocumentError> {
        let document: Value = serde_json::from_str(json)?;
        self.build_document(&document)
    }

    fn resolve(&self, kind: NodeKind, params: &ParamBag) -> Result<Params, NodeError> {
        let specs = schema(kind);

        // Presence of every required key is checked before any coercion
        if let Some(spec) = specs
            .iter()
            .find(|spec| spec.is_required() && !params.contains_key(spec.name))
        {
            return Err(NodeError::missing(kind, spec.name));
        }

        let mut values = HashMap::with_capacity(specs.len());
        for spec in specs {
            let value = match params.get(spec.name) {
                Some(raw) => Some(self.coerce(kind, spec, raw)?),
                None => spec.default.and_then(|default| self.default_value(default)),
            };
            if let Some(value) = value {
                values.insert(spec.name, value);
            }
        }

        for key in params.keys() {
            if !specs.iter().any(|spec| spec.name == key) {
                warn!("ignoring unknown parameter '{}' for {}", key, kind);
            }
        }

        Ok(Params { kind, values })
    }

    fn coerce(&self, kind: NodeKind, spec: &ParamSpec, raw: &Value) -> Result<ParamValue, NodeError> {
        let value = match spec.ty {
            ParamType::Number => coerce::number(raw).map(ParamValue::Number),
            ParamType::Integer => coerce::integer(raw).map(ParamValue::Integer),
            ParamType::Boolean => coerce::boolean(raw).map(ParamValue::Boolean),
            ParamType::Text => coerce::text(raw).map(ParamValue::Text),
            ParamType::Vector2 => coerce::vector2(raw).map(ParamValue::Vector2),
            ParamType::Vector3 => coerce::vector3(raw).map(ParamValue::Vector3),
            ParamType::Flags3 => coerce::flags3(raw).map(ParamValue::Flags3),
            ParamType::Angle => match coerce::number(raw) {
                Some(angle) if !raw.is_array() => Some(ParamValue::Number(angle)),
                _ => coerce::vector3(raw).map(ParamValue::Vector3),
            },
            ParamType::Points2 => coerce::points2(raw).map(ParamValue::Points2),
            ParamType::Points3 => coerce::points3(raw).map(ParamValue::Points3),
            ParamType::Indices => coerce::indices(raw).map(ParamValue::Indices),
            ParamType::Matrix => coerce::matrix(raw).map(ParamValue::Matrix),
            ParamType::Nodes => return self.children(kind, spec, raw).map(ParamValue::Nodes),
        };
        value.ok_or_else(|| NodeError::invalid(kind, spec.name, spec.ty.describe()))
    }

    /// Children are built recursively; their own errors pass through unchanged
    fn children(&self, kind: NodeKind, spec: &ParamSpec, raw: &Value) -> Result<Vec<Node>, NodeError> {
        let invalid = || NodeError::invalid(kind, spec.name, spec.ty.describe());
        let items = raw.as_array().ok_or_else(invalid)?;
        let empty = ParamBag::new();

        items
            .iter()
            .map(|item| {
                let (tag, params) = document_parts(item).ok_or_else(invalid)?;
                let child_kind = tag.parse::<NodeKind>().map_err(|_| invalid())?;
                self.build(child_kind, params.unwrap_or(&empty))
            })
            .collect()
    }

    fn default_value(&self, default: ParamDefault) -> Option<ParamValue> {
        match default {
            ParamDefault::Number(v) => Some(ParamValue::Number(v)),
            ParamDefault::Integer(v) => Some(ParamValue::Integer(v)),
            ParamDefault::Boolean(v) => Some(ParamValue::Boolean(v)),
            ParamDefault::Text(v) => Some(ParamValue::Text(v.to_string())),
            ParamDefault::Vector3(v) => Some(ParamValue::Vector3(Vec3::from(v))),
            ParamDefault::Flags3(v) => Some(ParamValue::Flags3(v)),
            ParamDefault::NoNodes => Some(ParamValue::Nodes(Vec::new())),
            ParamDefault::Absent => None,
            ParamDefault::Resolution => Some(ParamValue::Integer(self.options.resolution)),
            ParamDefault::ToolHeight => Some(ParamValue::Number(self.options.tool_height)),
        }
    }
}

/// Split a node document into its kind tag and optional parameter object
fn document_parts(document: &Value) -> Option<(&str, Option<&ParamBag>)> {
    let object = document.as_object()?;
    let tag = object.get("kind")?.as_str()?;
    let params = match object.get("params") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_object()?),
    };
    Some((tag, params))
}

/// Build a node with the default factory options
pub fn build(kind: NodeKind, params: &ParamBag) -> Result<Node, NodeError> {
    NodeFactory::new().build(kind, params)
}

fn construct(p: &mut Params) -> Result<Node, NodeError> {
    let node = match p.kind {
        NodeKind::Cube => Node::Cube {
            size: p.vector3("size")?,
            center: p.boolean("center")?,
        },
        NodeKind::Cylinder => {
            let r = p.number("r")?;
            Node::Cylinder {
                h: p.number("h")?,
                r1: p.opt_number("r1")?.unwrap_or(r),
                r2: p.opt_number("r2")?.unwrap_or(r),
                center: p.boolean("center")?,
                resolution: p.integer("resolution")?,
            }
        }
        NodeKind::Sphere => Node::Sphere {
            r: p.number("r")?,
            resolution: p.integer("resolution")?,
        },
        NodeKind::Polyhedron => Node::Polyhedron {
            points: p.take_points3("points")?,
            faces: p.take_indices("faces")?,
            convexity: p.integer("convexity")?,
        },
        NodeKind::Surface => Node::Surface {
            file: p.take_text("file")?,
            center: p.boolean("center")?,
            invert: p.boolean("invert")?,
            convexity: p.integer("convexity")?,
        },
        NodeKind::Square => Node::Square {
            size: p.vector2("size")?,
            center: p.boolean("center")?,
        },
        NodeKind::Circle => Node::Circle {
            r: p.number("r")?,
            resolution: p.integer("resolution")?,
        },
        NodeKind::Polygon => Node::Polygon {
            points: p.take_points2("points")?,
            paths: p.take_opt_indices("paths")?,
            convexity: p.integer("convexity")?,
        },
        NodeKind::Line => Node::Line {
            start: Point2::from(p.vector2("start")?),
            end: Point2::from(p.vector2("end")?),
            width: p.number("width")?,
            resolution: p.integer("resolution")?,
        },
        NodeKind::Arc => Node::Arc {
            r: p.number("r")?,
            start_angle: p.number("start_angle")?,
            end_angle: p.number("end_angle")?,
            width: p.number("width")?,
            resolution: p.integer("resolution")?,
        },
        NodeKind::Text => Node::Text(TextParams {
            text: p.take_text("text")?,
            size: p.number("size")?,
            font: p.take_text("font")?,
            halign: p.take_text("halign")?,
            valign: p.take_text("valign")?,
            spacing: p.number("spacing")?,
            direction: p.take_text("direction")?,
            language: p.take_text("language")?,
            script: p.take_text("script")?,
            resolution: p.integer("resolution")?,
        }),
        NodeKind::Import => Node::Import {
            file: p.take_text("file")?,
            convexity: p.integer("convexity")?,
            center: p.boolean("center")?,
        },
        NodeKind::Translate => Node::Translate {
            v: p.vector3("v")?,
            children: p.take_nodes("children")?,
        },
        NodeKind::Resize => Node::Resize {
            newsize: p.vector3("newsize")?,
            auto: p.flags3("auto")?,
            children: p.take_nodes("children")?,
        },
        NodeKind::ComposeMatrix => Node::ComposeMatrix {
            matrix: p.matrix("matrix")?,
            children: p.take_nodes("children")?,
        },
        NodeKind::Rotate => Node::Rotate {
            rotation: p.rotation("a", "v")?,
            children: p.take_nodes("children")?,
        },
        NodeKind::Scale => Node::Scale {
            v: p.vector3("v")?,
            children: p.take_nodes("children")?,
        },
        NodeKind::Mirror => Node::Mirror {
            v: p.vector3("v")?,
            children: p.take_nodes("children")?,
        },
        NodeKind::Union => Node::Union(p.take_nodes("children")?),
        NodeKind::Difference => Node::Difference(p.take_nodes("children")?),
        NodeKind::Intersection => Node::Intersection(p.take_nodes("children")?),
        NodeKind::Minkowski => Node::Minkowski(p.take_nodes("children")?),
        NodeKind::Hull => Node::Hull(p.take_nodes("children")?),
        NodeKind::ForLoop => Node::ForLoop {
            expression: p.take_text("expression")?,
            body: p.take_nodes("body")?,
        },
        NodeKind::RoundedCube => Node::RoundedCube {
            size: p.vector3("size")?,
            center: p.boolean("center")?,
            rounding: p.rounding()?,
            resolution: p.integer("resolution")?,
        },
        NodeKind::RoundedCylinder => {
            let r = p.number("r")?;
            Node::RoundedCylinder {
                h: p.number("h")?,
                r1: p.opt_number("r1")?.unwrap_or(r),
                r2: p.opt_number("r2")?.unwrap_or(r),
                center: p.boolean("center")?,
                rounding: p.rounding()?,
                resolution: p.integer("resolution")?,
            }
        }
        NodeKind::RoundedSphere => Node::RoundedSphere {
            r: p.number("r")?,
            rounding: p.rounding()?,
            resolution: p.integer("resolution")?,
        },
        NodeKind::RoundedPolyhedron => Node::RoundedPolyhedron {
            points: p.take_points3("points")?,
            faces: p.take_indices("faces")?,
            convexity: p.integer("convexity")?,
            rounding: p.rounding()?,
            resolution: p.integer("resolution")?,
        },
        NodeKind::RoundedSurface => Node::RoundedSurface {
            file: p.take_text("file")?,
            size: p.vector3("size")?,
            center: p.boolean("center")?,
            invert: p.boolean("invert")?,
            convexity: p.integer("convexity")?,
            rounding: p.rounding()?,
            resolution: p.integer("resolution")?,
        },
    };
    Ok(node)
}
