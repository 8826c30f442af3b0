// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! AST Node definitions

use crate::error::KindParseError;
use crate::utils::math::non_negative;
use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 3D Vector type alias
pub type Vec3 = Vector3<f64>;
/// 2D Vector type alias
pub type Vec2 = Vector2<f64>;

/// `$fn` used by curved nodes when none is given
pub const DEFAULT_RESOLUTION: u32 = 32;
/// Height of the Minkowski rounding tool
pub const DEFAULT_TOOL_HEIGHT: f64 = 0.001;
pub const DEFAULT_CONVEXITY: u32 = 10;

/// Operation tag naming every node variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Cube,
    Cylinder,
    Sphere,
    Polyhedron,
    Surface,
    Square,
    Circle,
    Polygon,
    Line,
    Arc,
    Text,
    Import,
    Translate,
    Resize,
    ComposeMatrix,
    Rotate,
    Scale,
    Mirror,
    Union,
    Difference,
    Intersection,
    Minkowski,
    Hull,
    ForLoop,
    RoundedCube,
    RoundedCylinder,
    RoundedSphere,
    RoundedPolyhedron,
    RoundedSurface,
}

/// Coarse grouping of node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    Solid,
    Planar,
    Curve,
    Special,
    Placement,
    Orientation,
    Combinator,
    Iteration,
    Rounded,
}

impl NodeKind {
    pub const ALL: [NodeKind; 29] = [
        NodeKind::Cube,
        NodeKind::Cylinder,
        NodeKind::Sphere,
        NodeKind::Polyhedron,
        NodeKind::Surface,
        NodeKind::Square,
        NodeKind::Circle,
        NodeKind::Polygon,
        NodeKind::Line,
        NodeKind::Arc,
        NodeKind::Text,
        NodeKind::Import,
        NodeKind::Translate,
        NodeKind::Resize,
        NodeKind::ComposeMatrix,
        NodeKind::Rotate,
        NodeKind::Scale,
        NodeKind::Mirror,
        NodeKind::Union,
        NodeKind::Difference,
        NodeKind::Intersection,
        NodeKind::Minkowski,
        NodeKind::Hull,
        NodeKind::ForLoop,
        NodeKind::RoundedCube,
        NodeKind::RoundedCylinder,
        NodeKind::RoundedSphere,
        NodeKind::RoundedPolyhedron,
        NodeKind::RoundedSurface,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Cube => "cube",
            NodeKind::Cylinder => "cylinder",
            NodeKind::Sphere => "sphere",
            NodeKind::Polyhedron => "polyhedron",
            NodeKind::Surface => "surface",
            NodeKind::Square => "square",
            NodeKind::Circle => "circle",
            NodeKind::Polygon => "polygon",
            NodeKind::Line => "line",
            NodeKind::Arc => "arc",
            NodeKind::Text => "text",
            NodeKind::Import => "import",
            NodeKind::Translate => "translate",
            NodeKind::Resize => "resize",
            NodeKind::ComposeMatrix => "compose_matrix",
            NodeKind::Rotate => "rotate",
            NodeKind::Scale => "scale",
            NodeKind::Mirror => "mirror",
            NodeKind::Union => "union",
            NodeKind::Difference => "difference",
            NodeKind::Intersection => "intersection",
            NodeKind::Minkowski => "minkowski",
            NodeKind::Hull => "hull",
            NodeKind::ForLoop => "for_loop",
            NodeKind::RoundedCube => "rounded_cube",
            NodeKind::RoundedCylinder => "rounded_cylinder",
            NodeKind::RoundedSphere => "rounded_sphere",
            NodeKind::RoundedPolyhedron => "rounded_polyhedron",
            NodeKind::RoundedSurface => "rounded_surface",
        }
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            NodeKind::Cube
            | NodeKind::Cylinder
            | NodeKind::Sphere
            | NodeKind::Polyhedron
            | NodeKind::Surface => NodeCategory::Solid,
            NodeKind::Square | NodeKind::Circle | NodeKind::Polygon => NodeCategory::Planar,
            NodeKind::Line | NodeKind::Arc => NodeCategory::Curve,
            NodeKind::Text | NodeKind::Import => NodeCategory::Special,
            NodeKind::Translate | NodeKind::Resize | NodeKind::ComposeMatrix => {
                NodeCategory::Placement
            }
            NodeKind::Rotate | NodeKind::Scale | NodeKind::Mirror => NodeCategory::Orientation,
            NodeKind::Union
            | NodeKind::Difference
            | NodeKind::Intersection
            | NodeKind::Minkowski
            | NodeKind::Hull => NodeCategory::Combinator,
            NodeKind::ForLoop => NodeCategory::Iteration,
            NodeKind::RoundedCube
            | NodeKind::RoundedCylinder
            | NodeKind::RoundedSphere
            | NodeKind::RoundedPolyhedron
            | NodeKind::RoundedSurface => NodeCategory::Rounded,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase().replace('-', "_");
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| KindParseError(s.to_string()))
    }
}

/// Parameters of a `text()` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextParams {
    pub text: String,
    pub size: f64,
    pub font: String,
    pub halign: String,
    pub valign: String,
    pub spacing: f64,
    pub direction: String,
    pub language: String,
    pub script: String,
    pub resolution: u32,
}

impl TextParams {
    pub fn new(text: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            size,
            font: "Liberation Sans".to_string(),
            halign: "left".to_string(),
            valign: "baseline".to_string(),
            spacing: 1.0,
            direction: "ltr".to_string(),
            language: "en".to_string(),
            script: "latin".to_string(),
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

/// Rotation given either as Euler angles or as an angle about an axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rotation {
    Euler(Vec3),
    Axis { angle: f64, axis: Vec3 },
}

/// Fillet settings shared by the rounded composites
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rounding {
    /// Radius of the rounding tool
    pub radius: f64,
    /// Height of the rounding tool cylinder
    pub tool_height: f64,
}

impl Rounding {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            tool_height: DEFAULT_TOOL_HEIGHT,
        }
    }

    pub fn with_tool_height(radius: f64, tool_height: f64) -> Self {
        Self {
            radius,
            tool_height,
        }
    }

    /// Copy with negative radius and tool height clamped to zero
    pub fn clamped(&self) -> Self {
        Self {
            radius: non_negative(self.radius),
            tool_height: non_negative(self.tool_height),
        }
    }
}

/// One element of the geometry tree.
///
/// Children are owned by their parent; a tree never shares subtrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    // Solids
    Cube {
        size: Vec3,
        center: bool,
    },
    Cylinder {
        h: f64,
        r1: f64,
        r2: f64,
        center: bool,
        resolution: u32,
    },
    Sphere {
        r: f64,
        resolution: u32,
    },
    Polyhedron {
        points: Vec<Point3<f64>>,
        faces: Vec<Vec<usize>>,
        convexity: u32,
    },
    Surface {
        file: String,
        center: bool,
        invert: bool,
        convexity: u32,
    },

    // Planar
    Square {
        size: Vec2,
        center: bool,
    },
    Circle {
        r: f64,
        resolution: u32,
    },
    Polygon {
        points: Vec<Point2<f64>>,
        paths: Option<Vec<Vec<usize>>>,
        convexity: u32,
    },

    // Curves
    Line {
        start: Point2<f64>,
        end: Point2<f64>,
        width: f64,
        resolution: u32,
    },
    Arc {
        r: f64,
        start_angle: f64,
        end_angle: f64,
        width: f64,
        resolution: u32,
    },

    // Special
    Text(TextParams),
    Import {
        file: String,
        convexity: u32,
        center: bool,
    },

    // Placement
    Translate {
        v: Vec3,
        children: Vec<Node>,
    },
    Resize {
        newsize: Vec3,
        auto: [bool; 3],
        children: Vec<Node>,
    },
    ComposeMatrix {
        matrix: Matrix4<f64>,
        children: Vec<Node>,
    },

    // Orientation
    Rotate {
        rotation: Rotation,
        children: Vec<Node>,
    },
    Scale {
        v: Vec3,
        children: Vec<Node>,
    },
    Mirror {
        v: Vec3,
        children: Vec<Node>,
    },

    // Combinators
    Union(Vec<Node>),
    Difference(Vec<Node>),
    Intersection(Vec<Node>),
    Minkowski(Vec<Node>),
    Hull(Vec<Node>),

    // Iteration
    ForLoop {
        expression: String,
        body: Vec<Node>,
    },

    // Rounded composites
    RoundedCube {
        size: Vec3,
        center: bool,
        rounding: Rounding,
        resolution: u32,
    },
    RoundedCylinder {
        h: f64,
        r1: f64,
        r2: f64,
        center: bool,
        rounding: Rounding,
        resolution: u32,
    },
    RoundedSphere {
        r: f64,
        rounding: Rounding,
        resolution: u32,
    },
    RoundedPolyhedron {
        points: Vec<Point3<f64>>,
        faces: Vec<Vec<usize>>,
        convexity: u32,
        rounding: Rounding,
        resolution: u32,
    },
    RoundedSurface {
        file: String,
        size: Vec3,
        center: bool,
        invert: bool,
        convexity: u32,
        rounding: Rounding,
        resolution: u32,
    },
}

impl Node {
    pub fn cube(size: Vec3, center: bool) -> Self {
        Node::Cube { size, center }
    }

    pub fn cylinder(h: f64, r: f64, resolution: u32) -> Self {
        Node::Cylinder {
            h,
            r1: r,
            r2: r,
            center: false,
            resolution,
        }
    }

    pub fn sphere(r: f64, resolution: u32) -> Self {
        Node::Sphere { r, resolution }
    }

    pub fn circle(r: f64, resolution: u32) -> Self {
        Node::Circle { r, resolution }
    }

    pub fn translate(v: Vec3, children: Vec<Node>) -> Self {
        Node::Translate { v, children }
    }

    pub fn rounded_cube(size: Vec3, round_r: f64) -> Self {
        Node::RoundedCube {
            size,
            center: false,
            rounding: Rounding::new(round_r),
            resolution: DEFAULT_RESOLUTION,
        }
    }

    /// Operation tag of this node
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Cube { .. } => NodeKind::Cube,
            Node::Cylinder { .. } => NodeKind::Cylinder,
            Node::Sphere { .. } => NodeKind::Sphere,
            Node::Polyhedron { .. } => NodeKind::Polyhedron,
            Node::Surface { .. } => NodeKind::Surface,
            Node::Square { .. } => NodeKind::Square,
            Node::Circle { .. } => NodeKind::Circle,
            Node::Polygon { .. } => NodeKind::Polygon,
            Node::Line { .. } => NodeKind::Line,
            Node::Arc { .. } => NodeKind::Arc,
            Node::Text(_) => NodeKind::Text,
            Node::Import { .. } => NodeKind::Import,
            Node::Translate { .. } => NodeKind::Translate,
            Node::Resize { .. } => NodeKind::Resize,
            Node::ComposeMatrix { .. } => NodeKind::ComposeMatrix,
            Node::Rotate { .. } => NodeKind::Rotate,
            Node::Scale { .. } => NodeKind::Scale,
            Node::Mirror { .. } => NodeKind::Mirror,
            Node::Union(_) => NodeKind::Union,
            Node::Difference(_) => NodeKind::Difference,
            Node::Intersection(_) => NodeKind::Intersection,
            Node::Minkowski(_) => NodeKind::Minkowski,
            Node::Hull(_) => NodeKind::Hull,
            Node::ForLoop { .. } => NodeKind::ForLoop,
            Node::RoundedCube { .. } => NodeKind::RoundedCube,
            Node::RoundedCylinder { .. } => NodeKind::RoundedCylinder,
            Node::RoundedSphere { .. } => NodeKind::RoundedSphere,
            Node::RoundedPolyhedron { .. } => NodeKind::RoundedPolyhedron,
            Node::RoundedSurface { .. } => NodeKind::RoundedSurface,
        }
    }

    /// Direct children in render order
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Translate { children, .. }
            | Node::Resize { children, .. }
            | Node::ComposeMatrix { children, .. }
            | Node::Rotate { children, .. }
            | Node::Scale { children, .. }
            | Node::Mirror { children, .. } => children,
            Node::Union(children)
            | Node::Difference(children)
            | Node::Intersection(children)
            | Node::Minkowski(children)
            | Node::Hull(children) => children,
            Node::ForLoop { body, .. } => body,
            _ => &[],
        }
    }

    /// Total number of nodes in this subtree, counting `self`
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>().unwrap(), kind);
        }
        assert_eq!("Rounded-Cube".parse::<NodeKind>().unwrap(), NodeKind::RoundedCube);
        assert!("torus".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_kind_of_node() {
        let node = Node::Difference(vec![
            Node::cube(Vec3::new(1.0, 1.0, 1.0), false),
            Node::sphere(1.0, DEFAULT_RESOLUTION),
        ]);
        assert_eq!(node.kind(), NodeKind::Difference);
        assert_eq!(node.kind().category(), NodeCategory::Combinator);
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.node_count(), 3);
    }

    #[test]
    fn test_leaf_has_no_children() {
        let node = Node::circle(2.0, 16);
        assert!(node.children().is_empty());
        assert_eq!(node.kind().category(), NodeCategory::Planar);
    }
}
