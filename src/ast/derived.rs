// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Derived nodes: curves and rounded composites expanded into primitives
//!
//! The host format has no fillet primitive, so every rounded composite is
//! the Minkowski sum of a shrunken base shape and a thin cylinder "brush".

use super::bounds::BoundingBox;
use super::node::{Node, Rounding, Vec3, DEFAULT_CONVEXITY};
use crate::utils::math::{deg_to_rad, non_negative};
use nalgebra::{Point2, Point3};

/// Upper bound on the segments of one arc outline
pub const MAX_ARC_SEGMENTS: usize = 4096;

impl Node {
    /// Expand a derived node into the primitives it renders as.
    ///
    /// Returns `None` for nodes that render directly.
    pub fn decompose(&self) -> Option<Node> {
        match self {
            Node::Line {
                start,
                end,
                width,
                resolution,
            } => Some(line_hull(start, end, *width, *resolution)),
            Node::Arc {
                r,
                start_angle,
                end_angle,
                width,
                resolution,
            } => Some(arc_polygon(*r, *start_angle, *end_angle, *width, *resolution)),
            Node::RoundedCube {
                size,
                center,
                rounding,
                resolution,
            } => {
                let rounding = &rounding.clamped();
                let base = Node::Cube {
                    size: shrink_xy(size, rounding.radius),
                    center: *center,
                };
                Some(minkowski(base, rounding, *resolution))
            }
            Node::RoundedCylinder {
                h,
                r1,
                r2,
                center,
                rounding,
                resolution,
            } => {
                let rounding = &rounding.clamped();
                let base = Node::Cylinder {
                    h: *h,
                    r1: non_negative(r1 - rounding.radius),
                    r2: non_negative(r2 - rounding.radius),
                    center: *center,
                    resolution: *resolution,
                };
                Some(minkowski(base, rounding, *resolution))
            }
            Node::RoundedSphere {
                r,
                rounding,
                resolution,
            } => {
                let rounding = &rounding.clamped();
                let sphere = Node::Sphere {
                    r: *r,
                    resolution: *resolution,
                };
                let factor = shrink_factor(2.0 * r, rounding.radius);
                let base = Node::Scale {
                    v: Vec3::new(factor, factor, 1.0),
                    children: vec![sphere],
                };
                Some(minkowski(base, rounding, *resolution))
            }
            Node::RoundedPolyhedron {
                points,
                faces,
                convexity,
                rounding,
                resolution,
            } => {
                let rounding = &rounding.clamped();
                let base = Node::Polyhedron {
                    points: shrink_points_xy(points, rounding.radius),
                    faces: faces.clone(),
                    convexity: *convexity,
                };
                Some(minkowski(base, rounding, *resolution))
            }
            Node::RoundedSurface {
                file,
                size,
                center,
                invert,
                convexity,
                rounding,
                resolution,
            } => {
                let rounding = &rounding.clamped();
                let surface = Node::Surface {
                    file: file.clone(),
                    center: *center,
                    invert: *invert,
                    convexity: *convexity,
                };
                let base = Node::Resize {
                    newsize: shrink_xy(size, rounding.radius),
                    auto: [false; 3],
                    children: vec![surface],
                };
                Some(minkowski(base, rounding, *resolution))
            }
            _ => None,
        }
    }
}

/// Thin centered cylinder used as the Minkowski brush
pub fn rounding_tool(rounding: &Rounding, resolution: u32) -> Node {
    let rounding = rounding.clamped();
    Node::Cylinder {
        h: rounding.tool_height,
        r1: rounding.radius,
        r2: rounding.radius,
        center: true,
        resolution,
    }
}

fn minkowski(base: Node, rounding: &Rounding, resolution: u32) -> Node {
    Node::Minkowski(vec![base, rounding_tool(rounding, resolution)])
}

/// Shrink X and Y by twice the radius, never below zero. Z is untouched
/// because the tool is flat.
fn shrink_xy(size: &Vec3, radius: f64) -> Vec3 {
    Vec3::new(
        non_negative(size.x - 2.0 * radius),
        non_negative(size.y - 2.0 * radius),
        size.z,
    )
}

/// Scale points about the X/Y centre of their bounds so that each X/Y
/// extent shrinks by twice the radius.
fn shrink_points_xy(points: &[Point3<f64>], radius: f64) -> Vec<Point3<f64>> {
    let Some(bbox) = BoundingBox::from_points(points) else {
        return Vec::new();
    };

    let center = bbox.center();
    let extent = bbox.size();
    let (fx, fy) = (shrink_factor(extent.x, radius), shrink_factor(extent.y, radius));

    points
        .iter()
        .map(|p| {
            Point3::new(
                center.x + (p.x - center.x) * fx,
                center.y + (p.y - center.y) * fy,
                p.z,
            )
        })
        .collect()
}

/// Scale factor that shrinks `length` by twice the radius, never below zero
fn shrink_factor(length: f64, radius: f64) -> f64 {
    if length > 0.0 {
        non_negative(length - 2.0 * radius) / length
    } else {
        1.0
    }
}

fn line_hull(start: &Point2<f64>, end: &Point2<f64>, width: f64, resolution: u32) -> Node {
    let cap = |p: &Point2<f64>| {
        Node::translate(
            Vec3::new(p.x, p.y, 0.0),
            vec![Node::circle(width / 2.0, resolution)],
        )
    };
    Node::Hull(vec![cap(start), cap(end)])
}

/// Annular sector between `r - width/2` and `r + width/2`
fn arc_polygon(r: f64, start_angle: f64, end_angle: f64, width: f64, resolution: u32) -> Node {
    let outer = r + width / 2.0;
    let inner = non_negative(r - width / 2.0);
    let sweep = end_angle - start_angle;
    let segments = ((resolution.max(1) as f64) * sweep.abs() / 360.0)
        .ceil()
        .max(1.0)
        .min(MAX_ARC_SEGMENTS as f64) as usize;

    let angle_at = |i: usize| deg_to_rad(start_angle + sweep * i as f64 / segments as f64);
    let on_circle = |radius: f64, angle: f64| Point2::new(radius * angle.cos(), radius * angle.sin());

    let mut points: Vec<Point2<f64>> = (0..=segments)
        .map(|i| on_circle(outer, angle_at(i)))
        .collect();

    if inner > 0.0 {
        points.extend((0..=segments).rev().map(|i| on_circle(inner, angle_at(i))));
    } else {
        points.push(Point2::origin());
    }

    Node::Polygon {
        points,
        paths: None,
        convexity: DEFAULT_CONVEXITY,
    }
}
