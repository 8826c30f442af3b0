// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Rendering of node trees into OpenSCAD script text

use super::node::{Node, Rotation, TextParams, Vec2, Vec3};
use crate::utils::math::{approx_eq, fmt_num};
use nalgebra::{Matrix4, Point2, Point3};

const INDENT: &str = "    ";

/// Output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// Single line, children separated by spaces
    Compact,
    /// One statement per line, nested blocks indented
    Indented,
}

/// Shape of a node once its arguments are formatted
enum Statement<'a> {
    Call(String),
    Block { header: String, children: &'a [Node] },
    Derived(Node),
}

impl Node {
    /// Render this node in its canonical single-line form
    pub fn render(&self) -> String {
        self.render_with(RenderStyle::Compact)
    }

    /// Render this node with one statement per line
    pub fn render_indented(&self) -> String {
        self.render_with(RenderStyle::Indented)
    }

    pub fn render_with(&self, style: RenderStyle) -> String {
        let mut out = String::new();
        write_node(self, style, 0, &mut out);
        out
    }

    fn statement(&self) -> Statement<'_> {
        if let Some(derived) = self.decompose() {
            return Statement::Derived(derived);
        }

        match self {
            Node::Cube { size, center } => {
                Statement::Call(format!("cube({}{})", vec3(size), center_arg(*center)))
            }
            Node::Cylinder {
                h,
                r1,
                r2,
                center,
                resolution,
            } => {
                let radii = if approx_eq(*r1, *r2, 1e-9) {
                    format!("r={}", fmt_num(*r1))
                } else {
                    format!("r1={}, r2={}", fmt_num(*r1), fmt_num(*r2))
                };
                Statement::Call(format!(
                    "cylinder({}, h={}{}, $fn={})",
                    radii,
                    fmt_num(*h),
                    center_arg(*center),
                    resolution
                ))
            }
            Node::Sphere { r, resolution } => {
                Statement::Call(format!("sphere(r={}, $fn={})", fmt_num(*r), resolution))
            }
            Node::Polyhedron {
                points,
                faces,
                convexity,
            } => Statement::Call(format!(
                "polyhedron(points={}, faces={}, convexity={})",
                points3(points),
                indices(faces),
                convexity
            )),
            Node::Surface {
                file,
                center,
                invert,
                convexity,
            } => Statement::Call(format!(
                "surface(file={}, center={}, invert={}, convexity={})",
                quote(file),
                center,
                invert,
                convexity
            )),
            Node::Square { size, center } => {
                Statement::Call(format!("square({}{})", vec2(size), center_arg(*center)))
            }
            Node::Circle { r, resolution } => {
                Statement::Call(format!("circle(r={}, $fn={})", fmt_num(*r), resolution))
            }
            Node::Polygon {
                points,
                paths,
                convexity,
            } => {
                let paths = paths
                    .as_ref()
                    .map(|p| format!(", paths={}", indices(p)))
                    .unwrap_or_default();
                Statement::Call(format!(
                    "polygon(points={}{}, convexity={})",
                    points2(points),
                    paths,
                    convexity
                ))
            }
            Node::Text(params) => Statement::Call(text_call(params)),
            Node::Import {
                file,
                convexity,
                center,
            } => Statement::Call(format!(
                "import(file={}, convexity={}{})",
                quote(file),
                convexity,
                center_arg(*center)
            )),
            Node::Translate { v, children } => Statement::Block {
                header: format!("translate({})", vec3(v)),
                children,
            },
            Node::Resize {
                newsize,
                auto,
                children,
            } => Statement::Block {
                header: format!(
                    "resize({}, auto=[{},{},{}])",
                    vec3(newsize),
                    auto[0],
                    auto[1],
                    auto[2]
                ),
                children,
            },
            Node::ComposeMatrix { matrix, children } => Statement::Block {
                header: format!("multmatrix({})", matrix4(matrix)),
                children,
            },
            Node::Rotate { rotation, children } => Statement::Block {
                header: match rotation {
                    Rotation::Euler(a) => format!("rotate({})", vec3(a)),
                    Rotation::Axis { angle, axis } => {
                        format!("rotate(a={}, v={})", fmt_num(*angle), vec3(axis))
                    }
                },
                children,
            },
            Node::Scale { v, children } => Statement::Block {
                header: format!("scale({})", vec3(v)),
                children,
            },
            Node::Mirror { v, children } => Statement::Block {
                header: format!("mirror({})", vec3(v)),
                children,
            },
            Node::Union(children) => combinator("union", children),
            Node::Difference(children) => combinator("difference", children),
            Node::Intersection(children) => combinator("intersection", children),
            Node::Minkowski(children) => combinator("minkowski", children),
            Node::Hull(children) => combinator("hull", children),
            Node::ForLoop { expression, body } => Statement::Block {
                header: format!("for ({})", expression.trim()),
                children: body,
            },
            // Handled by decompose() above
            Node::Line { .. }
            | Node::Arc { .. }
            | Node::RoundedCube { .. }
            | Node::RoundedCylinder { .. }
            | Node::RoundedSphere { .. }
            | Node::RoundedPolyhedron { .. }
            | Node::RoundedSurface { .. } => unreachable!("derived nodes always decompose"),
        }
    }
}

fn write_node(node: &Node, style: RenderStyle, depth: usize, out: &mut String) {
    match node.statement() {
        Statement::Derived(derived) => write_node(&derived, style, depth, out),
        Statement::Call(call) => match style {
            RenderStyle::Compact => {
                out.push_str(&call);
                out.push(';');
            }
            RenderStyle::Indented => {
                push_indent(out, depth);
                out.push_str(&call);
                out.push_str(";\n");
            }
        },
        Statement::Block { header, children } => match style {
            RenderStyle::Compact => {
                out.push_str(&header);
                out.push_str(" { ");
                for child in children {
                    write_node(child, style, depth + 1, out);
                    out.push(' ');
                }
                out.push_str("};");
            }
            RenderStyle::Indented => {
                push_indent(out, depth);
                out.push_str(&header);
                if children.is_empty() {
                    out.push_str(" { };\n");
                    return;
                }
                out.push_str(" {\n");
                for child in children {
                    write_node(child, style, depth + 1, out);
                }
                push_indent(out, depth);
                out.push_str("};\n");
            }
        },
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn combinator<'a>(name: &str, children: &'a [Node]) -> Statement<'a> {
    Statement::Block {
        header: format!("{}()", name),
        children,
    }
}

fn text_call(p: &TextParams) -> String {
    format!(
        "text(text={}, size={}, font={}, halign={}, valign={}, spacing={}, direction={}, language={}, script={}, $fn={})",
        quote(&p.text),
        fmt_num(p.size),
        quote(&p.font),
        quote(&p.halign),
        quote(&p.valign),
        fmt_num(p.spacing),
        quote(&p.direction),
        quote(&p.language),
        quote(&p.script),
        p.resolution
    )
}

fn center_arg(center: bool) -> &'static str {
    if center {
        ", center=true"
    } else {
        ""
    }
}

/// Double-quoted string literal
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn vec3(v: &Vec3) -> String {
    format!("[{},{},{}]", fmt_num(v.x), fmt_num(v.y), fmt_num(v.z))
}

pub fn vec2(v: &Vec2) -> String {
    format!("[{},{}]", fmt_num(v.x), fmt_num(v.y))
}

fn points3(points: &[Point3<f64>]) -> String {
    let items: Vec<String> = points.iter().map(|p| vec3(&p.coords)).collect();
    format!("[{}]", items.join(","))
}

fn points2(points: &[Point2<f64>]) -> String {
    let items: Vec<String> = points.iter().map(|p| vec2(&p.coords)).collect();
    format!("[{}]", items.join(","))
}

fn indices(lists: &[Vec<usize>]) -> String {
    let items: Vec<String> = lists
        .iter()
        .map(|list| {
            let idx: Vec<String> = list.iter().map(|i| i.to_string()).collect();
            format!("[{}]", idx.join(","))
        })
        .collect();
    format!("[{}]", items.join(","))
}

fn matrix4(m: &Matrix4<f64>) -> String {
    let rows: Vec<String> = (0..4)
        .map(|r| {
            let cells: Vec<String> = (0..4).map(|c| fmt_num(m[(r, c)])).collect();
            format!("[{}]", cells.join(","))
        })
        .collect();
    format!("[{}]", rows.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Rounding, DEFAULT_RESOLUTION};

    #[test]
    fn test_render_cube() {
        let node = Node::cube(Vec3::new(10.0, 20.0, 30.0), false);
        assert_eq!(node.render(), "cube([10,20,30]);");

        let node = Node::cube(Vec3::new(1.5, 1.0, 1.0), true);
        assert_eq!(node.render(), "cube([1.5,1,1], center=true);");
    }

    #[test]
    fn test_render_cylinder_and_cone() {
        assert_eq!(
            Node::cylinder(10.0, 2.0, 16).render(),
            "cylinder(r=2, h=10, $fn=16);"
        );
        let cone = Node::Cylinder {
            h: 5.0,
            r1: 3.0,
            r2: 1.0,
            center: true,
            resolution: DEFAULT_RESOLUTION,
        };
        assert_eq!(
            cone.render(),
            "cylinder(r1=3, r2=1, h=5, center=true, $fn=32);"
        );
    }

    #[test]
    fn test_difference_preserves_order() {
        let node = Node::Difference(vec![
            Node::cube(Vec3::new(10.0, 10.0, 10.0), false),
            Node::cube(Vec3::new(5.0, 5.0, 5.0), false),
        ]);
        assert_eq!(
            node.render(),
            "difference() { cube([10,10,10]); cube([5,5,5]); };"
        );
    }

    #[test]
    fn test_empty_transform_keeps_body() {
        let node = Node::translate(Vec3::new(1.0, 0.0, -2.0), vec![]);
        assert_eq!(node.render(), "translate([1,0,-2]) { };");
        assert_eq!(node.render_indented(), "translate([1,0,-2]) { };\n");
    }

    #[test]
    fn test_rounded_cube_renders_minkowski() {
        let node = Node::RoundedCube {
            size: Vec3::new(10.0, 10.0, 10.0),
            center: false,
            rounding: Rounding::new(1.0),
            resolution: DEFAULT_RESOLUTION,
        };
        assert_eq!(
            node.render(),
            "minkowski() { cube([8,8,10]); cylinder(r=1, h=0.001, center=true, $fn=32); };"
        );
    }

    #[test]
    fn test_indented_nesting() {
        let node = Node::Union(vec![Node::translate(
            Vec3::new(0.0, 0.0, 5.0),
            vec![Node::sphere(2.0, 8)],
        )]);
        let expected = "union() {\n    translate([0,0,5]) {\n        sphere(r=2, $fn=8);\n    };\n};\n";
        assert_eq!(node.render_indented(), expected);
    }

    #[test]
    fn test_rotate_forms() {
        let euler = Node::Rotate {
            rotation: Rotation::Euler(Vec3::new(90.0, 0.0, 45.0)),
            children: vec![Node::circle(1.0, 6)],
        };
        assert_eq!(euler.render(), "rotate([90,0,45]) { circle(r=1, $fn=6); };");

        let axis = Node::Rotate {
            rotation: Rotation::Axis {
                angle: 30.0,
                axis: Vec3::new(0.0, 0.0, 1.0),
            },
            children: vec![],
        };
        assert_eq!(axis.render(), "rotate(a=30, v=[0,0,1]) { };");
    }

    #[test]
    fn test_multmatrix() {
        let node = Node::ComposeMatrix {
            matrix: Matrix4::new_translation(&Vec3::new(1.0, 2.0, 3.0)),
            children: vec![],
        };
        assert_eq!(
            node.render(),
            "multmatrix([[1,0,0,1],[0,1,0,2],[0,0,1,3],[0,0,0,1]]) { };"
        );
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn test_for_loop() {
        let node = Node::ForLoop {
            expression: "i = [0:2]".to_string(),
            body: vec![Node::translate(
                Vec3::new(0.0, 0.0, 0.0),
                vec![Node::cube(Vec3::new(1.0, 1.0, 1.0), false)],
            )],
        };
        assert_eq!(
            node.render(),
            "for (i = [0:2]) { translate([0,0,0]) { cube([1,1,1]); }; };"
        );
    }
}
