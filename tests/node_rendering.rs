// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Rendering of node trees to OpenSCAD text

use nalgebra::{Point2, Point3};
use scadgen::ast::{Node, Rotation, Rounding, TextParams, Vec2, Vec3, DEFAULT_RESOLUTION};

fn cube(x: f64, y: f64, z: f64) -> Node {
    Node::cube(Vec3::new(x, y, z), false)
}

#[test]
fn test_difference_keeps_base_first() {
    let node = Node::Difference(vec![cube(20.0, 20.0, 20.0), cube(5.0, 5.0, 30.0)]);
    let text = node.render();

    assert_eq!(text, "difference() { cube([20,20,20]); cube([5,5,30]); };");
    assert!(text.find("cube([20,20,20])").unwrap() < text.find("cube([5,5,30])").unwrap());

    let swapped = Node::Difference(vec![cube(5.0, 5.0, 30.0), cube(20.0, 20.0, 20.0)]);
    assert_ne!(swapped.render(), text);
}

#[test]
fn test_every_combinator_renders_children_in_order() {
    let children = || vec![Node::sphere(1.0, 8), Node::circle(2.0, 8)];
    let cases = [
        (Node::Union(children()), "union"),
        (Node::Difference(children()), "difference"),
        (Node::Intersection(children()), "intersection"),
        (Node::Minkowski(children()), "minkowski"),
        (Node::Hull(children()), "hull"),
    ];

    for (node, name) in cases {
        assert_eq!(
            node.render(),
            format!("{}() {{ sphere(r=1, $fn=8); circle(r=2, $fn=8); }};", name)
        );
    }
}

#[test]
fn test_transforms_with_empty_bodies() {
    let nodes = [
        (Node::translate(Vec3::new(1.0, 2.0, 3.0), vec![]), "translate([1,2,3]) { };"),
        (
            Node::Scale {
                v: Vec3::new(2.0, 2.0, 1.0),
                children: vec![],
            },
            "scale([2,2,1]) { };",
        ),
        (
            Node::Mirror {
                v: Vec3::new(1.0, 0.0, 0.0),
                children: vec![],
            },
            "mirror([1,0,0]) { };",
        ),
        (
            Node::Resize {
                newsize: Vec3::new(10.0, 0.0, 0.0),
                auto: [false, true, true],
                children: vec![],
            },
            "resize([10,0,0], auto=[false,true,true]) { };",
        ),
        (Node::Union(vec![]), "union() { };"),
    ];

    for (node, expected) in nodes {
        assert_eq!(node.render(), expected);
    }
}

#[test]
fn test_nested_braces_mirror_tree() {
    let tree = Node::Union(vec![
        Node::translate(
            Vec3::new(0.0, 0.0, 10.0),
            vec![Node::Rotate {
                rotation: Rotation::Euler(Vec3::new(0.0, 90.0, 0.0)),
                children: vec![Node::cylinder(5.0, 1.0, 16)],
            }],
        ),
        cube(1.0, 1.0, 1.0),
    ]);

    let text = tree.render();
    assert_eq!(text.matches('{').count(), 3);
    assert_eq!(text.matches('}').count(), 3);
    assert_eq!(
        text,
        "union() { translate([0,0,10]) { rotate([0,90,0]) { cylinder(r=1, h=5, $fn=16); }; }; cube([1,1,1]); };"
    );
}

#[test]
fn test_indented_matches_compact_statements() {
    let tree = Node::Hull(vec![
        Node::translate(Vec3::new(-5.0, 0.0, 0.0), vec![Node::sphere(2.0, 12)]),
        Node::translate(Vec3::new(5.0, 0.0, 0.0), vec![Node::sphere(2.0, 12)]),
    ]);

    let compact = tree.render();
    let indented = tree.render_indented();
    assert_eq!(
        indented,
        "hull() {\n    translate([-5,0,0]) {\n        sphere(r=2, $fn=12);\n    };\n    translate([5,0,0]) {\n        sphere(r=2, $fn=12);\n    };\n};\n"
    );
    assert_eq!(compact.replace(' ', ""), indented.replace([' ', '\n'], ""));
}

#[test]
fn test_planar_and_special_nodes() {
    let square = Node::Square {
        size: Vec2::new(4.0, 2.5),
        center: true,
    };
    assert_eq!(square.render(), "square([4,2.5], center=true);");

    let polygon = Node::Polygon {
        points: vec![Point2::new(0.0, 0.0), Point2::new(3.0, 0.0), Point2::new(0.0, 4.0)],
        paths: Some(vec![vec![0, 1, 2]]),
        convexity: 10,
    };
    assert_eq!(
        polygon.render(),
        "polygon(points=[[0,0],[3,0],[0,4]], paths=[[0,1,2]], convexity=10);"
    );

    let text = Node::Text(TextParams::new("Hi \"there\"", 5.0));
    assert_eq!(
        text.render(),
        "text(text=\"Hi \\\"there\\\"\", size=5, font=\"Liberation Sans\", halign=\"left\", valign=\"baseline\", spacing=1, direction=\"ltr\", language=\"en\", script=\"latin\", $fn=32);"
    );

    let import = Node::Import {
        file: "part.stl".to_string(),
        convexity: 4,
        center: false,
    };
    assert_eq!(import.render(), "import(file=\"part.stl\", convexity=4);");

    let surface = Node::Surface {
        file: "height.png".to_string(),
        center: true,
        invert: false,
        convexity: 5,
    };
    assert_eq!(
        surface.render(),
        "surface(file=\"height.png\", center=true, invert=false, convexity=5);"
    );
}

#[test]
fn test_polyhedron() {
    let node = Node::Polyhedron {
        points: vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ],
        faces: vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]],
        convexity: 10,
    };
    assert_eq!(
        node.render(),
        "polyhedron(points=[[0,0,0],[1,0,0],[0,1,0],[0,0,1]], faces=[[0,1,2],[0,3,1],[0,2,3],[1,3,2]], convexity=10);"
    );
}

#[test]
fn test_rounded_composites_hide_decomposition() {
    let cube = Node::rounded_cube(Vec3::new(10.0, 10.0, 10.0), 1.0);
    assert_eq!(
        cube.render(),
        "minkowski() { cube([8,8,10]); cylinder(r=1, h=0.001, center=true, $fn=32); };"
    );

    let cylinder = Node::RoundedCylinder {
        h: 10.0,
        r1: 5.0,
        r2: 5.0,
        center: false,
        rounding: Rounding::with_tool_height(2.0, 0.01),
        resolution: 24,
    };
    assert_eq!(
        cylinder.render(),
        "minkowski() { cylinder(r=3, h=10, $fn=24); cylinder(r=2, h=0.01, center=true, $fn=24); };"
    );

    let sphere = Node::RoundedSphere {
        r: 4.0,
        rounding: Rounding::new(0.5),
        resolution: DEFAULT_RESOLUTION,
    };
    assert_eq!(
        sphere.render(),
        "minkowski() { scale([0.875,0.875,1]) { sphere(r=4, $fn=32); }; cylinder(r=0.5, h=0.001, center=true, $fn=32); };"
    );

    let surface = Node::RoundedSurface {
        file: "map.dat".to_string(),
        size: Vec3::new(100.0, 50.0, 8.0),
        center: false,
        invert: false,
        convexity: 10,
        rounding: Rounding::new(5.0),
        resolution: 16,
    };
    assert_eq!(
        surface.render(),
        "minkowski() { resize([90,40,8], auto=[false,false,false]) { surface(file=\"map.dat\", center=false, invert=false, convexity=10); }; cylinder(r=5, h=0.001, center=true, $fn=16); };"
    );
}

#[test]
fn test_rounded_sphere_keeps_full_height() {
    let sphere = Node::RoundedSphere {
        r: 5.0,
        rounding: Rounding::new(1.0),
        resolution: 8,
    };
    assert_eq!(
        sphere.render(),
        "minkowski() { scale([0.8,0.8,1]) { sphere(r=5, $fn=8); }; cylinder(r=1, h=0.001, center=true, $fn=8); };"
    );
}

#[test]
fn test_negative_rounding_renders_valid_text() {
    let cube = Node::rounded_cube(Vec3::new(10.0, 10.0, 10.0), -1.0);
    let text = cube.render();
    assert_eq!(
        text,
        "minkowski() { cube([10,10,10]); cylinder(r=0, h=0.001, center=true, $fn=32); };"
    );
    assert!(!text.contains("=-"));
}

#[test]
fn test_rounded_polyhedron_shrinks_points() {
    let node = Node::RoundedPolyhedron {
        points: vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(0.0, 0.0, 10.0),
        ],
        faces: vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]],
        convexity: 10,
        rounding: Rounding::new(1.0),
        resolution: 8,
    };
    assert_eq!(
        node.render(),
        "minkowski() { polyhedron(points=[[1,1,0],[9,1,0],[1,9,0],[1,1,10]], faces=[[0,1,2],[0,3,1],[0,2,3],[1,3,2]], convexity=10); cylinder(r=1, h=0.001, center=true, $fn=8); };"
    );
}

#[test]
fn test_curves_render_through_primitives() {
    let line = Node::Line {
        start: Point2::new(0.0, 0.0),
        end: Point2::new(20.0, 0.0),
        width: 2.0,
        resolution: 12,
    };
    assert_eq!(
        line.render(),
        "hull() { translate([0,0,0]) { circle(r=1, $fn=12); }; translate([20,0,0]) { circle(r=1, $fn=12); }; };"
    );

    let arc = Node::Arc {
        r: 10.0,
        start_angle: 0.0,
        end_angle: 180.0,
        width: 20.0,
        resolution: 4,
    };
    // Inner radius collapses to the centre point
    assert_eq!(
        arc.render(),
        "polygon(points=[[20,0],[0,20],[-20,0],[0,0]], convexity=10);"
    );
}

#[test]
fn test_nodes_serialize() {
    let node = Node::Union(vec![Node::rounded_cube(Vec3::new(4.0, 4.0, 4.0), 0.5)]);
    let json = serde_json::to_string(&node).unwrap();
    let back: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(back, node);
}
