// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scadgen::ast::{Node, Vec3};
use scadgen::axis::{normalize, AxisBounds, BackgroundTheme, UnitSystem};
use scadgen::factory::{render_documents, NodeFactory};
use scadgen::{render_json, RenderStyle};
use serde_json::{json, Value};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    let simple = r#"{"kind": "cube", "params": {"size": [10, 10, 10]}}"#;
    group.bench_with_input(BenchmarkId::new("simple_cube", ""), &simple, |b, source| {
        b.iter(|| render_json(black_box(source)).unwrap());
    });

    let nested = r#"{
        "kind": "difference",
        "params": {"children": [
            {"kind": "rounded_cube", "params": {"size": [20, 20, 20], "round_r": 2}},
            {"kind": "translate", "params": {"v": [10, 10, 10], "children": [
                {"kind": "sphere", "params": {"r": 15}}
            ]}}
        ]}
    }"#;
    group.bench_with_input(BenchmarkId::new("nested", ""), &nested, |b, source| {
        b.iter(|| render_json(black_box(source)).unwrap());
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for depth in [4usize, 8, 12] {
        let mut tree = Node::cube(Vec3::new(1.0, 1.0, 1.0), true);
        for level in 0..depth {
            tree = Node::Union(vec![
                Node::translate(Vec3::new(level as f64, 0.0, 0.0), vec![tree.clone()]),
                Node::rounded_cube(Vec3::new(4.0, 4.0, 4.0), 0.5),
            ]);
        }

        group.bench_with_input(BenchmarkId::new("compact", depth), &tree, |b, tree| {
            b.iter(|| black_box(tree).render());
        });
        group.bench_with_input(BenchmarkId::new("indented", depth), &tree, |b, tree| {
            b.iter(|| black_box(tree).render_indented());
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let factory = NodeFactory::new();
    let documents: Vec<Value> = (0..256)
        .map(|i| json!({ "kind": "rounded_cylinder", "params": { "h": 10, "r": 5 + i % 7, "round_r": 1 } }))
        .collect();

    c.bench_function("batch_256", |b| {
        b.iter(|| render_documents(&factory, black_box(&documents), RenderStyle::Compact));
    });
}

fn bench_axis(c: &mut Criterion) {
    let mut group = c.benchmark_group("axis");
    let bounds = AxisBounds::from_raw(-137.0, 412.5, 33.0, 33.0, -80.2, -12.0);

    for unit in [UnitSystem::Metric, UnitSystem::Imperial] {
        group.bench_function(BenchmarkId::new("normalize", unit), |b| {
            b.iter(|| normalize(black_box(bounds), unit));
        });

        let normalized = normalize(bounds, unit);
        group.bench_function(BenchmarkId::new("render", unit), |b| {
            b.iter(|| scadgen::axis::render(black_box(&normalized), unit, BackgroundTheme::Dark));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_render, bench_batch, bench_axis);
criterion_main!(benches);
