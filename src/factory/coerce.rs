// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Best-effort coercion of loosely typed JSON values

use crate::ast::{Vec2, Vec3};
use nalgebra::{Matrix4, Point2, Point3};
use serde_json::Value;

pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

pub fn integer(value: &Value) -> Option<u32> {
    let v = number(value)?;
    if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}

fn index(value: &Value) -> Option<usize> {
    integer(value).map(|v| v as usize)
}

pub fn boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 0.0 => Some(false),
            Some(v) if v == 1.0 => Some(true),
            _ => None,
        },
        _ => None,
    }
}

pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn numbers<const N: usize>(value: &Value) -> Option<[f64; N]> {
    let items = value.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = number(item)?;
    }
    Some(out)
}

/// A 3-element array, or a scalar applied to every axis
pub fn vector3(value: &Value) -> Option<Vec3> {
    if let Some(s) = scalar(value) {
        return Some(Vec3::new(s, s, s));
    }
    numbers::<3>(value).map(Vec3::from)
}

/// A 2-element array, or a scalar applied to both axes
pub fn vector2(value: &Value) -> Option<Vec2> {
    if let Some(s) = scalar(value) {
        return Some(Vec2::new(s, s));
    }
    numbers::<2>(value).map(Vec2::from)
}

fn scalar(value: &Value) -> Option<f64> {
    if value.is_array() {
        None
    } else {
        number(value)
    }
}

pub fn flags3(value: &Value) -> Option<[bool; 3]> {
    if let Some(b) = boolean(value) {
        return Some([b; 3]);
    }
    let items = value.as_array()?;
    if items.len() != 3 {
        return None;
    }
    Some([
        boolean(&items[0])?,
        boolean(&items[1])?,
        boolean(&items[2])?,
    ])
}

pub fn points3(value: &Value) -> Option<Vec<Point3<f64>>> {
    value
        .as_array()?
        .iter()
        .map(|p| numbers::<3>(p).map(Point3::from))
        .collect()
}

pub fn points2(value: &Value) -> Option<Vec<Point2<f64>>> {
    value
        .as_array()?
        .iter()
        .map(|p| numbers::<2>(p).map(Point2::from))
        .collect()
}

pub fn indices(value: &Value) -> Option<Vec<Vec<usize>>> {
    value
        .as_array()?
        .iter()
        .map(|list| list.as_array()?.iter().map(index).collect())
        .collect()
}

/// Row-major 4x4 matrix; a 3x4 matrix gets the homogeneous row appended
pub fn matrix(value: &Value) -> Option<Matrix4<f64>> {
    let rows = value.as_array()?;
    if rows.len() != 3 && rows.len() != 4 {
        return None;
    }

    let mut m = Matrix4::identity();
    for (r, row) in rows.iter().enumerate() {
        let cells = numbers::<4>(row)?;
        for (c, cell) in cells.iter().enumerate() {
            m[(r, c)] = *cell;
        }
    }
    Some(m)
}
