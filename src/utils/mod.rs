// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Utility functions

pub mod math;
pub mod units;

pub use math::{approx_eq, fmt_num, round_to};
