// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Node factory and parameter validation
//!
//! Every node kind has one declared schema; `build` checks a loosely typed
//! parameter bag against it before the typed node is constructed.

mod batch;
mod builder;
mod coerce;
mod schema;

pub use batch::render_documents;
pub use builder::{build, FactoryOptions, NodeFactory, ParamBag};
pub use schema::{required_keys, schema, ParamDefault, ParamSpec, ParamType};
