// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for node construction

use crate::ast::NodeKind;
use thiserror::Error;

/// Errors raised while building a node from a parameter bag.
///
/// Both variants describe caller mistakes and are reported synchronously.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    /// A required parameter was not supplied.
    #[error("missing parameter '{key}' for {kind}")]
    MissingParameter { kind: NodeKind, key: String },

    /// A parameter was supplied with a value that cannot be coerced.
    #[error("invalid type for parameter '{key}' of {kind}: expected {expected}")]
    InvalidParameterType {
        kind: NodeKind,
        key: String,
        expected: String,
    },
}

impl NodeError {
    pub fn missing(kind: NodeKind, key: impl Into<String>) -> Self {
        Self::MissingParameter {
            kind,
            key: key.into(),
        }
    }

    pub fn invalid(kind: NodeKind, key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidParameterType {
            kind,
            key: key.into(),
            expected: expected.into(),
        }
    }

    /// Kind of the node whose construction failed
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::MissingParameter { kind, .. } | Self::InvalidParameterType { kind, .. } => *kind,
        }
    }

    /// Parameter the error refers to
    pub fn key(&self) -> &str {
        match self {
            Self::MissingParameter { key, .. } | Self::InvalidParameterType { key, .. } => key,
        }
    }
}

/// An operation tag that names no known node kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node kind '{0}'")]
pub struct KindParseError(pub String);

/// Errors raised while reading a node document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Kind(#[from] KindParseError),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("malformed node document: {0}")]
    Malformed(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NodeError::missing(NodeKind::Cube, "size");
        assert_eq!(err.to_string(), "missing parameter 'size' for cube");

        let err = NodeError::invalid(NodeKind::Polyhedron, "points", "list of 3D points");
        assert!(err.to_string().contains("expected list of 3D points"));
        assert_eq!(err.key(), "points");
        assert_eq!(err.kind(), NodeKind::Polyhedron);
    }
}
