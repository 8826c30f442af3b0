// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel building and rendering of many node documents using rayon

use super::builder::NodeFactory;
use crate::ast::RenderStyle;
use crate::error::DocumentError;
use rayon::prelude::*;
use serde_json::Value;

/// Build and render every document in parallel.
///
/// Results come back in input order, one per document.
pub fn render_documents(
    factory: &NodeFactory,
    documents: &[Value],
    style: RenderStyle,
) -> Vec<Result<String, DocumentError>> {
    documents
        .par_iter()
        .map(|document| {
            factory
                .build_document(document)
                .map(|node| node.render_with(style))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_documents_keeps_order() {
        let documents = vec![
            json!({ "kind": "sphere", "params": { "r": 1, "resolution": 8 } }),
            json!({ "kind": "circle" }),
            json!({ "kind": "square", "params": { "size": 2 } }),
        ];

        let results = render_documents(&NodeFactory::new(), &documents, RenderStyle::Compact);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), "sphere(r=1, $fn=8);");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap(), "square([2,2]);");
    }
}
