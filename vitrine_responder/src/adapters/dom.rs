// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Vitrine DOM.
//!
//! ## Feature
//!
//! Enable with `dom_adapter`.
//!
//! ## Notes
//!
//! [`Document`] answers parent queries directly, so a router built with
//! `Router::with_parent(lookup, &doc)` reconstructs document paths. Stale ids
//! have no parent and route as singleton paths.

use alloc::vec::Vec;

use vitrine_dom::{Document, NodeId};

use crate::types::ParentLookup;

impl ParentLookup<NodeId> for Document {
    #[inline]
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }
}

/// Root→target path of `node` in `doc`, or an empty path for stale ids.
///
/// Convenience for feeding [`HoverState`](crate::hover::HoverState) without
/// building a router.
pub fn hover_path(doc: &Document, node: NodeId) -> Vec<NodeId> {
    doc.path_to_root(node)
}
