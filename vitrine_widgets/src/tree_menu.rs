// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree menu controller.
//!
//! ## Structure
//!
//! A `.tree-menu` holds `.tree-item`s. An item with a `.tree-children` list is
//! a branch; one without is a leaf. Each item has a `.tree-link` and branches
//! may also have a `.tree-toggle`.
//!
//! ## Rules
//!
//! - Exactly one link in a tree is active; activating a link clears the
//!   previous one first.
//! - Activating a branch toggles it. In accordion mode, expanding a branch
//!   collapses its open siblings at the same level.
//! - Activating a leaf collapses every open branch in the tree, whatever the
//!   mode.
//!
//! ## Initialization
//!
//! Each tree needs one-time setup (id, mode, ARIA state). It is applied by
//! [`ensure_initialized`], which is keyed by node identity and guarded by the
//! `data-tree-initialized` marker, so repeated observation is harmless.

use std::collections::HashMap;

use vitrine_dom::{Document, NodeId};

use crate::markers::{aria_bool, attr, class};
use crate::runtime::Cx;

/// Branch expansion policy of a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TreeMode {
    /// One expanded branch among siblings.
    #[default]
    Accordion,
    /// Branches expand independently.
    MultiExpand,
}

impl TreeMode {
    /// Parse a `data-tree-mode` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "accordion" => Some(Self::Accordion),
            "multi-expand" | "multi" => Some(Self::MultiExpand),
            _ => None,
        }
    }

    /// Attribute spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accordion => "accordion",
            Self::MultiExpand => "multi-expand",
        }
    }
}

/// Per-tree state recorded at initialization.
pub type TreeModes = HashMap<NodeId, TreeMode>;

/// One-time setup of a tree. Returns true if this call initialized it.
pub fn ensure_initialized(
    doc: &mut Document,
    tree: NodeId,
    modes: &mut TreeModes,
    default: TreeMode,
) -> bool {
    let mode = doc
        .attr(tree, attr::TREE_MODE)
        .and_then(TreeMode::parse)
        .unwrap_or(default);
    if doc.has_attr(tree, attr::TREE_INITIALIZED) {
        modes.entry(tree).or_insert(mode);
        return false;
    }
    if !doc.has_attr(tree, attr::TREE_ID) {
        doc.set_attr(tree, attr::TREE_ID, &format!("tree-{}", tree.slot()));
    }
    modes.insert(tree, mode);
    for item in doc.query_class(tree, class::TREE_ITEM) {
        if children_of(doc, item).is_some() {
            let expanded = doc.has_class(item, class::IS_EXPANDED);
            set_branch(doc, item, expanded);
        }
    }
    doc.set_attr(tree, attr::TREE_INITIALIZED, "");
    log::debug!("initialized tree {tree:?} in {} mode", mode.as_str());
    true
}

/// The item's own `.tree-children` list, if it is a branch.
pub fn children_of(doc: &Document, item: NodeId) -> Option<NodeId> {
    doc.element_children(item)
        .find(|c| doc.has_class(*c, class::TREE_CHILDREN))
}

fn own_part(doc: &Document, item: NodeId, cls: &str) -> Option<NodeId> {
    doc.query_class(item, cls)
        .into_iter()
        .find(|n| doc.closest_class(*n, class::TREE_ITEM) == Some(item))
}

/// Expand or collapse a branch and mirror the state.
pub fn set_branch(doc: &mut Document, item: NodeId, expanded: bool) {
    let Some(children) = children_of(doc, item) else {
        return;
    };
    doc.set_class(item, class::IS_EXPANDED, expanded);
    doc.set_hidden(children, !expanded);
    for part in [class::TREE_TOGGLE, class::TREE_LINK] {
        if let Some(p) = own_part(doc, item, part) {
            doc.set_attr(p, attr::ARIA_EXPANDED, aria_bool(expanded));
        }
    }
}

fn sibling_items(doc: &Document, item: NodeId) -> Vec<NodeId> {
    let Some(list) = doc.parent(item) else {
        return Vec::new();
    };
    doc.element_children(list)
        .filter(|c| *c != item && doc.has_class(*c, class::TREE_ITEM))
        .collect()
}

fn mode_of(doc: &mut Document, tree: NodeId, modes: &mut TreeModes, default: TreeMode) -> TreeMode {
    ensure_initialized(doc, tree, modes, default);
    modes.get(&tree).copied().unwrap_or(default)
}

fn toggle_branch(doc: &mut Document, tree: NodeId, item: NodeId, mode: TreeMode) {
    let expand = !doc.has_class(item, class::IS_EXPANDED);
    if expand && mode == TreeMode::Accordion {
        for sibling in sibling_items(doc, item) {
            set_branch(doc, sibling, false);
        }
    }
    set_branch(doc, item, expand);
    log::trace!("tree {tree:?}: branch {item:?} expanded={expand}");
}

/// `.tree-toggle` activation: toggle the branch without touching the active link.
pub(crate) fn activate_toggle(cx: &mut Cx<'_>, toggle: NodeId, modes: &mut TreeModes) {
    let Some(item) = cx.doc.closest_class(toggle, class::TREE_ITEM) else {
        return;
    };
    let Some(tree) = cx.doc.closest_class(item, class::TREE_MENU) else {
        return;
    };
    let mode = mode_of(cx.doc, tree, modes, cx.config.tree_mode);
    toggle_branch(cx.doc, tree, item, mode);
}

/// `.tree-link` activation.
pub(crate) fn activate_link(cx: &mut Cx<'_>, link: NodeId, modes: &mut TreeModes) {
    let Some(tree) = cx.doc.closest_class(link, class::TREE_MENU) else {
        return;
    };
    let mode = mode_of(cx.doc, tree, modes, cx.config.tree_mode);
    for other in cx.doc.query_class(tree, class::TREE_LINK) {
        cx.doc.remove_class(other, class::IS_ACTIVE);
        cx.doc.remove_attr(other, attr::ARIA_CURRENT);
    }
    cx.doc.add_class(link, class::IS_ACTIVE);
    cx.doc.set_attr(link, attr::ARIA_CURRENT, "page");

    let Some(item) = cx.doc.closest_class(link, class::TREE_ITEM) else {
        return;
    };
    if children_of(cx.doc, item).is_some() {
        toggle_branch(cx.doc, tree, item, mode);
    } else {
        for branch in cx.doc.query_class(tree, class::TREE_ITEM) {
            if cx.doc.has_class(branch, class::IS_EXPANDED) {
                set_branch(cx.doc, branch, false);
            }
        }
    }
}
