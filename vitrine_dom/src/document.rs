// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, attribute and class updates, queries, markup.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use kurbo::Rect;

use crate::markup::{self, MarkupError, MarkupNode};
use crate::types::{Element, Mutation, NodeId, NodeKind};

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A tree of elements and text nodes with a single `body` root.
///
/// Nodes are created detached and become part of the document once linked
/// under the root. Every link under a connected parent is recorded as a
/// [`Mutation::Inserted`], every removal as a [`Mutation::Removed`].
pub struct Document {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    focused: Option<NodeId>,
    mutations: Vec<Mutation>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("focused", &self.focused)
            .field("pending_mutations", &self.mutations.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
    bounds: Rect,
}

impl Node {
    fn new(generation: u32, kind: NodeKind) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            kind,
            bounds: Rect::ZERO,
        }
    }

    fn element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(e) => Some(e),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.kind {
            NodeKind::Element(e) => Some(e),
            NodeKind::Text(_) => None,
        }
    }
}

impl Document {
    /// Create an empty document holding only its `body` root.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            focused: None,
            mutations: Vec::new(),
        };
        doc.root = doc.alloc(NodeKind::Element(Element {
            tag: "body".to_string(),
            ..Element::default()
        }));
        doc
    }

    /// The `body` root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, kind));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, kind)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it from any previous parent.
    ///
    /// Does nothing if either id is stale, if `child` is the root, or if the
    /// link would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Insert `child` under `parent` before `reference` (or last when `None`
    /// or when `reference` is not a child of `parent`).
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if !self.is_alive(parent)
            || !self.is_alive(child)
            || child == self.root
            || self.contains(child, parent)
            || self.node_opt(parent).is_some_and(|p| p.element().is_none())
        {
            return;
        }
        if let Some(old) = self.parent(child) {
            self.unlink_parent(child, old);
        }
        if let Some(p) = self.node_opt_mut(parent) {
            let at = reference
                .and_then(|r| p.children.iter().position(|c| *c == r))
                .unwrap_or(p.children.len());
            p.children.insert(at, child);
        }
        if let Some(c) = self.node_opt_mut(child) {
            c.parent = Some(parent);
        }
        if self.is_connected(parent) {
            self.mutations.push(Mutation::Inserted(child));
        }
    }

    /// Remove a node (and its subtree) from the document, freeing its slots.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        let connected = self.is_connected(id);
        if let Some(parent) = self.parent(id) {
            self.unlink_parent(id, parent);
        }
        self.free_subtree(id);
        if connected {
            self.mutations.push(Mutation::Removed(id));
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = self.children(id).to_vec();
        for child in children {
            self.free_subtree(child);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Remove every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.children(id).to_vec() {
            self.remove(child);
        }
    }

    /// Drain recorded mutations in the order they happened.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        core::mem::take(&mut self.mutations)
    }

    // --- structure queries ---

    /// Returns true if `id` refers to a live node.
    ///
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Returns true if `id` is live and reachable from the root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_alive(id) && self.path_to_root(id).first() == Some(&self.root)
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of a node, in order. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Element children of a node, in order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
    }

    /// Ancestors of a node from the parent upward (the node itself excluded).
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(self.parent(id), |n| self.parent(*n))
    }

    /// Path from the topmost ancestor to `id` (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        if !self.is_alive(id) {
            return Vec::new();
        }
        let mut out: Vec<NodeId> = core::iter::once(id).chain(self.ancestors(id)).collect();
        out.reverse();
        out
    }

    /// Descendants of `id` in document (pre-order) order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// True if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.is_alive(node) && (node == ancestor || self.ancestors(node).any(|a| a == ancestor))
    }

    /// Nearest inclusive ancestor of `id` satisfying `pred`.
    pub fn closest(&self, id: NodeId, pred: impl Fn(NodeId) -> bool) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        core::iter::once(id).chain(self.ancestors(id)).find(|n| pred(*n))
    }

    /// Nearest inclusive ancestor of `id` carrying `class`.
    pub fn closest_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.closest(id, |n| self.has_class(n, class))
    }

    /// Descendants of `scope` carrying `class`, in document order.
    pub fn query_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    /// Descendants of `scope` carrying attribute `name` (with `value`, if given).
    pub fn query_attr(&self, scope: NodeId, name: &str, value: Option<&str>) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| match (self.attr(*n, name), value) {
                (Some(v), Some(want)) => v == want,
                (Some(_), None) => true,
                (None, _) => false,
            })
            .collect()
    }

    /// First connected element carrying attribute `name` with `value`.
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.attr(*n, name) == Some(value))
    }

    /// First connected element whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_by_attr("id", id)
    }

    // --- node payload ---

    /// True if `id` is a live element.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.element().is_some())
    }

    /// Tag name of an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        Some(self.node_opt(id)?.element()?.tag.as_str())
    }

    /// Node payload.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node_opt(id).map(|n| &n.kind)
    }

    /// Class list of an element; empty for text nodes and stale ids.
    pub fn classes(&self, id: NodeId) -> &[String] {
        self.node_opt(id)
            .and_then(Node::element)
            .map(|e| e.classes.as_slice())
            .unwrap_or(&[])
    }

    /// True if the element carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    /// Add a class if absent.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(e) = self.element_mut(id)
            && !e.classes.iter().any(|c| c == class)
        {
            e.classes.push(class.to_string());
        }
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(e) = self.element_mut(id) {
            e.classes.retain(|c| c != class);
        }
    }

    /// Add or remove `class` depending on `on`.
    pub fn set_class(&mut self, id: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// Flip `class`, returning whether it is now present.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        let on = !self.has_class(id, class);
        self.set_class(id, class, on);
        on
    }

    /// Attributes of an element in insertion order.
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        self.node_opt(id)
            .and_then(Node::element)
            .map(|e| e.attrs.as_slice())
            .unwrap_or(&[])
    }

    /// Value of attribute `name`.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// True if the element carries attribute `name`.
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Set attribute `name` to `value`. `class` is routed to the class list.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if name == "class" {
            if let Some(e) = self.element_mut(id) {
                e.classes.clear();
                for c in value.split_whitespace() {
                    if !e.classes.iter().any(|x| x == c) {
                        e.classes.push(c.to_string());
                    }
                }
            }
            return;
        }
        if let Some(e) = self.element_mut(id) {
            match e.attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => e.attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    /// Remove attribute `name`.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(e) = self.element_mut(id) {
            e.attrs.retain(|(k, _)| k != name);
        }
    }

    /// Set or remove a boolean attribute.
    pub fn set_flag(&mut self, id: NodeId, name: &str, on: bool) {
        if on {
            if !self.has_attr(id, name) {
                self.set_attr(id, name, "");
            }
        } else {
            self.remove_attr(id, name);
        }
    }

    /// True if the element carries the `hidden` attribute.
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.has_attr(id, "hidden")
    }

    /// Show or hide an element via the `hidden` attribute.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        self.set_flag(id, "hidden", hidden);
    }

    /// Concatenated text of all text descendants (or the node itself).
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(NodeKind::Text(t)) = self.kind(id) {
            out.push_str(t);
        }
        for n in self.descendants(id) {
            if let Some(NodeKind::Text(t)) = self.kind(n) {
                out.push_str(t);
            }
        }
        out
    }

    /// Replace the children of `id` with a single text node (none when `text` is empty).
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(NodeKind::Text(t)) = self.node_opt_mut(id).map(|n| &mut n.kind) {
            *t = text.to_string();
            return;
        }
        self.clear_children(id);
        if !text.is_empty() {
            let t = self.create_text(text);
            self.append_child(id, t);
        }
    }

    // --- geometry and focus ---

    /// Layout bounds of a node in client coordinates, as supplied by the host.
    pub fn bounds(&self, id: NodeId) -> Rect {
        self.node_opt(id).map(|n| n.bounds).unwrap_or(Rect::ZERO)
    }

    /// Update layout bounds.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.bounds = bounds;
        }
    }

    /// Currently focused node, if still live.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|f| self.is_alive(*f))
    }

    /// Move focus to `id`.
    pub fn focus(&mut self, id: NodeId) {
        if self.is_alive(id) {
            self.focused = Some(id);
        }
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    // --- markup ---

    /// Replace the children of `target` with nodes parsed from `markup`.
    ///
    /// Returns the new top-level nodes. On a parse error the target is left
    /// untouched.
    pub fn set_inner_markup(
        &mut self,
        target: NodeId,
        markup: &str,
    ) -> Result<Vec<NodeId>, MarkupError> {
        let parsed = markup::parse_fragment(markup)?;
        if !self.is_alive(target) {
            return Ok(Vec::new());
        }
        self.clear_children(target);
        Ok(self.append_markup_nodes(target, &parsed))
    }

    /// Parse `markup` and append the nodes as the last children of `target`.
    pub fn append_markup(
        &mut self,
        target: NodeId,
        markup: &str,
    ) -> Result<Vec<NodeId>, MarkupError> {
        let parsed = markup::parse_fragment(markup)?;
        Ok(self.append_markup_nodes(target, &parsed))
    }

    fn append_markup_nodes(&mut self, target: NodeId, nodes: &[MarkupNode]) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            let id = self.build(node);
            self.append_child(target, id);
            out.push(id);
        }
        out
    }

    // Builds a detached subtree so only its root produces an insertion record.
    fn build(&mut self, node: &MarkupNode) -> NodeId {
        match node {
            MarkupNode::Text(t) => self.create_text(t),
            MarkupNode::Element {
                tag,
                attrs,
                children,
            } => {
                let id = self.create_element(tag);
                for (k, v) in attrs {
                    self.set_attr(id, k, v);
                }
                for child in children {
                    let c = self.build(child);
                    self.append_child(id, c);
                }
                id
            }
        }
    }

    /// Serialize the children of `id`.
    pub fn inner_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        for c in self.children(id) {
            self.write_markup(*c, &mut out);
        }
        out
    }

    /// Serialize `id` and its subtree.
    pub fn outer_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out);
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            None => {}
            Some(NodeKind::Text(t)) => out.push_str(&markup::escape_text(t)),
            Some(NodeKind::Element(e)) => {
                out.push('<');
                out.push_str(&e.tag);
                if !e.classes.is_empty() {
                    out.push_str(" class=\"");
                    out.push_str(&markup::escape_attr(&e.classes.join(" ")));
                    out.push('"');
                }
                for (k, v) in &e.attrs {
                    out.push(' ');
                    out.push_str(k);
                    if !v.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&markup::escape_attr(v));
                        out.push('"');
                    }
                }
                out.push('>');
                if markup::is_void(&e.tag) {
                    return;
                }
                for c in self.children(id) {
                    self.write_markup(*c, out);
                }
                out.push_str("</");
                out.push_str(&e.tag);
                out.push('>');
            }
        }
    }

    // --- internals ---

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.node_opt_mut(id)?.element_mut()
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
    }
}
