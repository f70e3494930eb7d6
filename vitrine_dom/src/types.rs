// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: node identifiers, node payloads, and mutation records.

use alloc::string::String;
use alloc::vec::Vec;

/// Identifier for a node in a [`Document`](crate::Document).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On create, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
/// Controllers can therefore keep `NodeId`s in side tables (open menu, overlay owner,
/// per-tree mode) without a teardown hook: a removed widget simply stops matching.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index, useful for building stable textual ids.
    pub const fn slot(self) -> u32 {
        self.0
    }
}

/// Element payload: tag name, ordered class list, and ordered attributes.
///
/// The `class` attribute is stored in [`Element::classes`] and never appears in
/// [`Element::attrs`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    /// Class list in document order, without duplicates.
    pub classes: Vec<String>,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
}

/// What a node holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with tag, classes and attributes.
    Element(Element),
    /// A run of text.
    Text(String),
}

/// A structural change recorded by the document.
///
/// Drained with [`Document::take_mutations`](crate::Document::take_mutations).
/// Observers use these to lazily initialize newly inserted widget markup.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mutation {
    /// A subtree rooted at this node was attached under a connected parent.
    Inserted(NodeId),
    /// A subtree rooted at this node was detached and freed. The id is stale.
    Removed(NodeId),
}
