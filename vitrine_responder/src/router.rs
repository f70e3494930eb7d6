// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Reconstructs the root→target path of an event's origin node and emits a
//! capture → target → bubble sequence, attaching each node's capability value.
//!
//! ## Delegation
//!
//! The router is built once per event from borrowed lookups, so nodes inserted
//! after startup are routed like any other: nothing is registered per node.
//! [`closest`] answers "nearest inclusive ancestor carrying a capability" from
//! the bubble entries of a sequence.
//!
//! ## See Also
//!
//! [`hover`](crate::hover) for hover transitions derived from the dispatch sequence.

use alloc::vec::Vec;

use crate::types::{Dispatch, NoParent, ParentLookup, Phase, WidgetLookup};

/// Deterministic responder chain router.
///
/// ## Usage
///
/// - Construct with [`Router::with_parent`] to reconstruct paths via a
///   [`ParentLookup`], or with [`Router::new`] when every node is a root.
/// - Call [`Router::dispatch_for`] for each input event's origin node.
pub struct Router<K, L: WidgetLookup<K>, P: ParentLookup<K> = NoParent> {
    pub(crate) lookup: L,
    pub(crate) parent: P,
    pub(crate) _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, L: WidgetLookup<K>, P: ParentLookup<K>> core::fmt::Debug for Router<K, L, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, L: WidgetLookup<K>, P: ParentLookup<K> + Default> Router<K, L, P> {
    /// Create a router with a default parent lookup.
    pub fn new(lookup: L) -> Self {
        Self::with_parent(lookup, P::default())
    }
}

impl<K: Copy + Eq, L: WidgetLookup<K>, P: ParentLookup<K>> Router<K, L, P> {
    /// Create a router with an explicit parent lookup provider.
    pub fn with_parent(lookup: L, parent: P) -> Self {
        Self {
            lookup,
            parent,
            _phantom: core::marker::PhantomData,
        }
    }

    /// Root→target path of `target`.
    pub fn path_of(&self, target: K) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = target;
        // Collect to root; caller ensures acyclic ancestry.
        loop {
            out.push(cur);
            match self.parent.parent_of(&cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    /// Produce the propagation sequence for an event originating at `target`.
    pub fn dispatch_for(&self, target: K) -> Vec<Dispatch<K, L::WidgetId>> {
        self.dispatch_path(&self.path_of(target))
    }

    /// Produce the propagation sequence for an explicit root→target path.
    ///
    /// Returns an empty sequence for an empty path.
    pub fn dispatch_path(&self, path: &[K]) -> Vec<Dispatch<K, L::WidgetId>> {
        let Some(&target) = path.last() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(path.len() * 2 + 1);
        for &n in path {
            out.push(self.step(Phase::Capture, n));
        }
        out.push(self.step(Phase::Target, target));
        for &n in path.iter().rev() {
            out.push(self.step(Phase::Bubble, n));
        }
        out
    }

    fn step(&self, phase: Phase, node: K) -> Dispatch<K, L::WidgetId> {
        Dispatch {
            phase,
            node,
            widget: self.lookup.widget_of(&node),
        }
    }
}

/// First bubble-phase entry (target outward) whose capability satisfies `pred`.
///
/// This is the "nearest matching ancestor" query delegated listeners use to
/// find the widget an event belongs to.
pub fn closest<K: Copy, W: Copy>(
    seq: &[Dispatch<K, W>],
    pred: impl Fn(W) -> bool,
) -> Option<(K, W)> {
    seq.iter()
        .filter(|d| d.phase == Phase::Bubble)
        .find_map(|d| d.widget.filter(|w| pred(*w)).map(|w| (d.node, w)))
}
