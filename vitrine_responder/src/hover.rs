// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state: derive pointer enter/leave transitions from path changes.
//!
//! Delegated runtimes only see pointer moves with an origin node. Feeding each
//! move's root→target path to [`HoverState::update_path`] yields the element
//! boundaries the pointer crossed, which is what hover-intent controllers
//! react to.
//!
//! ```
//! use vitrine_responder::hover::{HoverEvent, HoverState};
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update_path(&[1, 2]), vec![HoverEvent::Enter(1), HoverEvent::Enter(2)]);
//! assert_eq!(h.update_path(&[1, 3]), vec![HoverEvent::Leave(2), HoverEvent::Enter(3)]);
//! assert_eq!(h.hovered(), Some(3));
//! ```

use alloc::vec::Vec;

use crate::types::{Dispatch, Phase};

/// Tracks the hovered root→target path.
///
/// Leave events are emitted inner-most first, enter events outer-most first.
/// Only the part of the path below the lowest common ancestor changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    path: Vec<K>,
}

/// A hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// Pointer entered the node.
    Enter(K),
    /// Pointer left the node.
    Leave(K),
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self { path: Vec::new() }
    }

    /// Current root→target path.
    pub fn current_path(&self) -> &[K] {
        &self.path
    }

    /// Inner-most hovered node.
    pub fn hovered(&self) -> Option<K> {
        self.path.last().copied()
    }

    /// True if `node` is on the hovered path.
    pub fn is_hovering(&self, node: K) -> bool {
        self.path.contains(&node)
    }

    /// Forget the hovered path, returning leaves for every node on it.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        let out = self.path.iter().rev().map(|k| HoverEvent::Leave(*k)).collect();
        self.path.clear();
        out
    }

    /// Replace the hovered path and return the crossed boundaries.
    pub fn update_path(&mut self, new_path: &[K]) -> Vec<HoverEvent<K>> {
        let shared = self
            .path
            .iter()
            .zip(new_path)
            .take_while(|(a, b)| a == b)
            .count();
        let mut out: Vec<HoverEvent<K>> = self.path[shared..]
            .iter()
            .rev()
            .map(|k| HoverEvent::Leave(*k))
            .collect();
        out.extend(new_path[shared..].iter().map(|k| HoverEvent::Enter(*k)));
        self.path.clear();
        self.path.extend_from_slice(new_path);
        out
    }

    /// Drop nodes for which `alive` returns false, truncating at the first one.
    ///
    /// No events are produced: removed nodes cannot be left.
    pub fn retain_alive(&mut self, alive: impl Fn(K) -> bool) {
        if let Some(cut) = self.path.iter().position(|k| !alive(*k)) {
            self.path.truncate(cut);
        }
    }
}

/// Extract the root→target path from the capture entries of a router sequence.
pub fn path_from_dispatch<K: Copy, W>(seq: &[Dispatch<K, W>]) -> Vec<K> {
    seq.iter()
        .take_while(|d| d.phase == Phase::Capture)
        .map(|d| d.node)
        .collect()
}
