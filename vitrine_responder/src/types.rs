// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the responder: phases, outcomes, lookups, and dispatch steps.
//!
//! ## Overview
//!
//! These types describe the routing protocol and its inputs/outputs.
//! They are produced by the [`router`](crate::router) and consumed by
//! [`dispatcher::run`](crate::dispatcher::run) or by a toolkit's own loop.

/// Phases of event propagation.
///
/// Appears on each [`Dispatch`] item produced by
/// [`Router::dispatch_for`](crate::router::Router::dispatch_for).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-target traversal.
    Capture,
    /// Target node.
    Target,
    /// Target-to-root traversal.
    Bubble,
}

/// Handler outcome controlling propagation.
///
/// Returned by per-node handlers passed to
/// [`dispatcher::run`](crate::dispatcher::run).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Continue within the current phase.
    Continue,
    /// Skip the remaining entries of the current phase.
    Stop,
    /// Abort every remaining phase and report the event as consumed.
    StopAndConsume,
}

/// Map nodes to the widget capabilities they carry.
///
/// Implement this trait and supply it to the router so that each [`Dispatch`]
/// includes the capability value alongside the node key. Nodes that carry no
/// widget marker return `None`.
pub trait WidgetLookup<K> {
    /// Capability value associated with a node (for example a bitflag set).
    type WidgetId: Copy + core::fmt::Debug;
    /// Returns the capability value for the given node, if any.
    fn widget_of(&self, node: &K) -> Option<Self::WidgetId>;
}

impl<K, L: WidgetLookup<K> + ?Sized> WidgetLookup<K> for &L {
    type WidgetId = L::WidgetId;

    #[inline]
    fn widget_of(&self, node: &K) -> Option<Self::WidgetId> {
        (**self).widget_of(node)
    }
}

/// Look up the parent of a node to reconstruct a root→target path.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

impl<K, P: ParentLookup<K> + ?Sized> ParentLookup<K> for &P {
    #[inline]
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }
}

/// A no‑op parent provider: every node is its own root.
///
/// Used by [`Router::new`](crate::router::Router::new) when the default
/// parent type is kept.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

/// A single dispatch item.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<K, W> {
    /// Propagation phase for this step (capture, target, or bubble).
    pub phase: Phase,
    /// Node associated with this dispatch step.
    pub node: K,
    /// Capability value of the node, if it carries one.
    pub widget: Option<W>,
}
