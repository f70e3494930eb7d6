// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Responder: deterministic, `no_std` plumbing for delegated UI events.
//!
//! ## Overview
//!
//! Widget runtimes built on delegation listen once at the root and route each
//! event to the nearest ancestor that carries a widget capability. This crate
//! provides the pieces of that loop and nothing toolkit-specific:
//!
//! - [`Router`](crate::router::Router) reconstructs an origin node's
//!   root→target path through a [`ParentLookup`](crate::types::ParentLookup)
//!   and emits a capture → target → bubble sequence, attaching each node's
//!   capability from a [`WidgetLookup`](crate::types::WidgetLookup).
//! - [`closest`](crate::router::closest) finds the nearest matching ancestor.
//! - [`dispatcher::run`](crate::dispatcher::run) executes handlers and honors
//!   [`Outcome`](crate::types::Outcome).
//! - [`HoverState`](crate::hover::HoverState) turns successive hover paths into
//!   leave/enter transitions.
//! - [`DeferredQueue`](crate::deferred::DeferredQueue) holds cancellable delayed
//!   actions keyed per slot, for hover intent and hide grace periods.
//!
//! ## Workflow
//!
//! 1) Build a router from borrowed lookups for the event's origin node.
//! 2) Query [`closest`](crate::router::closest) for the widget category, or run
//!    handlers over the full sequence.
//! 3) For pointer moves, feed the path to [`HoverState`](crate::hover::HoverState)
//!    and schedule or cancel deferred actions from the transitions.
//!
//! ```
//! use vitrine_responder::router::{Router, closest};
//! use vitrine_responder::types::{ParentLookup, WidgetLookup};
//!
//! struct Caps;
//! impl WidgetLookup<u32> for Caps {
//!     type WidgetId = char;
//!     fn widget_of(&self, n: &u32) -> Option<char> { (*n == 1).then_some('m') }
//! }
//! struct Parents;
//! impl ParentLookup<u32> for Parents {
//!     fn parent_of(&self, n: &u32) -> Option<u32> { n.checked_sub(1).filter(|p| *p > 0) }
//! }
//!
//! let router = Router::with_parent(Caps, Parents);
//! let seq = router.dispatch_for(3);
//! assert_eq!(closest(&seq, |w| w == 'm'), Some((1, 'm')));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod deferred;
pub mod dispatcher;
pub mod hover;
pub mod router;
pub mod types;
