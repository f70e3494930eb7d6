// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine DOM: a small, generational element tree for widget runtimes.
//!
//! ## Overview
//!
//! [`Document`] holds elements and text nodes under a single `body` root.
//! Elements carry a tag, an ordered class list, ordered attributes, and layout
//! bounds supplied by the host. Widget controllers recognize their markup by
//! marker classes and attributes, so the tree is the only state they share
//! with the page.
//!
//! - [`NodeId`] is a generational handle; stale handles never alias a live node.
//! - Structural changes are recorded as [`Mutation`] values and drained with
//!   [`Document::take_mutations`], which is how late-inserted markup gets
//!   noticed and lazily initialized.
//! - [`markup`] parses well-formed fragments and [`Document::set_inner_markup`]
//!   installs them; [`Document::inner_markup`] serializes back.
//!
//! This crate does not perform layout. Hosts call [`Document::set_bounds`]
//! with whatever their layout pass produced.
//!
//! ## Example
//!
//! ```rust
//! use vitrine_dom::{Document, Mutation};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let nodes = doc
//!     .set_inner_markup(root, r#"<div class="accordion" data-multi-expand><p>Hi</p></div>"#)
//!     .unwrap();
//! let accordion = nodes[0];
//! assert!(doc.has_class(accordion, "accordion"));
//! assert!(doc.has_attr(accordion, "data-multi-expand"));
//! assert_eq!(doc.take_mutations(), vec![Mutation::Inserted(accordion)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
pub mod markup;
pub mod types;

pub use document::Document;
pub use markup::{MarkupError, MarkupErrorKind, MarkupNode};
pub use types::{Element, Mutation, NodeId, NodeKind};
