// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Widgets: a delegated runtime for markup-declared widgets.
//!
//! ## Overview
//!
//! Widgets are declared purely by classes and `data-*` attributes on
//! [`Document`](vitrine_dom::Document) elements. A single [`Runtime`] receives
//! every platform event, routes it from its origin node to the nearest widget
//! part (see [`markers`]), and applies that widget's behavior:
//!
//! - [`dropdown`]: single and multi-select menus with chips, search, and
//!   keyboard navigation; [`chip_dropdown`] is the compact variant.
//! - [`tooltip`] and [`popover`]: hover overlays sharing one surface per
//!   category, positioned with `vitrine_place`.
//! - [`accordion`], [`tabs`], [`tree_menu`]: disclosure widgets.
//! - [`checkbox_group`] and [`file_upload`]: form helpers.
//!
//! Markup inserted after [`Runtime::start`] needs no registration: insertions
//! are observed and lazily initialized before the next event.
//!
//! ## Example
//!
//! ```
//! use vitrine_dom::Document;
//! use vitrine_widgets::{EventKind, InputEvent, Runtime, markers::class};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.set_inner_markup(
//!     root,
//!     r#"<div class="dropdown">
//!          <button class="dropdown-trigger"><span class="dropdown-label"></span></button>
//!          <ul class="dropdown-menu" hidden>
//!            <li class="dropdown-item" data-value="a">Alpha</li>
//!            <li class="dropdown-item" data-value="b">Beta</li>
//!          </ul>
//!        </div>"#,
//! )
//! .unwrap();
//!
//! let mut rt = Runtime::new();
//! rt.start(&mut doc);
//!
//! let trigger = doc.query_class(root, class::DROPDOWN_TRIGGER)[0];
//! rt.dispatch(&mut doc, InputEvent::Click { target: trigger });
//! let beta = doc.query_class(root, class::DROPDOWN_ITEM)[1];
//! rt.dispatch(&mut doc, InputEvent::Click { target: beta });
//!
//! let kinds: Vec<EventKind> = rt.drain_events().iter().map(|e| e.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [EventKind::DropdownOpen, EventKind::DropdownSelect, EventKind::DropdownClose]
//! );
//! let dropdown = doc.query_class(root, class::DROPDOWN)[0];
//! assert_eq!(doc.attr(dropdown, "data-value"), Some("b"));
//! ```

pub mod accordion;
pub mod checkbox_group;
pub mod chip_dropdown;
mod config;
pub mod dropdown;
mod event;
pub mod file_upload;
pub mod markers;
pub mod overlay;
pub mod popover;
mod runtime;
pub mod tabs;
pub mod tooltip;
pub mod tree_menu;

pub use config::RuntimeConfig;
pub use event::{ChangeValue, EventKind, FileInfo, InputEvent, Warning, WidgetEvent};
pub use markers::Capabilities;
pub use overlay::{BoundsMeasure, Measure, OverlayKind, SharedOverlay, TimerSlot};
pub use runtime::Runtime;
pub use tree_menu::TreeMode;
