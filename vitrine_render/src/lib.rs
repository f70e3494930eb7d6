// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Render: turn component data records into mounted markup.
//!
//! ## Overview
//!
//! An [`Engine`] maps component type names to [`Renderer`]s. Rendering is
//! memoized per type and data record; data records themselves are resolved
//! through a [`DataSource`](source::DataSource) and memoized by path.
//!
//! Failures stay local to the call that hit them:
//!
//! - [`Engine::render`] never fails; an unregistered type or a renderer error
//!   becomes an inline error fragment.
//! - [`Engine::load_and_mount`] mounts a generic error fragment into its
//!   target when data cannot be loaded, and reports the [`LoadError`].
//!
//! ```
//! use serde_json::json;
//! use vitrine_dom::Document;
//! use vitrine_render::{Engine, FnRenderer};
//!
//! let mut engine = Engine::new();
//! engine.register(
//!     "badge",
//!     FnRenderer::new(|d| format!("<span class=\"badge\">{}</span>", d["text"].as_str().unwrap_or(""))),
//! );
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! engine.mount(&mut doc, "badge", &json!({"text": "New"}), root, true).unwrap();
//! assert_eq!(doc.inner_markup(root), r#"<span class="badge">New</span>"#);
//!
//! assert!(engine.render("missing", &json!({}), true).contains("render-error"));
//! ```

mod engine;
mod error;
mod renderer;
pub mod source;

pub use engine::{CacheStats, Engine, EngineConfig};
pub use error::{LoadError, RenderError};
pub use renderer::{FnRenderer, Renderer};
pub use source::{DataSource, MemorySource, StaticDirSource};
