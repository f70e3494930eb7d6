// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The renderer trait and a closure adapter.

use core::fmt;

use serde_json::Value;
use vitrine_dom::{Document, NodeId};

use crate::error::RenderError;

/// Turns a data record into markup for one component type.
pub trait Renderer {
    /// Render `data` to a markup fragment.
    fn render(&self, data: &Value) -> Result<String, RenderError>;

    /// Cache key for `data`, unique within this type.
    ///
    /// `None` uses the canonical JSON serialization of the record.
    fn cache_key(&self, data: &Value) -> Option<String> {
        let _ = data;
        None
    }

    /// Called after the markup was mounted into `target`.
    ///
    /// This is where renderer-specific behavior is wired to the mounted nodes.
    fn after_mount(&self, doc: &mut Document, target: NodeId, data: &Value) {
        let _ = (doc, target, data);
    }
}

type KeyFn = Box<dyn Fn(&Value) -> Option<String>>;
type MountFn = Box<dyn Fn(&mut Document, NodeId, &Value)>;

/// A [`Renderer`] built from closures.
///
/// ```
/// use serde_json::json;
/// use vitrine_render::{FnRenderer, Renderer};
///
/// let r = FnRenderer::new(|d| format!("<b>{}</b>", d["label"].as_str().unwrap_or("")))
///     .with_cache_key(|d| d["label"].as_str().map(str::to_owned));
/// assert_eq!(r.render(&json!({"label": "Hi"})).unwrap(), "<b>Hi</b>");
/// assert_eq!(r.cache_key(&json!({"label": "Hi"})).as_deref(), Some("Hi"));
/// ```
pub struct FnRenderer<F> {
    render: F,
    key: Option<KeyFn>,
    mount: Option<MountFn>,
}

impl<F> fmt::Debug for FnRenderer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRenderer")
            .field("cache_key", &self.key.is_some())
            .field("after_mount", &self.mount.is_some())
            .finish_non_exhaustive()
    }
}

impl<F: Fn(&Value) -> String> FnRenderer<F> {
    /// Wrap an infallible render function.
    pub fn new(render: F) -> Self {
        Self {
            render,
            key: None,
            mount: None,
        }
    }

    /// Supply a cache key function.
    #[must_use]
    pub fn with_cache_key(mut self, key: impl Fn(&Value) -> Option<String> + 'static) -> Self {
        self.key = Some(Box::new(key));
        self
    }

    /// Supply a post-mount hook.
    #[must_use]
    pub fn with_after_mount(
        mut self,
        hook: impl Fn(&mut Document, NodeId, &Value) + 'static,
    ) -> Self {
        self.mount = Some(Box::new(hook));
        self
    }
}

impl<F: Fn(&Value) -> String> Renderer for FnRenderer<F> {
    fn render(&self, data: &Value) -> Result<String, RenderError> {
        Ok((self.render)(data))
    }

    fn cache_key(&self, data: &Value) -> Option<String> {
        self.key.as_ref().and_then(|k| k(data))
    }

    fn after_mount(&self, doc: &mut Document, target: NodeId, data: &Value) {
        if let Some(hook) = &self.mount {
            hook(doc, target, data);
        }
    }
}
