// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering engine: registry, caches, loading, and mounting.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde_json::Value;
use vitrine_dom::{Document, NodeId, markup};

use crate::error::{LoadError, RenderError};
use crate::renderer::Renderer;
use crate::source::{DataSource, type_name_of};

/// Engine behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Whether [`Engine::load_and_mount`] consults the render cache.
    pub use_cache: bool,
    /// Class carried by inline error fragments.
    pub error_class: String,
    /// Text of the fragment mounted when data fails to load.
    pub load_error_text: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            error_class: "render-error".to_owned(),
            load_error_text: "Unable to load component data.".to_owned(),
        }
    }
}

/// Cache counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Cached markup fragments.
    pub entries: usize,
    /// Resolved data records, by path.
    pub data_entries: usize,
    /// Renders answered from the cache.
    pub hits: usize,
    /// Cache lookups that missed.
    pub misses: usize,
    /// Renderer invocations.
    pub renders: usize,
}

/// Component rendering engine.
pub struct Engine {
    config: EngineConfig,
    renderers: HashMap<String, Box<dyn Renderer>>,
    render_cache: HashMap<String, String>,
    registry: HashMap<String, Value>,
    loaded: HashMap<String, Value>,
    injected: HashSet<String>,
    stats: CacheStats,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("renderers", &self.registered_types())
            .field("render_cache", &self.render_cache.len())
            .field("registry", &self.registry.len())
            .field("loaded", &self.loaded.len())
            .field("injected", &self.injected)
            .field("stats", &self.stats)
            .finish()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with default configuration and no renderers.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// An engine with explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            renderers: HashMap::new(),
            render_cache: HashMap::new(),
            registry: HashMap::new(),
            loaded: HashMap::new(),
            injected: HashSet::new(),
            stats: CacheStats::default(),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register `renderer` for `type_name`, replacing and returning any
    /// previous one. Cached markup for the type is dropped.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        renderer: impl Renderer + 'static,
    ) -> Option<Box<dyn Renderer>> {
        let type_name = type_name.into();
        self.invalidate_type(&type_name);
        log::debug!("registered renderer {type_name:?}");
        self.renderers.insert(type_name, Box::new(renderer))
    }

    /// Remove the renderer for `type_name`. Returns true if one was registered.
    pub fn unregister(&mut self, type_name: &str) -> bool {
        self.invalidate_type(type_name);
        self.renderers.remove(type_name).is_some()
    }

    /// True if a renderer is registered for `type_name`.
    pub fn has_renderer(&self, type_name: &str) -> bool {
        self.renderers.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn registered_types(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    /// Inline error fragment for `message`.
    pub fn error_fragment(&self, message: &str) -> String {
        format!(
            r#"<div class="{}" role="alert">{}</div>"#,
            markup::escape_attr(&self.config.error_class),
            markup::escape_text(message)
        )
    }

    fn cache_key(type_name: &str, renderer: &dyn Renderer, data: &Value) -> String {
        let key = renderer.cache_key(data).unwrap_or_else(|| data.to_string());
        format!("{type_name}:{key}")
    }

    /// Render `data` with the renderer registered for `type_name`.
    pub fn try_render(
        &mut self,
        type_name: &str,
        data: &Value,
        use_cache: bool,
    ) -> Result<String, RenderError> {
        let renderer = self
            .renderers
            .get(type_name)
            .ok_or_else(|| RenderError::UnknownType(type_name.to_owned()))?;
        let key = Self::cache_key(type_name, renderer.as_ref(), data);
        if use_cache {
            if let Some(hit) = self.render_cache.get(&key) {
                self.stats.hits += 1;
                log::trace!("render cache hit {key}");
                return Ok(hit.clone());
            }
            self.stats.misses += 1;
        }
        self.stats.renders += 1;
        let out = renderer.render(data)?;
        if use_cache {
            self.render_cache.insert(key, out.clone());
        }
        Ok(out)
    }

    /// Render `data`, substituting an inline error fragment on failure.
    ///
    /// Never fails: an unregistered type or a renderer error is logged and
    /// confined to the returned fragment.
    pub fn render(&mut self, type_name: &str, data: &Value, use_cache: bool) -> String {
        match self.try_render(type_name, data, use_cache) {
            Ok(out) => out,
            Err(err) => {
                log::error!("render {type_name:?}: {err}");
                self.error_fragment(&err.to_string())
            }
        }
    }

    /// Render `data` and replace the content of `target` with it, then run the
    /// renderer's post-mount hook. Returns the mounted top-level nodes.
    ///
    /// Render failures mount an error fragment and succeed; the hook does not
    /// run for error fragments. A stale target or markup the tree rejects is
    /// an error.
    pub fn mount(
        &mut self,
        doc: &mut Document,
        type_name: &str,
        data: &Value,
        target: NodeId,
        use_cache: bool,
    ) -> Result<Vec<NodeId>, RenderError> {
        if !doc.is_alive(target) {
            return Err(RenderError::StaleTarget(target));
        }
        let rendered = match self.try_render(type_name, data, use_cache) {
            Ok(out) => out,
            Err(err) => {
                log::error!("mount {type_name:?}: {err}");
                let fragment = self.error_fragment(&err.to_string());
                return Ok(doc.set_inner_markup(target, &fragment)?);
            }
        };
        let nodes = match doc.set_inner_markup(target, &rendered) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::error!("mount {type_name:?}: renderer produced invalid markup: {err}");
                let fragment = self.error_fragment("Component markup is invalid.");
                doc.set_inner_markup(target, &fragment)?;
                return Err(err.into());
            }
        };
        if let Some(renderer) = self.renderers.get(type_name) {
            renderer.after_mount(doc, target, data);
        }
        Ok(nodes)
    }

    /// Record data for `type_name` in the in-memory registry.
    pub fn register_data(&mut self, type_name: impl Into<String>, data: Value) {
        self.registry.insert(type_name.into(), data);
    }

    /// Registered data for `type_name`.
    pub fn data(&self, type_name: &str) -> Option<&Value> {
        self.registry.get(type_name)
    }

    /// Resolve the data record at `path`.
    ///
    /// Precedence: the memo of earlier resolutions, then the in-memory
    /// registry keyed by the path's type name, then script injection for
    /// `*.data.js` (each script injected at most once), then a JSON fetch
    /// for `*.json`. Successful resolutions are memoized by `path`.
    pub async fn load_data(
        &mut self,
        source: &dyn DataSource,
        path: &str,
    ) -> Result<Value, LoadError> {
        if let Some(v) = self.loaded.get(path) {
            return Ok(v.clone());
        }
        let type_name = type_name_of(path);
        let value = if let Some(v) = self.registry.get(type_name) {
            v.clone()
        } else if path.ends_with(".data.js") {
            if self.injected.insert(path.to_owned()) {
                match source.inject_script(path).await {
                    Ok(records) => {
                        for (name, record) in records {
                            self.registry.insert(name, record);
                        }
                    }
                    Err(err) => {
                        self.injected.remove(path);
                        return Err(err);
                    }
                }
            } else {
                log::debug!("{path} already injected");
            }
            self.registry
                .get(type_name)
                .cloned()
                .ok_or_else(|| LoadError::NotRegistered {
                    path: path.to_owned(),
                    type_name: type_name.to_owned(),
                })?
        } else if path.ends_with(".json") {
            source.fetch_json(path).await?
        } else {
            return Err(LoadError::Unsupported(path.to_owned()));
        };
        self.loaded.insert(path.to_owned(), value.clone());
        Ok(value)
    }

    /// Load the data at `path` and mount it into `target` as `type_name`.
    ///
    /// On load failure a generic error fragment is mounted into `target` and
    /// the error is returned.
    pub async fn load_and_mount(
        &mut self,
        source: &dyn DataSource,
        doc: &mut Document,
        type_name: &str,
        path: &str,
        target: NodeId,
    ) -> Result<Vec<NodeId>, LoadError> {
        let data = match self.load_data(source, path).await {
            Ok(data) => data,
            Err(err) => {
                log::error!("loading {path} for {type_name:?} failed: {err}");
                if doc.is_alive(target) {
                    let fragment = self.error_fragment(&self.config.load_error_text);
                    if let Err(markup_err) = doc.set_inner_markup(target, &fragment) {
                        log::error!("error fragment rejected: {markup_err}");
                    }
                }
                return Err(err);
            }
        };
        let use_cache = self.config.use_cache;
        Ok(self.mount(doc, type_name, &data, target, use_cache)?)
    }

    /// Drop cached markup for `type_name`. Returns the number of entries removed.
    pub fn invalidate_type(&mut self, type_name: &str) -> usize {
        let prefix = format!("{type_name}:");
        let before = self.render_cache.len();
        self.render_cache.retain(|k, _| !k.starts_with(&prefix));
        before - self.render_cache.len()
    }

    /// Drop all cached markup.
    pub fn clear_render_cache(&mut self) {
        self.render_cache.clear();
    }

    /// Drop registered and loaded data, allowing scripts to be injected again.
    pub fn clear_data_cache(&mut self) {
        self.registry.clear();
        self.loaded.clear();
        self.injected.clear();
    }

    /// Drop every cache and reset the counters.
    pub fn clear_all(&mut self) {
        self.clear_render_cache();
        self.clear_data_cache();
        self.stats = CacheStats::default();
    }

    /// Current cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            entries: self.render_cache.len(),
            data_entries: self.loaded.len(),
            ..self.stats
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::renderer::FnRenderer;
    use serde_json::json;

    fn counting(calls: Rc<Cell<usize>>) -> impl Renderer {
        FnRenderer::new(move |d: &Value| {
            calls.set(calls.get() + 1);
            format!("<span>{}</span>", d["n"])
        })
    }

    #[test]
    fn unknown_type_renders_error_fragment() {
        let mut engine = Engine::new();
        let out = engine.render("unknown-type", &json!({}), true);
        assert!(out.contains("render-error"), "{out}");
        assert!(out.contains("unknown-type"), "{out}");
        assert_eq!(engine.cache_stats(), CacheStats::default());
    }

    #[test]
    fn identical_renders_hit_the_cache() {
        let calls = Rc::new(Cell::new(0));
        let mut engine = Engine::new();
        engine.register("badge", counting(calls.clone()));
        let a = engine.render("badge", &json!({"n": 1}), true);
        let b = engine.render("badge", &json!({"n": 1}), true);
        assert_eq!(a, b);
        assert_eq!(calls.get(), 1, "renderer invoked once");
        let stats = engine.cache_stats();
        assert_eq!((stats.hits, stats.misses, stats.renders), (1, 1, 1));

        engine.render("badge", &json!({"n": 1}), false);
        assert_eq!(calls.get(), 2, "bypass re-renders");
        engine.render("badge", &json!({"n": 2}), true);
        assert_eq!(engine.cache_stats().entries, 2);
    }

    #[test]
    fn custom_keys_and_invalidation() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let mut engine = Engine::new();
        engine.register(
            "tag",
            FnRenderer::new(move |d: &Value| {
                c.set(c.get() + 1);
                d["label"].to_string()
            })
            .with_cache_key(|d| d["id"].as_str().map(str::to_owned)),
        );
        engine.render("tag", &json!({"id": "x", "label": "one"}), true);
        let again = engine.render("tag", &json!({"id": "x", "label": "two"}), true);
        assert_eq!(again, "\"one\"", "same key, cached markup");
        assert_eq!(calls.get(), 1);

        assert_eq!(engine.invalidate_type("tag"), 1);
        engine.render("tag", &json!({"id": "x", "label": "two"}), true);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn reregistering_drops_cached_markup() {
        let mut engine = Engine::new();
        engine.register("a", FnRenderer::new(|_: &Value| "<i>1</i>".to_owned()));
        engine.render("a", &json!(null), true);
        let old = engine.register("a", FnRenderer::new(|_: &Value| "<i>2</i>".to_owned()));
        assert!(old.is_some());
        assert_eq!(engine.render("a", &json!(null), true), "<i>2</i>");
        assert!(engine.unregister("a"));
        assert!(!engine.has_renderer("a"));
    }

    #[test]
    fn mount_replaces_content_and_runs_hook() {
        let mut doc = Document::new();
        let root = doc.root();
        let target = doc.create_element("section");
        doc.append_child(root, target);
        doc.set_text(target, "old");

        let mut engine = Engine::new();
        engine.register(
            "code",
            FnRenderer::new(|d: &Value| {
                format!(
                    "<pre>{}</pre><button class=\"copy\">Copy</button>",
                    markup::escape_text(d["src"].as_str().unwrap_or(""))
                )
            })
            .with_after_mount(|doc, target, d| {
                for b in doc.query_class(target, "copy") {
                    doc.set_attr(b, "data-copy", d["src"].as_str().unwrap_or(""));
                }
            }),
        );
        let nodes = engine
            .mount(&mut doc, "code", &json!({"src": "a < b"}), target, true)
            .unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(
            doc.inner_markup(target),
            r#"<pre>a &lt; b</pre><button class="copy" data-copy="a &lt; b">Copy</button>"#
        );
    }

    #[test]
    fn mount_unknown_type_is_contained() {
        let mut doc = Document::new();
        let root = doc.root();
        let target = doc.create_element("div");
        doc.append_child(root, target);
        let mut engine = Engine::new();
        engine.mount(&mut doc, "nope", &json!({}), target, true).unwrap();
        assert_eq!(doc.query_class(target, "render-error").len(), 1);
    }

    #[test]
    fn mount_into_stale_target_fails() {
        let mut doc = Document::new();
        let root = doc.root();
        let target = doc.create_element("div");
        doc.append_child(root, target);
        doc.remove(target);
        let mut engine = Engine::new();
        let err = engine
            .mount(&mut doc, "x", &json!({}), target, true)
            .unwrap_err();
        assert!(matches!(err, RenderError::StaleTarget(_)));
    }
}
