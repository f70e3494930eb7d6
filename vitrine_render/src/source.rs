// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data sources for component records.
//!
//! Two kinds of source are resolved:
//!
//! - data scripts (`*.data.js`) that register one or more records into the
//!   shared `ShowcaseData` registry when injected;
//! - JSON documents (`*.json`) that are fetched and parsed as a whole.
//!
//! [`StaticDirSource`] serves both from a directory; [`MemorySource`] serves
//! them from memory and counts requests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::LoadError;

/// Name of the registry object data scripts assign into.
pub const REGISTRY_GLOBAL: &str = "ShowcaseData";

/// Where component data comes from.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Inject the data script at `src` and return the `(type name, record)`
    /// pairs it registered.
    async fn inject_script(&self, src: &str) -> Result<Vec<(String, Value)>, LoadError>;

    /// Fetch and parse the JSON document at `url`.
    async fn fetch_json(&self, url: &str) -> Result<Value, LoadError>;
}

/// Type name a path resolves to: the file name without `.data.js` or `.json`.
///
/// ```
/// use vitrine_render::source::type_name_of;
/// assert_eq!(type_name_of("data/button.data.js"), "button");
/// assert_eq!(type_name_of("/api/card.json"), "card");
/// assert_eq!(type_name_of("chip"), "chip");
/// ```
pub fn type_name_of(path: &str) -> &str {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    file.strip_suffix(".data.js")
        .or_else(|| file.strip_suffix(".json"))
        .unwrap_or(file)
}

/// Parse the registrations in a data script.
///
/// Recognized statements assign a JSON value to the registry by bracket or
/// dot access: `ShowcaseData["button"] = {...};` or `ShowcaseData.button = [...];`.
/// Other mentions of the registry (such as its own initialization) are skipped.
pub fn parse_data_script(path: &str, script: &str) -> Result<Vec<(String, Value)>, LoadError> {
    let mut out = Vec::new();
    let mut rest = script;
    while let Some(at) = rest.find(REGISTRY_GLOBAL) {
        rest = &rest[at + REGISTRY_GLOBAL.len()..];
        let Some((name, value_src)) = assignment(rest) else {
            continue;
        };
        let mut values = serde_json::Deserializer::from_str(value_src).into_iter::<Value>();
        match values.next() {
            Some(Ok(value)) => {
                out.push((name.to_owned(), value));
                rest = &value_src[values.byte_offset()..];
            }
            Some(Err(err)) => {
                return Err(LoadError::Script {
                    path: path.to_owned(),
                    message: format!("{REGISTRY_GLOBAL}.{name}: {err}"),
                });
            }
            None => {
                return Err(LoadError::Script {
                    path: path.to_owned(),
                    message: format!("{REGISTRY_GLOBAL}.{name}: missing value"),
                });
            }
        }
    }
    Ok(out)
}

// `["name"] =` or `.name =` after the registry name; returns the name and the
// text after `=`.
fn assignment(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    let (name, after) = if let Some(r) = s.strip_prefix('[') {
        let r = r.trim_start();
        let quote = r.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let body = &r[1..];
        let end = body.find(quote)?;
        let after = body[end + 1..].trim_start().strip_prefix(']')?;
        (&body[..end], after)
    } else if let Some(r) = s.strip_prefix('.') {
        let end = r
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(r.len());
        (&r[..end], &r[end..])
    } else {
        return None;
    };
    let after = after.trim_start().strip_prefix('=')?;
    if after.starts_with('=') || name.is_empty() {
        return None;
    }
    Some((name, after))
}

/// Serves sources from a directory on disk.
#[derive(Clone, Debug)]
pub struct StaticDirSource {
    root: PathBuf,
}

impl StaticDirSource {
    /// Serve paths relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory sources are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DataSource for StaticDirSource {
    async fn inject_script(&self, src: &str) -> Result<Vec<(String, Value)>, LoadError> {
        let text = tokio::fs::read_to_string(self.resolve(src)).await?;
        log::debug!("injected data script {src}");
        parse_data_script(src, &text)
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, LoadError> {
        let text = tokio::fs::read_to_string(self.resolve(url)).await?;
        log::debug!("fetched {url}");
        Ok(serde_json::from_str(&text)?)
    }
}

/// Serves sources from memory, counting requests.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
    injections: AtomicUsize,
    fetches: AtomicUsize,
}

impl MemorySource {
    /// An empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Scripts injected so far.
    pub fn injections(&self) -> usize {
        self.injections.load(Ordering::Relaxed)
    }

    /// JSON documents fetched so far.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    fn get(&self, path: &str) -> Result<&str, LoadError> {
        self.files
            .get(path)
            .map(String::as_str)
            .ok_or_else(|| LoadError::NotFound(path.to_owned()))
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn inject_script(&self, src: &str) -> Result<Vec<(String, Value)>, LoadError> {
        self.injections.fetch_add(1, Ordering::Relaxed);
        parse_data_script(src, self.get(src)?)
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, LoadError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        Ok(serde_json::from_str(self.get(url)?)?)
    }
}
