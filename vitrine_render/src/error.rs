// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for rendering and data loading.

use vitrine_dom::{MarkupError, NodeId};

/// Errors produced while rendering or mounting a component.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No renderer is registered for the type.
    #[error("no renderer registered for type {0:?}")]
    UnknownType(String),

    /// A renderer rejected its input.
    #[error("renderer {type_name:?} failed: {message}")]
    Failed {
        /// Component type.
        type_name: String,
        /// What went wrong.
        message: String,
    },

    /// A required field was missing from the data record.
    #[error("missing field {0:?}")]
    MissingField(String),

    /// The data record could not be interpreted.
    #[error("invalid component data: {0}")]
    Json(#[from] serde_json::Error),

    /// The rendered output is not well-formed markup.
    #[error("rendered markup rejected: {0}")]
    Markup(#[from] MarkupError),

    /// The mount target is not a live node.
    #[error("mount target {0:?} is not in the document")]
    StaleTarget(NodeId),
}

impl RenderError {
    /// Creates a renderer failure.
    pub fn failed(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// Errors produced while resolving component data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading a source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON source did not parse.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A data script contained a registration that did not parse.
    #[error("malformed data script {path}: {message}")]
    Script {
        /// Script source.
        path: String,
        /// Parse failure.
        message: String,
    },

    /// A script was injected but never registered the expected type.
    #[error("{path} did not register data for {type_name:?}")]
    NotRegistered {
        /// Script source.
        path: String,
        /// Type name derived from the path.
        type_name: String,
    },

    /// The source does not exist.
    #[error("data source not found: {0}")]
    NotFound(String),

    /// The path is neither a data script nor a JSON file.
    #[error("unsupported data source: {0}")]
    Unsupported(String),

    /// Data loaded but the component failed to mount.
    #[error(transparent)]
    Render(#[from] RenderError),
}
