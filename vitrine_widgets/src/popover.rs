// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover triggers: configuration read from `.has-popover` attributes and
//! content rendering for the shared popover surface.
//!
//! Detail rows arrive as JSON in `data-popover-details`. Malformed JSON never
//! escapes this module: the body falls back to a single error line and the
//! failure is logged.

use core::time::Duration;

use serde::Deserialize;
use vitrine_dom::{Document, NodeId, markup};
use vitrine_place::Placement;

use crate::config::RuntimeConfig;
use crate::markers::{attr, class, flag, ms_attr, px_attr, text_attr};
use crate::overlay;

/// Popover content layouts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PopoverType {
    /// Title and body text.
    #[default]
    Simple,
    /// Title and a list of label/value rows.
    Details,
}

/// One label/value row of a details popover.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DetailRow {
    /// Row label.
    pub label: String,
    /// Row value; strings render verbatim, other JSON values as JSON.
    pub value: serde_json::Value,
}

impl DetailRow {
    fn value_text(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Popover configuration of one trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct PopoverOptions {
    /// Content layout.
    pub kind: PopoverType,
    /// Optional title.
    pub title: Option<String>,
    /// Optional icon name rendered before the title.
    pub icon: Option<String>,
    /// Optional body text.
    pub body: Option<String>,
    /// Raw JSON detail rows.
    pub details: Option<String>,
    /// Placement, read from the compass-style origin.
    pub placement: Placement,
    /// Gap to the trigger in pixels.
    pub offset: f64,
    /// Sticky: dismissed only by the close action.
    pub sticky: bool,
    /// Hover-intent delay.
    pub delay: Duration,
}

impl PopoverOptions {
    /// Read a trigger's configuration. `None` when it has nothing to show.
    pub fn read(doc: &Document, trigger: NodeId, config: &RuntimeConfig) -> Option<Self> {
        let owned = |name: &str| text_attr(doc, trigger, name).map(str::to_owned);
        let kind = match text_attr(doc, trigger, attr::POPOVER_TYPE) {
            Some("details") => PopoverType::Details,
            _ => PopoverType::Simple,
        };
        let placement = match text_attr(doc, trigger, attr::POPOVER_ORIGIN) {
            Some(origin) => origin.parse().unwrap_or_else(|err| {
                log::debug!("popover on {trigger:?}: {err}; using default origin");
                config.popover_placement
            }),
            None => config.popover_placement,
        };
        let opts = Self {
            kind,
            title: owned(attr::POPOVER_TITLE),
            icon: owned(attr::POPOVER_ICON),
            body: owned(attr::POPOVER_BODY),
            details: owned(attr::POPOVER_DETAILS),
            placement,
            offset: px_attr(doc, trigger, attr::POPOVER_OFFSET).unwrap_or(config.popover_offset),
            sticky: flag(doc, trigger, attr::POPOVER_CLOSE),
            delay: delay(doc, trigger, config),
        };
        let empty = opts.title.is_none()
            && opts.body.is_none()
            && (opts.kind == PopoverType::Simple || opts.details.is_none());
        (!empty).then_some(opts)
    }

    /// Parsed detail rows.
    pub fn rows(&self) -> Result<Vec<DetailRow>, serde_json::Error> {
        serde_json::from_str(self.details.as_deref().unwrap_or("[]"))
    }

    /// Surface content.
    pub fn markup(&self) -> String {
        let mut out = String::new();
        if self.title.is_some() || self.sticky {
            out.push_str(r#"<div class="popover-header">"#);
            if let Some(icon) = &self.icon {
                out.push_str(&format!(
                    r#"<span class="popover-icon" data-icon="{}"></span>"#,
                    markup::escape_attr(icon)
                ));
            }
            if let Some(title) = &self.title {
                out.push_str(&format!(
                    r#"<h4 class="popover-title">{}</h4>"#,
                    overlay::text(title)
                ));
            }
            if self.sticky {
                out.push_str(&format!(
                    r#"<button class="{}" aria-label="Close">×</button>"#,
                    class::POPOVER_CLOSE
                ));
            }
            out.push_str("</div>");
        }
        out.push_str(r#"<div class="popover-body">"#);
        match self.kind {
            PopoverType::Simple => {
                if let Some(body) = &self.body {
                    out.push_str(&format!("<p>{}</p>", overlay::text(body)));
                }
            }
            PopoverType::Details => match self.rows() {
                Ok(rows) => {
                    if let Some(body) = &self.body {
                        out.push_str(&format!("<p>{}</p>", overlay::text(body)));
                    }
                    out.push_str(r#"<dl class="popover-details">"#);
                    for row in &rows {
                        out.push_str(&format!(
                            "<dt>{}</dt><dd>{}</dd>",
                            overlay::text(&row.label),
                            overlay::text(&row.value_text())
                        ));
                    }
                    out.push_str("</dl>");
                }
                Err(err) => {
                    log::error!("malformed popover details: {err}");
                    out.push_str(r#"<p class="popover-error">Unable to display details.</p>"#);
                }
            },
        }
        out.push_str("</div>");
        out
    }
}

/// Hover-intent delay for a trigger.
pub fn delay(doc: &Document, trigger: NodeId, config: &RuntimeConfig) -> Duration {
    ms_attr(doc, trigger, attr::POPOVER_DELAY).unwrap_or(config.popover_delay)
}
