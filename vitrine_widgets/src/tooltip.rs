// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip triggers: configuration read from `.has-tooltip` attributes.

use core::time::Duration;

use vitrine_dom::{Document, NodeId};
use vitrine_place::Placement;

use crate::config::RuntimeConfig;
use crate::markers::{attr, class, flag, ms_attr, px_attr, text_attr};
use crate::overlay;

/// Tooltip configuration of one trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipOptions {
    /// Text content.
    pub text: String,
    /// Placement code.
    pub placement: Placement,
    /// Gap to the trigger in pixels.
    pub offset: f64,
    /// Render an arrow element.
    pub arrow: bool,
    /// Hover-intent delay.
    pub delay: Duration,
}

impl TooltipOptions {
    /// Read a trigger's configuration. `None` when it has no text.
    pub fn read(doc: &Document, trigger: NodeId, config: &RuntimeConfig) -> Option<Self> {
        let text = text_attr(doc, trigger, attr::TOOLTIP)?.to_owned();
        let placement = match text_attr(doc, trigger, attr::TOOLTIP_PLACEMENT) {
            Some(code) => code.parse().unwrap_or_else(|err| {
                log::debug!("tooltip on {trigger:?}: {err}; using default placement");
                config.tooltip_placement
            }),
            None => config.tooltip_placement,
        };
        Some(Self {
            text,
            placement,
            offset: px_attr(doc, trigger, attr::TOOLTIP_OFFSET).unwrap_or(config.tooltip_offset),
            arrow: flag(doc, trigger, attr::TOOLTIP_ARROW),
            delay: delay(doc, trigger, config),
        })
    }

    /// Surface content.
    pub fn markup(&self) -> String {
        let mut out = format!(
            r#"<div class="tooltip-content">{}</div>"#,
            overlay::text(&self.text)
        );
        if self.arrow {
            out.push_str(&format!(r#"<span class="{}"></span>"#, class::TOOLTIP_ARROW));
        }
        out
    }
}

/// Hover-intent delay for a trigger.
pub fn delay(doc: &Document, trigger: NodeId, config: &RuntimeConfig) -> Duration {
    ms_attr(doc, trigger, attr::TOOLTIP_DELAY).unwrap_or(config.tooltip_delay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_place::{Align, Side};

    fn trigger(markup: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let n = doc.set_inner_markup(root, markup).unwrap()[0];
        (doc, n)
    }

    #[test]
    fn reads_configuration_with_defaults() {
        let (doc, n) = trigger(
            r#"<span class="has-tooltip" data-tooltip="Save &amp; close" data-tooltip-placement="bottom-end" data-tooltip-arrow>s</span>"#,
        );
        let opts = TooltipOptions::read(&doc, n, &RuntimeConfig::default()).unwrap();
        assert_eq!(opts.text, "Save & close");
        assert_eq!(opts.placement, Placement::new(Side::Bottom, Align::End));
        assert_eq!(opts.offset, 8.0);
        assert!(opts.arrow);
        assert_eq!(
            opts.markup(),
            r#"<div class="tooltip-content">Save &amp; close</div><span class="tooltip-arrow"></span>"#
        );
    }

    #[test]
    fn malformed_values_fall_back() {
        let (doc, n) = trigger(
            r#"<span class="has-tooltip" data-tooltip="x" data-tooltip-placement="sideways" data-tooltip-offset="far" data-tooltip-delay="soon">s</span>"#,
        );
        let config = RuntimeConfig::default();
        let opts = TooltipOptions::read(&doc, n, &config).unwrap();
        assert_eq!(opts.placement, config.tooltip_placement);
        assert_eq!(opts.offset, config.tooltip_offset);
        assert_eq!(opts.delay, config.tooltip_delay);
    }

    #[test]
    fn empty_text_means_no_tooltip() {
        let (doc, n) = trigger(r#"<span class="has-tooltip" data-tooltip="  ">s</span>"#);
        assert!(TooltipOptions::read(&doc, n, &RuntimeConfig::default()).is_none());
    }
}
