// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime tuning.

use core::time::Duration;

use kurbo::Size;
use vitrine_place::{Align, Placement, Side, VIEWPORT_MARGIN};

use crate::tree_menu::TreeMode;

/// Defaults used when trigger markup does not configure a value.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    /// Grace period before a hover overlay hides after the pointer leaves.
    pub hide_grace: Duration,
    /// Hover-intent delay before a tooltip shows.
    pub tooltip_delay: Duration,
    /// Hover-intent delay before a popover shows.
    pub popover_delay: Duration,
    /// Gap between a tooltip and its trigger.
    pub tooltip_offset: f64,
    /// Gap between a popover and its trigger.
    pub popover_offset: f64,
    /// Tooltip placement when `data-tooltip-placement` is absent or malformed.
    pub tooltip_placement: Placement,
    /// Popover placement when `data-popover-origin` is absent or malformed.
    pub popover_placement: Placement,
    /// Margin kept between overlays and viewport edges.
    pub viewport_margin: f64,
    /// Overlay size assumed when a surface has no measured bounds yet.
    pub overlay_fallback_size: Size,
    /// Tree mode when `data-tree-mode` is absent or malformed.
    pub tree_mode: TreeMode,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            hide_grace: Duration::from_millis(100),
            tooltip_delay: Duration::from_millis(200),
            popover_delay: Duration::from_millis(300),
            tooltip_offset: 8.0,
            popover_offset: 8.0,
            tooltip_placement: Placement::new(Side::Top, Align::Center),
            popover_placement: Placement::new(Side::Bottom, Align::Start),
            viewport_margin: VIEWPORT_MARGIN,
            overlay_fallback_size: Size::new(200.0, 40.0),
            tree_mode: TreeMode::Accordion,
        }
    }
}
