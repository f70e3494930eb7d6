// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup vocabulary: marker classes, configuration attributes, and the
//! capability set derived from them.
//!
//! Widgets are recognized purely by these names, so markup inserted at any
//! time behaves like markup present at startup. The names are part of the
//! public contract and must not change.

use core::time::Duration;

use vitrine_dom::{Document, NodeId};
use vitrine_responder::types::WidgetLookup;

/// Marker and state class names.
pub mod class {
    #![allow(missing_docs, reason = "Each constant is its own value.")]

    pub const DROPDOWN: &str = "dropdown";
    pub const DROPDOWN_TRIGGER: &str = "dropdown-trigger";
    pub const DROPDOWN_LABEL: &str = "dropdown-label";
    pub const DROPDOWN_MENU: &str = "dropdown-menu";
    pub const DROPDOWN_ITEM: &str = "dropdown-item";
    pub const DROPDOWN_SEARCH: &str = "dropdown-search";
    pub const DROPDOWN_EMPTY: &str = "dropdown-empty";
    pub const DROPDOWN_CHIPS: &str = "dropdown-chips";
    pub const DROPDOWN_CHIP: &str = "dropdown-chip";
    pub const DROPDOWN_CHIP_REMOVE: &str = "dropdown-chip-remove";
    pub const DROPDOWN_CLEAR: &str = "dropdown-clear";

    pub const CHIP_DROPDOWN: &str = "chip-dropdown";
    pub const CHIP_DROPDOWN_TRIGGER: &str = "chip-dropdown-trigger";
    pub const CHIP_DROPDOWN_LABEL: &str = "chip-dropdown-label";
    pub const CHIP_DROPDOWN_MENU: &str = "chip-dropdown-menu";
    pub const CHIP_DROPDOWN_ITEM: &str = "chip-dropdown-item";

    pub const HAS_TOOLTIP: &str = "has-tooltip";
    pub const TOOLTIP: &str = "tooltip";
    pub const TOOLTIP_ARROW: &str = "tooltip-arrow";

    pub const HAS_POPOVER: &str = "has-popover";
    pub const POPOVER: &str = "popover";
    pub const POPOVER_CLOSE: &str = "popover-close";

    pub const ACCORDION: &str = "accordion";
    pub const ACCORDION_ITEM: &str = "accordion-item";
    pub const ACCORDION_HEADER: &str = "accordion-header";
    pub const ACCORDION_TOGGLE: &str = "accordion-toggle";
    pub const ACCORDION_CONTENT: &str = "accordion-content";

    pub const TABS: &str = "tabs";
    pub const TAB: &str = "tab";
    pub const TAB_PANEL: &str = "tab-panel";

    pub const TREE_MENU: &str = "tree-menu";
    pub const TREE_ITEM: &str = "tree-item";
    pub const TREE_LINK: &str = "tree-link";
    pub const TREE_TOGGLE: &str = "tree-toggle";
    pub const TREE_CHILDREN: &str = "tree-children";

    pub const CHECKBOX_GROUP: &str = "checkbox-group";
    pub const CHECKBOX_SELECT_ALL: &str = "checkbox-select-all";
    pub const CHECKBOX_ITEM: &str = "checkbox-item";

    pub const FILE_UPLOAD: &str = "file-upload";
    pub const FILE_UPLOAD_INPUT: &str = "file-upload-input";
    pub const FILE_UPLOAD_LIST: &str = "file-upload-list";
    pub const FILE_UPLOAD_ITEM: &str = "file-upload-item";
    pub const FILE_UPLOAD_REMOVE: &str = "file-upload-remove";

    pub const IS_OPEN: &str = "is-open";
    pub const IS_SELECTED: &str = "is-selected";
    pub const IS_FOCUSED: &str = "is-focused";
    pub const IS_FILLED: &str = "is-filled";
    pub const IS_DISABLED: &str = "is-disabled";
    pub const IS_VISIBLE: &str = "is-visible";
    pub const IS_EXPANDED: &str = "is-expanded";
    pub const IS_ACTIVE: &str = "is-active";
    pub const IS_INDETERMINATE: &str = "is-indeterminate";
    pub const HAS_FILES: &str = "has-files";
}

/// Configuration and bookkeeping attribute names.
pub mod attr {
    #![allow(missing_docs, reason = "Each constant is its own value.")]

    pub const MULTIPLE: &str = "data-multiple";
    pub const SEARCHABLE: &str = "data-searchable";
    pub const PLACEHOLDER: &str = "data-placeholder";
    pub const VALUE: &str = "data-value";
    pub const LABEL: &str = "data-label";

    pub const TOOLTIP: &str = "data-tooltip";
    pub const TOOLTIP_PLACEMENT: &str = "data-tooltip-placement";
    pub const TOOLTIP_OFFSET: &str = "data-tooltip-offset";
    pub const TOOLTIP_ARROW: &str = "data-tooltip-arrow";
    pub const TOOLTIP_DELAY: &str = "data-tooltip-delay";

    pub const POPOVER_TYPE: &str = "data-popover-type";
    pub const POPOVER_TITLE: &str = "data-popover-title";
    pub const POPOVER_ICON: &str = "data-popover-icon";
    pub const POPOVER_BODY: &str = "data-popover-body";
    pub const POPOVER_DETAILS: &str = "data-popover-details";
    pub const POPOVER_ORIGIN: &str = "data-popover-origin";
    pub const POPOVER_OFFSET: &str = "data-popover-offset";
    pub const POPOVER_CLOSE: &str = "data-popover-close";
    pub const POPOVER_DELAY: &str = "data-popover-delay";

    pub const MULTI_EXPAND: &str = "data-multi-expand";

    pub const TAB_GROUP: &str = "data-tab-group";
    pub const DEFAULT_TAB: &str = "data-default-tab";
    pub const TAB_TARGET: &str = "data-tab-target";
    pub const TAB_CONTENT: &str = "data-tab-content";
    pub const TABS_INITIALIZED: &str = "data-tabs-initialized";

    pub const TREE_MODE: &str = "data-tree-mode";
    pub const TREE_ID: &str = "data-tree-id";
    pub const TREE_INITIALIZED: &str = "data-tree-initialized";

    pub const FILE_NAME: &str = "data-file-name";
    pub const OVERLAY: &str = "data-overlay";
    pub const PLACEMENT: &str = "data-placement";

    pub const ARIA_EXPANDED: &str = "aria-expanded";
    pub const ARIA_HIDDEN: &str = "aria-hidden";
    pub const ARIA_SELECTED: &str = "aria-selected";
    pub const ARIA_CURRENT: &str = "aria-current";
    pub const ARIA_CHECKED: &str = "aria-checked";
    pub const ARIA_DISABLED: &str = "aria-disabled";
    pub const CHECKED: &str = "checked";
    pub const DISABLED: &str = "disabled";
    pub const TABINDEX: &str = "tabindex";
    pub const STYLE: &str = "style";
}

bitflags::bitflags! {
    /// Widget capabilities a node carries, derived from its marker classes.
    ///
    /// A node may carry several at once (a tab that is also a tooltip trigger).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// `.dropdown` root.
        const DROPDOWN             = 1 << 0;
        /// `.dropdown-trigger`.
        const DROPDOWN_TRIGGER     = 1 << 1;
        /// `.dropdown-item`.
        const DROPDOWN_ITEM        = 1 << 2;
        /// `.dropdown-search`.
        const DROPDOWN_SEARCH      = 1 << 3;
        /// `.dropdown-chip-remove`.
        const DROPDOWN_CHIP_REMOVE = 1 << 4;
        /// `.dropdown-clear`.
        const DROPDOWN_CLEAR       = 1 << 5;
        /// `.chip-dropdown` root.
        const CHIP_DROPDOWN         = 1 << 6;
        /// `.chip-dropdown-trigger`.
        const CHIP_DROPDOWN_TRIGGER = 1 << 7;
        /// `.chip-dropdown-item`.
        const CHIP_DROPDOWN_ITEM    = 1 << 8;
        /// `.has-tooltip`.
        const TOOLTIP_TRIGGER = 1 << 9;
        /// `.has-popover`.
        const POPOVER_TRIGGER = 1 << 10;
        /// `.popover-close`.
        const POPOVER_CLOSE   = 1 << 11;
        /// `.accordion` group.
        const ACCORDION        = 1 << 12;
        /// `.accordion-header`.
        const ACCORDION_HEADER = 1 << 13;
        /// `.accordion-toggle`.
        const ACCORDION_TOGGLE = 1 << 14;
        /// `.tabs` group.
        const TABS = 1 << 15;
        /// `.tab`.
        const TAB  = 1 << 16;
        /// `.tree-menu` root.
        const TREE_MENU   = 1 << 17;
        /// `.tree-link`.
        const TREE_LINK   = 1 << 18;
        /// `.tree-toggle`.
        const TREE_TOGGLE = 1 << 19;
        /// `.checkbox-group`.
        const CHECKBOX_GROUP      = 1 << 20;
        /// `.checkbox-select-all`.
        const CHECKBOX_SELECT_ALL = 1 << 21;
        /// `.checkbox-item`.
        const CHECKBOX_ITEM       = 1 << 22;
        /// `.file-upload` root.
        const FILE_UPLOAD        = 1 << 23;
        /// `.file-upload-input`.
        const FILE_UPLOAD_INPUT  = 1 << 24;
        /// `.file-upload-remove`.
        const FILE_UPLOAD_REMOVE = 1 << 25;
    }
}

const MARKERS: &[(&str, Capabilities)] = &[
    (class::DROPDOWN, Capabilities::DROPDOWN),
    (class::DROPDOWN_TRIGGER, Capabilities::DROPDOWN_TRIGGER),
    (class::DROPDOWN_ITEM, Capabilities::DROPDOWN_ITEM),
    (class::DROPDOWN_SEARCH, Capabilities::DROPDOWN_SEARCH),
    (class::DROPDOWN_CHIP_REMOVE, Capabilities::DROPDOWN_CHIP_REMOVE),
    (class::DROPDOWN_CLEAR, Capabilities::DROPDOWN_CLEAR),
    (class::CHIP_DROPDOWN, Capabilities::CHIP_DROPDOWN),
    (class::CHIP_DROPDOWN_TRIGGER, Capabilities::CHIP_DROPDOWN_TRIGGER),
    (class::CHIP_DROPDOWN_ITEM, Capabilities::CHIP_DROPDOWN_ITEM),
    (class::HAS_TOOLTIP, Capabilities::TOOLTIP_TRIGGER),
    (class::HAS_POPOVER, Capabilities::POPOVER_TRIGGER),
    (class::POPOVER_CLOSE, Capabilities::POPOVER_CLOSE),
    (class::ACCORDION, Capabilities::ACCORDION),
    (class::ACCORDION_HEADER, Capabilities::ACCORDION_HEADER),
    (class::ACCORDION_TOGGLE, Capabilities::ACCORDION_TOGGLE),
    (class::TABS, Capabilities::TABS),
    (class::TAB, Capabilities::TAB),
    (class::TREE_MENU, Capabilities::TREE_MENU),
    (class::TREE_LINK, Capabilities::TREE_LINK),
    (class::TREE_TOGGLE, Capabilities::TREE_TOGGLE),
    (class::CHECKBOX_GROUP, Capabilities::CHECKBOX_GROUP),
    (class::CHECKBOX_SELECT_ALL, Capabilities::CHECKBOX_SELECT_ALL),
    (class::CHECKBOX_ITEM, Capabilities::CHECKBOX_ITEM),
    (class::FILE_UPLOAD, Capabilities::FILE_UPLOAD),
    (class::FILE_UPLOAD_INPUT, Capabilities::FILE_UPLOAD_INPUT),
    (class::FILE_UPLOAD_REMOVE, Capabilities::FILE_UPLOAD_REMOVE),
];

/// Capabilities carried by `node`; empty for text nodes and stale ids.
pub fn capabilities_of(doc: &Document, node: NodeId) -> Capabilities {
    doc.classes(node)
        .iter()
        .filter_map(|c| MARKERS.iter().find(|(name, _)| name == c))
        .fold(Capabilities::empty(), |acc, (_, cap)| acc | *cap)
}

/// [`WidgetLookup`] over a document's marker classes.
#[derive(Clone, Copy, Debug)]
pub struct CapabilityLookup<'a>(pub &'a Document);

impl WidgetLookup<NodeId> for CapabilityLookup<'_> {
    type WidgetId = Capabilities;

    fn widget_of(&self, node: &NodeId) -> Option<Capabilities> {
        let caps = capabilities_of(self.0, *node);
        (!caps.is_empty()).then_some(caps)
    }
}

/// Boolean attribute: present and not literally `"false"`.
pub fn flag(doc: &Document, node: NodeId, name: &str) -> bool {
    doc.attr(node, name).is_some_and(|v| !v.eq_ignore_ascii_case("false"))
}

/// Non-empty, trimmed attribute value.
pub fn text_attr<'a>(doc: &'a Document, node: NodeId, name: &str) -> Option<&'a str> {
    doc.attr(node, name).map(str::trim).filter(|v| !v.is_empty())
}

/// Numeric pixel attribute; malformed values read as absent.
pub fn px_attr(doc: &Document, node: NodeId, name: &str) -> Option<f64> {
    text_attr(doc, node, name)
        .map(|v| v.trim_end_matches("px"))
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Millisecond delay attribute; malformed values read as absent.
pub fn ms_attr(doc: &Document, node: NodeId, name: &str) -> Option<Duration> {
    text_attr(doc, node, name)
        .map(|v| v.trim_end_matches("ms"))
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// True if the node is disabled by class, `disabled`, or `aria-disabled="true"`.
pub fn is_disabled(doc: &Document, node: NodeId) -> bool {
    doc.has_class(node, class::IS_DISABLED)
        || doc.has_attr(node, attr::DISABLED)
        || doc.attr(node, attr::ARIA_DISABLED) == Some("true")
}

/// Visible label of an option-like node: `data-label`, else its trimmed text.
pub fn label_of(doc: &Document, node: NodeId) -> String {
    text_attr(doc, node, attr::LABEL)
        .map(str::to_owned)
        .unwrap_or_else(|| doc.text_content(node).trim().to_owned())
}

/// Value of an option-like node: `data-value`, then `value`, else its label.
pub fn value_of(doc: &Document, node: NodeId) -> String {
    doc.attr(node, attr::VALUE)
        .or_else(|| doc.attr(node, "value"))
        .map(str::to_owned)
        .unwrap_or_else(|| label_of(doc, node))
}

/// `"true"` / `"false"` for ARIA attributes.
pub(crate) fn aria_bool(on: bool) -> &'static str {
    if on { "true" } else { "false" }
}
