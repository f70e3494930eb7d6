// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accordion controller.
//!
//! A `.accordion` group is single-expand unless it carries
//! `data-multi-expand`. The mode is read from the group on every activation,
//! never from the panels.

use vitrine_dom::{Document, NodeId};

use crate::event::{EventKind, WidgetEvent};
use crate::markers::{aria_bool, attr, class, flag};
use crate::runtime::Cx;

/// True when the group lets panels expand independently.
pub fn is_multi_expand(doc: &Document, group: NodeId) -> bool {
    flag(doc, group, attr::MULTI_EXPAND)
}

/// Items that belong to `group` (not to a nested accordion).
pub fn items(doc: &Document, group: NodeId) -> Vec<NodeId> {
    doc.query_class(group, class::ACCORDION_ITEM)
        .into_iter()
        .filter(|i| parent_group(doc, *i) == Some(group))
        .collect()
}

fn parent_group(doc: &Document, item: NodeId) -> Option<NodeId> {
    doc.parent(item)
        .and_then(|p| doc.closest_class(p, class::ACCORDION))
}

fn own_part(doc: &Document, item: NodeId, cls: &str) -> Option<NodeId> {
    doc.query_class(item, cls)
        .into_iter()
        .find(|n| doc.closest_class(*n, class::ACCORDION_ITEM) == Some(item))
}

/// True if the item is expanded.
pub fn is_expanded(doc: &Document, item: NodeId) -> bool {
    doc.has_class(item, class::IS_EXPANDED)
}

/// Set an item's state and mirror it into ARIA attributes.
pub fn set_expanded(doc: &mut Document, item: NodeId, expanded: bool) {
    doc.set_class(item, class::IS_EXPANDED, expanded);
    if let Some(header) = own_part(doc, item, class::ACCORDION_HEADER) {
        doc.set_attr(header, attr::ARIA_EXPANDED, aria_bool(expanded));
    }
    if let Some(toggle) = own_part(doc, item, class::ACCORDION_TOGGLE) {
        doc.set_attr(toggle, attr::ARIA_EXPANDED, aria_bool(expanded));
    }
    if let Some(content) = own_part(doc, item, class::ACCORDION_CONTENT) {
        doc.set_attr(content, attr::ARIA_HIDDEN, aria_bool(!expanded));
        doc.set_hidden(content, !expanded);
    }
}

/// Mirror every item's current class state into ARIA attributes.
pub(crate) fn init(doc: &mut Document, group: NodeId) {
    for item in items(doc, group) {
        let expanded = is_expanded(doc, item);
        set_expanded(doc, item, expanded);
    }
}

/// Header or toggle activation.
pub(crate) fn activate(cx: &mut Cx<'_>, part: NodeId) {
    let Some(item) = cx.doc.closest_class(part, class::ACCORDION_ITEM) else {
        return;
    };
    if is_expanded(cx.doc, item) {
        set_expanded(cx.doc, item, false);
        cx.emit(WidgetEvent::new(EventKind::AccordionClose, item));
        return;
    }
    if let Some(group) = parent_group(cx.doc, item)
        && !is_multi_expand(cx.doc, group)
    {
        for sibling in items(cx.doc, group) {
            if sibling != item && is_expanded(cx.doc, sibling) {
                set_expanded(cx.doc, sibling, false);
                cx.emit(WidgetEvent::new(EventKind::AccordionClose, sibling));
            }
        }
    }
    set_expanded(cx.doc, item, true);
    cx.emit(WidgetEvent::new(EventKind::AccordionOpen, item));
}
