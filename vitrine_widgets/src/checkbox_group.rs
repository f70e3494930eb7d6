// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checkbox group with a select-all control.
//!
//! Select-all changes every enabled item; disabled items keep their state.
//! The select-all control mirrors the enabled items: checked when all are,
//! indeterminate when some are.

use vitrine_dom::{Document, NodeId};

use crate::event::{EventKind, WidgetEvent};
use crate::markers::{attr, class, is_disabled, value_of};
use crate::runtime::Cx;

/// Item checkboxes of a group.
pub fn items(doc: &Document, group: NodeId) -> Vec<NodeId> {
    doc.query_class(group, class::CHECKBOX_ITEM)
        .into_iter()
        .filter(|i| doc.closest_class(*i, class::CHECKBOX_GROUP) == Some(group))
        .collect()
}

/// True if the checkbox is checked.
pub fn is_checked(doc: &Document, node: NodeId) -> bool {
    doc.has_attr(node, attr::CHECKED)
}

/// Values of checked items, in document order.
pub fn checked_values(doc: &Document, group: NodeId) -> Vec<String> {
    items(doc, group)
        .into_iter()
        .filter(|i| is_checked(doc, *i))
        .map(|i| value_of(doc, i))
        .collect()
}

fn select_all_of(doc: &Document, group: NodeId) -> Option<NodeId> {
    doc.query_class(group, class::CHECKBOX_SELECT_ALL)
        .into_iter()
        .find(|i| doc.closest_class(*i, class::CHECKBOX_GROUP) == Some(group))
}

/// Mirror item state into the select-all control.
pub(crate) fn sync(doc: &mut Document, group: NodeId) {
    let Some(all) = select_all_of(doc, group) else {
        return;
    };
    let enabled: Vec<NodeId> = items(doc, group)
        .into_iter()
        .filter(|i| !is_disabled(doc, *i))
        .collect();
    let checked = enabled.iter().filter(|i| is_checked(doc, **i)).count();
    let every = !enabled.is_empty() && checked == enabled.len();
    let some = checked > 0 && !every;
    doc.set_flag(all, attr::CHECKED, every);
    doc.set_class(all, class::IS_INDETERMINATE, some);
    let aria = if some {
        "mixed"
    } else if every {
        "true"
    } else {
        "false"
    };
    doc.set_attr(all, attr::ARIA_CHECKED, aria);
}

/// A checkbox in a group changed to `checked`.
pub(crate) fn change(cx: &mut Cx<'_>, target: NodeId, checked: bool) {
    let Some(group) = cx.doc.closest_class(target, class::CHECKBOX_GROUP) else {
        return;
    };
    if cx.doc.has_class(target, class::CHECKBOX_SELECT_ALL) {
        for item in items(cx.doc, group) {
            if !is_disabled(cx.doc, item) {
                cx.doc.set_flag(item, attr::CHECKED, checked);
            }
        }
    } else if cx.doc.has_class(target, class::CHECKBOX_ITEM) {
        if is_disabled(cx.doc, target) {
            return;
        }
        cx.doc.set_flag(target, attr::CHECKED, checked);
    } else {
        return;
    }
    sync(cx.doc, group);
    let values = checked_values(cx.doc, group);
    cx.emit(
        WidgetEvent::new(EventKind::CheckboxGroupChange, group)
            .with_value(values.join(","))
            .with_text(values.len().to_string()),
    );
}
