// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chip dropdown: a filter chip that opens a single-select menu.
//!
//! Open/close and exclusivity are shared with dropdowns through
//! [`Menus`]; this module only handles item selection and keys.

use vitrine_dom::NodeId;

use crate::dropdown::{MenuKind, Menus, cursor, items, move_cursor, part};
use crate::event::{EventKind, WidgetEvent};
use crate::markers::{aria_bool, attr, class, is_disabled, label_of, value_of};
use crate::runtime::Cx;

/// Select `item`, show its label on the chip, and close the menu.
pub(crate) fn activate_item(menus: &mut Menus, cx: &mut Cx<'_>, root: NodeId, item: NodeId) {
    if is_disabled(cx.doc, item) {
        return;
    }
    for other in items(cx.doc, root, MenuKind::Chip) {
        let on = other == item;
        cx.doc.set_class(other, class::IS_SELECTED, on);
        cx.doc.set_attr(other, attr::ARIA_SELECTED, aria_bool(on));
    }
    let value = value_of(cx.doc, item);
    let label = label_of(cx.doc, item);
    if let Some(l) = part(cx.doc, root, MenuKind::Chip, class::CHIP_DROPDOWN_LABEL) {
        cx.doc.set_text(l, &label);
    }
    cx.doc.set_attr(root, attr::VALUE, &value);
    cx.doc.add_class(root, class::IS_ACTIVE);
    cx.emit(
        WidgetEvent::new(EventKind::ChipDropdownSelect, root)
            .with_value(value)
            .with_text(label),
    );
    menus.close(cx, root, MenuKind::Chip, true);
}

/// Key pressed inside a chip dropdown. Returns true if handled.
pub(crate) fn key(menus: &mut Menus, cx: &mut Cx<'_>, root: NodeId, key: &str) -> bool {
    let kind = MenuKind::Chip;
    let open = cx.doc.has_class(root, class::IS_OPEN);
    match key {
        "ArrowDown" | "Enter" | " " if !open => {
            menus.open(cx, root, kind);
            true
        }
        "ArrowDown" => move_cursor(cx.doc, root, kind, 1).is_some(),
        "ArrowUp" => move_cursor(cx.doc, root, kind, -1).is_some(),
        "Enter" => match cursor(cx.doc, root, kind) {
            Some(item) => {
                activate_item(menus, cx, root, item);
                true
            }
            None => false,
        },
        "Escape" if open => {
            menus.close(cx, root, kind, true);
            true
        }
        _ => false,
    }
}
