// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown controller: open/close exclusivity, single and multi selection,
//! chips, search filtering, and keyboard navigation.
//!
//! ## Exclusivity
//!
//! At most one menu is open across the document, counting both dropdowns and
//! chip dropdowns. Opening any menu force-closes every other open one.
//!
//! ## Selection
//!
//! Selection lives in the markup: items carry `is-selected`. In multi-select
//! mode the chip list is rebuilt from the selected items after every change, so
//! chips and selected items always correspond 1:1. Search filtering only
//! toggles `hidden` on items and never touches selection.
//!
//! ## Keyboard
//!
//! The keyboard cursor is the item carrying `is-focused`, distinct from
//! selection. Arrow keys move it among visible, enabled items and wrap around.

use vitrine_dom::{Document, NodeId, markup};

use crate::event::{EventKind, WidgetEvent};
use crate::markers::{aria_bool, attr, class, flag, is_disabled, label_of, text_attr, value_of};
use crate::runtime::Cx;

/// Menu families sharing the at-most-one-open invariant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MenuKind {
    /// `.dropdown`.
    Dropdown,
    /// `.chip-dropdown`.
    Chip,
}

impl MenuKind {
    /// Root marker class.
    pub const fn root_class(self) -> &'static str {
        match self {
            Self::Dropdown => class::DROPDOWN,
            Self::Chip => class::CHIP_DROPDOWN,
        }
    }

    pub(crate) const fn trigger_class(self) -> &'static str {
        match self {
            Self::Dropdown => class::DROPDOWN_TRIGGER,
            Self::Chip => class::CHIP_DROPDOWN_TRIGGER,
        }
    }

    pub(crate) const fn menu_class(self) -> &'static str {
        match self {
            Self::Dropdown => class::DROPDOWN_MENU,
            Self::Chip => class::CHIP_DROPDOWN_MENU,
        }
    }

    pub(crate) const fn item_class(self) -> &'static str {
        match self {
            Self::Dropdown => class::DROPDOWN_ITEM,
            Self::Chip => class::CHIP_DROPDOWN_ITEM,
        }
    }

    const fn open_event(self) -> EventKind {
        match self {
            Self::Dropdown => EventKind::DropdownOpen,
            Self::Chip => EventKind::ChipDropdownOpen,
        }
    }

    const fn close_event(self) -> EventKind {
        match self {
            Self::Dropdown => EventKind::DropdownClose,
            Self::Chip => EventKind::ChipDropdownClose,
        }
    }
}

/// First descendant of `root` with `cls` that belongs to `root` and not to a nested menu.
pub(crate) fn part(doc: &Document, root: NodeId, kind: MenuKind, cls: &str) -> Option<NodeId> {
    doc.query_class(root, cls)
        .into_iter()
        .find(|n| doc.closest_class(*n, kind.root_class()) == Some(root))
}

/// Items of a menu in document order.
pub(crate) fn items(doc: &Document, root: NodeId, kind: MenuKind) -> Vec<NodeId> {
    doc.query_class(root, kind.item_class())
        .into_iter()
        .filter(|n| doc.closest_class(*n, kind.root_class()) == Some(root))
        .collect()
}

/// Tracks the single open menu.
#[derive(Clone, Debug, Default)]
pub struct Menus {
    open: Option<(NodeId, MenuKind)>,
}

impl Menus {
    /// The open menu's root.
    pub fn open_menu(&self) -> Option<NodeId> {
        self.open.map(|(root, _)| root)
    }

    /// Kind of the open menu.
    pub fn open_kind(&self) -> Option<MenuKind> {
        self.open.map(|(_, kind)| kind)
    }

    /// Trigger activation: open if closed, close if open.
    pub(crate) fn toggle(&mut self, cx: &mut Cx<'_>, root: NodeId, kind: MenuKind) {
        if cx.doc.has_class(root, class::IS_OPEN) {
            self.close(cx, root, kind, false);
        } else {
            self.open(cx, root, kind);
        }
    }

    /// Open `root`, force-closing every other open menu first.
    pub(crate) fn open(&mut self, cx: &mut Cx<'_>, root: NodeId, kind: MenuKind) {
        if is_disabled(cx.doc, root)
            || part(cx.doc, root, kind, kind.trigger_class()).is_some_and(|t| is_disabled(cx.doc, t))
        {
            return;
        }
        if cx.doc.has_class(root, class::IS_OPEN) {
            self.open = Some((root, kind));
            return;
        }
        self.close_all(cx);
        let doc = &mut *cx.doc;
        doc.add_class(root, class::IS_OPEN);
        if let Some(menu) = part(doc, root, kind, kind.menu_class()) {
            doc.set_hidden(menu, false);
        }
        if let Some(trigger) = part(doc, root, kind, kind.trigger_class()) {
            doc.set_attr(trigger, attr::ARIA_EXPANDED, aria_bool(true));
        }
        clear_cursor(doc, root, kind);
        if kind == MenuKind::Dropdown
            && let Some(search) = part(doc, root, kind, class::DROPDOWN_SEARCH)
        {
            doc.focus(search);
        }
        self.open = Some((root, kind));
        log::debug!("opened {kind:?} {root:?}");
        cx.emit(WidgetEvent::new(kind.open_event(), root));
    }

    /// Close `root`; with `refocus`, focus returns to its trigger.
    pub(crate) fn close(&mut self, cx: &mut Cx<'_>, root: NodeId, kind: MenuKind, refocus: bool) {
        if self.open_menu() == Some(root) {
            self.open = None;
        }
        if !cx.doc.has_class(root, class::IS_OPEN) {
            return;
        }
        let doc = &mut *cx.doc;
        doc.remove_class(root, class::IS_OPEN);
        if let Some(menu) = part(doc, root, kind, kind.menu_class()) {
            doc.set_hidden(menu, true);
        }
        let trigger = part(doc, root, kind, kind.trigger_class());
        if let Some(trigger) = trigger {
            doc.set_attr(trigger, attr::ARIA_EXPANDED, aria_bool(false));
            if refocus {
                doc.focus(trigger);
            }
        }
        clear_cursor(doc, root, kind);
        if kind == MenuKind::Dropdown {
            reset_search(doc, root);
        }
        log::debug!("closed {kind:?} {root:?}");
        cx.emit(WidgetEvent::new(kind.close_event(), root));
    }

    /// Close the open menu, if any.
    pub(crate) fn close_current(&mut self, cx: &mut Cx<'_>, refocus: bool) -> bool {
        match self.open {
            Some((root, kind)) => {
                self.close(cx, root, kind, refocus);
                true
            }
            None => false,
        }
    }

    /// Close every menu marked open anywhere in the document.
    pub(crate) fn close_all(&mut self, cx: &mut Cx<'_>) {
        let root = cx.doc.root();
        for kind in [MenuKind::Dropdown, MenuKind::Chip] {
            for menu in cx.doc.query_class(root, kind.root_class()) {
                if cx.doc.has_class(menu, class::IS_OPEN) {
                    self.close(cx, menu, kind, false);
                }
            }
        }
        self.open = None;
    }

    /// Pointer pressed at `target`: close the open menu when outside it.
    pub(crate) fn pointer_down(&mut self, cx: &mut Cx<'_>, target: NodeId) {
        if let Some((root, kind)) = self.open
            && !cx.doc.contains(root, target)
        {
            self.close(cx, root, kind, false);
        }
    }

    /// Drop the open menu if it was removed from the document.
    pub(crate) fn forget_dead(&mut self, doc: &Document) {
        if self.open.is_some_and(|(root, _)| !doc.is_connected(root)) {
            self.open = None;
        }
    }
}

fn clear_cursor(doc: &mut Document, root: NodeId, kind: MenuKind) {
    for item in items(doc, root, kind) {
        doc.remove_class(item, class::IS_FOCUSED);
    }
}

/// Multi-select mode.
pub fn is_multiple(doc: &Document, root: NodeId) -> bool {
    flag(doc, root, attr::MULTIPLE)
}

/// Values of the selected items, in document order.
pub fn selected_values(doc: &Document, root: NodeId) -> Vec<String> {
    items(doc, root, MenuKind::Dropdown)
        .into_iter()
        .filter(|i| doc.has_class(*i, class::IS_SELECTED))
        .map(|i| value_of(doc, i))
        .collect()
}

fn set_selected(doc: &mut Document, item: NodeId, on: bool) {
    doc.set_class(item, class::IS_SELECTED, on);
    doc.set_attr(item, attr::ARIA_SELECTED, aria_bool(on));
}

/// Item activation (click or Enter).
pub(crate) fn activate_item(menus: &mut Menus, cx: &mut Cx<'_>, root: NodeId, item: NodeId) {
    if is_disabled(cx.doc, item) {
        return;
    }
    let value = value_of(cx.doc, item);
    let label = label_of(cx.doc, item);
    if is_multiple(cx.doc, root) {
        let on = !cx.doc.has_class(item, class::IS_SELECTED);
        set_selected(cx.doc, item, on);
        sync(cx.doc, root);
        let kind = if on {
            EventKind::DropdownSelect
        } else {
            EventKind::DropdownDeselect
        };
        cx.emit(WidgetEvent::new(kind, root).with_value(value).with_text(label));
    } else {
        for other in items(cx.doc, root, MenuKind::Dropdown) {
            set_selected(cx.doc, other, other == item);
        }
        sync(cx.doc, root);
        cx.emit(
            WidgetEvent::new(EventKind::DropdownSelect, root)
                .with_value(value)
                .with_text(label),
        );
        menus.close(cx, root, MenuKind::Dropdown, true);
    }
}

/// A chip's remove button was activated.
pub(crate) fn remove_chip(cx: &mut Cx<'_>, root: NodeId, button: NodeId) {
    let Some(chip) = cx.doc.closest_class(button, class::DROPDOWN_CHIP) else {
        return;
    };
    let Some(value) = cx.doc.attr(chip, attr::VALUE).map(str::to_owned) else {
        return;
    };
    let mut label = None;
    for item in items(cx.doc, root, MenuKind::Dropdown) {
        if value_of(cx.doc, item) == value && cx.doc.has_class(item, class::IS_SELECTED) {
            set_selected(cx.doc, item, false);
            label = Some(label_of(cx.doc, item));
        }
    }
    sync(cx.doc, root);
    let mut event = WidgetEvent::new(EventKind::DropdownDeselect, root).with_value(value);
    if let Some(label) = label {
        event = event.with_text(label);
    }
    cx.emit(event);
}

/// Clear the whole selection.
pub(crate) fn clear(cx: &mut Cx<'_>, root: NodeId) {
    for item in items(cx.doc, root, MenuKind::Dropdown) {
        set_selected(cx.doc, item, false);
    }
    sync(cx.doc, root);
    cx.emit(WidgetEvent::new(EventKind::DropdownClear, root));
}

/// Bring the label, chips, `is-filled`, and `data-value` in line with the
/// selected items.
pub(crate) fn sync(doc: &mut Document, root: NodeId) {
    let kind = MenuKind::Dropdown;
    let selected: Vec<(String, String)> = items(doc, root, kind)
        .into_iter()
        .filter(|i| doc.has_class(*i, class::IS_SELECTED))
        .map(|i| (value_of(doc, i), label_of(doc, i)))
        .collect();
    let placeholder = text_attr(doc, root, attr::PLACEHOLDER)
        .unwrap_or_default()
        .to_owned();
    let multiple = is_multiple(doc, root);
    let label = part(doc, root, kind, class::DROPDOWN_LABEL);

    if multiple {
        let chips = match part(doc, root, kind, class::DROPDOWN_CHIPS) {
            Some(c) => Some(c),
            None => part(doc, root, kind, class::DROPDOWN_TRIGGER).map(|trigger| {
                let c = doc.create_element("span");
                doc.add_class(c, class::DROPDOWN_CHIPS);
                doc.append_child(trigger, c);
                c
            }),
        };
        if let Some(chips) = chips {
            let markup: String = selected
                .iter()
                .map(|(value, label)| chip_markup(value, label))
                .collect();
            if let Err(err) = doc.set_inner_markup(chips, &markup) {
                log::error!("chip markup rejected: {err}");
            }
        }
        if let Some(label) = label {
            doc.set_text(label, &placeholder);
            doc.set_hidden(label, !selected.is_empty());
        }
    } else if let Some(label) = label {
        match selected.first() {
            Some((_, text)) => doc.set_text(label, text),
            None => doc.set_text(label, &placeholder),
        }
    }

    doc.set_class(root, class::IS_FILLED, !selected.is_empty());
    let joined = selected
        .iter()
        .map(|(v, _)| v.as_str())
        .collect::<Vec<_>>()
        .join(",");
    if joined.is_empty() {
        doc.remove_attr(root, attr::VALUE);
    } else {
        doc.set_attr(root, attr::VALUE, &joined);
    }
    if let Some(clear) = part(doc, root, kind, class::DROPDOWN_CLEAR) {
        doc.set_hidden(clear, selected.is_empty());
    }
}

fn chip_markup(value: &str, label: &str) -> String {
    format!(
        r#"<span class="{chip}" data-value="{v}">{t}<button class="{remove}" aria-label="Remove {a}">×</button></span>"#,
        chip = class::DROPDOWN_CHIP,
        remove = class::DROPDOWN_CHIP_REMOVE,
        v = markup::escape_attr(value),
        t = markup::escape_text(label),
        a = markup::escape_attr(label),
    )
}

/// Search input changed: show items whose label contains `query`
/// (case-insensitive), and the empty indicator when none match.
pub(crate) fn filter(doc: &mut Document, root: NodeId, query: &str) {
    let needle = query.trim().to_lowercase();
    let mut visible = 0;
    for item in items(doc, root, MenuKind::Dropdown) {
        let matches = needle.is_empty() || label_of(doc, item).to_lowercase().contains(&needle);
        doc.set_hidden(item, !matches);
        if matches {
            visible += 1;
        } else {
            doc.remove_class(item, class::IS_FOCUSED);
        }
    }
    if let Some(empty) = part(doc, root, MenuKind::Dropdown, class::DROPDOWN_EMPTY) {
        doc.set_hidden(empty, visible > 0);
    }
}

fn reset_search(doc: &mut Document, root: NodeId) {
    if let Some(search) = part(doc, root, MenuKind::Dropdown, class::DROPDOWN_SEARCH) {
        doc.set_attr(search, "value", "");
        filter(doc, root, "");
    }
}

/// Visible, enabled items: the keyboard cursor's domain.
pub(crate) fn navigable(doc: &Document, root: NodeId, kind: MenuKind) -> Vec<NodeId> {
    items(doc, root, kind)
        .into_iter()
        .filter(|i| !doc.is_hidden(*i) && !is_disabled(doc, *i))
        .collect()
}

/// Move the keyboard cursor by `step` (wrapping). Returns the new cursor.
pub(crate) fn move_cursor(
    doc: &mut Document,
    root: NodeId,
    kind: MenuKind,
    step: isize,
) -> Option<NodeId> {
    let nav = navigable(doc, root, kind);
    if nav.is_empty() {
        return None;
    }
    let len = nav.len() as isize;
    let current = nav.iter().position(|i| doc.has_class(*i, class::IS_FOCUSED));
    let next = match current {
        Some(at) => (at as isize + step).rem_euclid(len),
        None if step < 0 => len - 1,
        None => 0,
    };
    clear_cursor(doc, root, kind);
    let target = nav[next as usize];
    doc.add_class(target, class::IS_FOCUSED);
    Some(target)
}

/// Current keyboard cursor.
pub(crate) fn cursor(doc: &Document, root: NodeId, kind: MenuKind) -> Option<NodeId> {
    items(doc, root, kind)
        .into_iter()
        .find(|i| doc.has_class(*i, class::IS_FOCUSED))
}

/// Key pressed inside a dropdown. Returns true if handled.
pub(crate) fn key(menus: &mut Menus, cx: &mut Cx<'_>, root: NodeId, key: &str) -> bool {
    let kind = MenuKind::Dropdown;
    let open = cx.doc.has_class(root, class::IS_OPEN);
    match key {
        "ArrowDown" | "ArrowUp" if !open => {
            menus.open(cx, root, kind);
            move_cursor(cx.doc, root, kind, if key == "ArrowDown" { 1 } else { -1 });
            true
        }
        "ArrowDown" => move_cursor(cx.doc, root, kind, 1).is_some(),
        "ArrowUp" => move_cursor(cx.doc, root, kind, -1).is_some(),
        "Enter" if open => match cursor(cx.doc, root, kind) {
            Some(item) => {
                activate_item(menus, cx, root, item);
                true
            }
            None => false,
        },
        "Enter" => {
            menus.open(cx, root, kind);
            true
        }
        "Escape" if open => {
            menus.close(cx, root, kind, true);
            true
        }
        _ => false,
    }
}
