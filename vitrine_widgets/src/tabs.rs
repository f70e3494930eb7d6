// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tab controller.
//!
//! After initialization exactly one tab per `.tabs` group is active. The
//! group's panels live in a separately addressed container,
//! `[data-tab-content=<group id>]`; the active tab's `data-tab-target` names
//! the one panel shown there.
//!
//! Initial resolution: the first tab already marked `is-active` wins (a
//! warning is recorded when several are), else `data-default-tab`, else the
//! first tab.

use vitrine_dom::{Document, NodeId};

use crate::event::{EventKind, Warning, WidgetEvent};
use crate::markers::{aria_bool, attr, class, is_disabled, text_attr};
use crate::runtime::Cx;

/// Tabs that belong to `group`, in document order.
pub fn tabs_of(doc: &Document, group: NodeId) -> Vec<NodeId> {
    doc.query_class(group, class::TAB)
        .into_iter()
        .filter(|t| doc.closest_class(*t, class::TABS) == Some(group))
        .collect()
}

/// The active tab of `group`.
pub fn active_tab(doc: &Document, group: NodeId) -> Option<NodeId> {
    tabs_of(doc, group)
        .into_iter()
        .find(|t| doc.has_class(*t, class::IS_ACTIVE))
}

/// The content container addressed by the group's id.
pub fn content_container(doc: &Document, group: NodeId) -> Option<NodeId> {
    let id = text_attr(doc, group, attr::TAB_GROUP)?;
    doc.find_by_attr(attr::TAB_CONTENT, id)
}

fn panels(doc: &Document, container: NodeId) -> Vec<NodeId> {
    doc.query_class(container, class::TAB_PANEL)
        .into_iter()
        .filter(|p| {
            doc.parent(*p)
                .and_then(|x| doc.closest(x, |n| doc.has_attr(n, attr::TAB_CONTENT)))
                == Some(container)
        })
        .collect()
}

/// Resolve the initial active tab once per group.
pub(crate) fn init(doc: &mut Document, group: NodeId, warnings: &mut Vec<Warning>) {
    if doc.has_attr(group, attr::TABS_INITIALIZED) {
        return;
    }
    doc.set_attr(group, attr::TABS_INITIALIZED, "");
    let tabs = tabs_of(doc, group);
    if tabs.is_empty() {
        return;
    }
    let marked: Vec<NodeId> = tabs
        .iter()
        .copied()
        .filter(|t| doc.has_class(*t, class::IS_ACTIVE))
        .collect();
    if marked.len() > 1 {
        let warning = Warning::MultipleActiveTabs {
            group,
            count: marked.len(),
        };
        log::warn!("{warning}");
        warnings.push(warning);
    }
    let chosen = marked.first().copied().unwrap_or_else(|| {
        text_attr(doc, group, attr::DEFAULT_TAB)
            .and_then(|v| v.parse::<usize>().ok())
            .and_then(|i| tabs.get(i).copied())
            .unwrap_or(tabs[0])
    });
    apply(doc, group, chosen);
}

/// Mark `tab` active, deactivate its siblings, and show its panel.
fn apply(doc: &mut Document, group: NodeId, tab: NodeId) {
    for t in tabs_of(doc, group) {
        let on = t == tab;
        doc.set_class(t, class::IS_ACTIVE, on);
        doc.set_attr(t, attr::ARIA_SELECTED, aria_bool(on));
        doc.set_attr(t, attr::TABINDEX, if on { "0" } else { "-1" });
    }
    let Some(container) = content_container(doc, group) else {
        return;
    };
    let target = doc.attr(tab, attr::TAB_TARGET).map(str::to_owned);
    for panel in panels(doc, container) {
        let on = target.is_some() && doc.attr(panel, "id") == target.as_deref();
        doc.set_class(panel, class::IS_ACTIVE, on);
        doc.set_hidden(panel, !on);
    }
}

/// Select `tab` in its group. Emits `tab:change` when the active tab changed.
pub(crate) fn select(cx: &mut Cx<'_>, tab: NodeId) {
    let Some(group) = cx.doc.closest_class(tab, class::TABS) else {
        return;
    };
    if is_disabled(cx.doc, tab) {
        return;
    }
    let previous = active_tab(cx.doc, group);
    apply(cx.doc, group, tab);
    if previous != Some(tab) {
        let mut event = WidgetEvent::new(EventKind::TabChange, tab)
            .with_text(cx.doc.text_content(tab).trim().to_owned());
        if let Some(target) = cx.doc.attr(tab, attr::TAB_TARGET) {
            event = event.with_value(target);
        }
        cx.emit(event);
    }
}

/// Arrow/Home/End navigation among enabled tabs. Returns true if handled.
pub(crate) fn key(cx: &mut Cx<'_>, tab: NodeId, key: &str) -> bool {
    let Some(group) = cx.doc.closest_class(tab, class::TABS) else {
        return false;
    };
    let enabled: Vec<NodeId> = tabs_of(cx.doc, group)
        .into_iter()
        .filter(|t| !is_disabled(cx.doc, *t))
        .collect();
    if enabled.is_empty() {
        return false;
    }
    let at = enabled.iter().position(|t| *t == tab).unwrap_or(0);
    let next = match key {
        "ArrowRight" | "ArrowDown" => (at + 1) % enabled.len(),
        "ArrowLeft" | "ArrowUp" => (at + enabled.len() - 1) % enabled.len(),
        "Home" => 0,
        "End" => enabled.len() - 1,
        _ => return false,
    };
    let next = enabled[next];
    select(cx, next);
    cx.doc.focus(next);
    true
}
