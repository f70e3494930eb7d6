// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The delegated widget runtime.
//!
//! ## Overview
//!
//! [`Runtime`] holds controller state (open menu, shared overlays, timers,
//! hover path, tree modes) and is driven with a borrowed [`Document`]. Every
//! input event enters at [`Runtime::dispatch`]; the runtime routes it from its
//! origin node outward and hands it to the nearest widget part, so markup
//! inserted at any time works without registration.
//!
//! ## Lazy initialization
//!
//! Widgets that need one-time setup (tree menus, tab groups, accordion ARIA,
//! multi-select chips, select-all state) are initialized by [`Runtime::start`]
//! for the initial page and by [`Runtime::observe`] for inserted subtrees.
//! `dispatch` and `advance` observe first, so pending insertions are always
//! processed before the next event.
//!
//! ## Time
//!
//! Hover intent and grace periods run on the virtual clock of a
//! [`DeferredQueue`](vitrine_responder::deferred::DeferredQueue); hosts call
//! [`Runtime::advance`] with elapsed time.

use core::time::Duration;

use vitrine_dom::{Document, Mutation, NodeId};
use vitrine_place::Viewport;
use vitrine_responder::adapters::dom::hover_path;
use vitrine_responder::dispatcher;
use vitrine_responder::hover::{HoverEvent, HoverState};
use vitrine_responder::router::{Router, closest};
use vitrine_responder::types::{Dispatch, Outcome, Phase};

use crate::config::RuntimeConfig;
use crate::dropdown::{self, MenuKind, Menus};
use crate::event::{ChangeValue, EventKind, InputEvent, Warning, WidgetEvent};
use crate::markers::{Capabilities, CapabilityLookup, capabilities_of, class};
use crate::overlay::{BoundsMeasure, Measure, OverlayKind, SharedOverlay, TimerSlot, Timers};
use crate::popover::{self, PopoverOptions};
use crate::tooltip::{self, TooltipOptions};
use crate::tree_menu::{self, TreeMode, TreeModes};
use crate::{accordion, checkbox_group, chip_dropdown, file_upload, tabs};

/// Borrowed state handed to controllers for one event.
pub(crate) struct Cx<'a> {
    pub(crate) doc: &'a mut Document,
    pub(crate) config: &'a RuntimeConfig,
    events: &'a mut Vec<WidgetEvent>,
}

impl Cx<'_> {
    pub(crate) fn emit(&mut self, event: WidgetEvent) {
        log::debug!("{} on {:?}", event.name(), event.target);
        self.events.push(event);
    }
}

/// Delegated widget runtime.
pub struct Runtime {
    config: RuntimeConfig,
    viewport: Viewport,
    measure: Box<dyn Measure>,
    menus: Menus,
    tooltip: SharedOverlay,
    popover: SharedOverlay,
    timers: Timers,
    hover: HoverState<NodeId>,
    trees: TreeModes,
    events: Vec<WidgetEvent>,
    warnings: Vec<Warning>,
}

impl core::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("menus", &self.menus)
            .field("tooltip", &self.tooltip)
            .field("popover", &self.popover)
            .field("timers", &self.timers.len())
            .field("hover", &self.hover.hovered())
            .field("trees", &self.trees.len())
            .field("events", &self.events.len())
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// A runtime with default configuration.
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// A runtime with explicit configuration.
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            measure: Box::new(BoundsMeasure),
            menus: Menus::default(),
            tooltip: SharedOverlay::new(OverlayKind::Tooltip),
            popover: SharedOverlay::new(OverlayKind::Popover),
            timers: Timers::new(),
            hover: HoverState::new(),
            trees: TreeModes::new(),
            events: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Update viewport size and scroll used for overlay placement.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Replace the overlay measurer.
    pub fn set_measure(&mut self, measure: impl Measure + 'static) {
        self.measure = Box::new(measure);
    }

    /// The open dropdown or chip dropdown.
    pub fn open_menu(&self) -> Option<NodeId> {
        self.menus.open_menu()
    }

    /// The shared tooltip.
    pub fn tooltip(&self) -> &SharedOverlay {
        &self.tooltip
    }

    /// The shared popover.
    pub fn popover(&self) -> &SharedOverlay {
        &self.popover
    }

    /// Mode recorded for an initialized tree.
    pub fn tree_mode(&self, tree: NodeId) -> Option<TreeMode> {
        self.trees.get(&tree).copied()
    }

    /// Pending timer for a slot, as time remaining.
    pub fn pending_timer(&self, slot: TimerSlot) -> Option<Duration> {
        self.timers.remaining(slot)
    }

    /// Drain emitted widget events in emission order.
    pub fn drain_events(&mut self) -> Vec<WidgetEvent> {
        core::mem::take(&mut self.events)
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Initialize every widget in the document and create the overlay surfaces.
    pub fn start(&mut self, doc: &mut Document) {
        let _ = doc.take_mutations();
        self.tooltip.ensure_surface(doc);
        self.popover.ensure_surface(doc);
        let root = doc.root();
        self.init_subtree(doc, root);
        // Surfaces and rebuilt chips are runtime-owned; nothing left to observe.
        let _ = doc.take_mutations();
        log::debug!("runtime started");
    }

    /// Process structural changes since the last call.
    ///
    /// Initialization may itself insert nodes (rebuilt chips, for instance);
    /// those records are drained in the same call.
    pub fn observe(&mut self, doc: &mut Document) {
        let mut removed = false;
        loop {
            let mutations = doc.take_mutations();
            if mutations.is_empty() {
                break;
            }
            for m in mutations {
                match m {
                    Mutation::Inserted(n) if doc.is_connected(n) => self.init_subtree(doc, n),
                    Mutation::Inserted(_) => {}
                    Mutation::Removed(_) => removed = true,
                }
            }
        }
        if removed {
            self.forget_dead(doc);
        }
    }

    fn init_subtree(&mut self, doc: &mut Document, node: NodeId) {
        let mut nodes = vec![node];
        nodes.extend(doc.descendants(node));
        for n in nodes {
            let caps = capabilities_of(doc, n);
            if caps.contains(Capabilities::TREE_MENU) {
                tree_menu::ensure_initialized(doc, n, &mut self.trees, self.config.tree_mode);
            }
            if caps.contains(Capabilities::TABS) {
                tabs::init(doc, n, &mut self.warnings);
            }
            if caps.contains(Capabilities::ACCORDION) {
                accordion::init(doc, n);
            }
            if caps.contains(Capabilities::DROPDOWN) && doc.is_alive(n) {
                dropdown::sync(doc, n);
            }
            if caps.contains(Capabilities::CHECKBOX_GROUP) {
                checkbox_group::sync(doc, n);
            }
        }
    }

    fn forget_dead(&mut self, doc: &mut Document) {
        self.menus.forget_dead(doc);
        self.trees.retain(|tree, _| doc.is_alive(*tree));
        self.hover.retain_alive(|n| doc.is_connected(n));
        for kind in [OverlayKind::Tooltip, OverlayKind::Popover] {
            if let Some(trigger) = self.timers.pending(TimerSlot::Show(kind)).copied()
                && !doc.is_connected(trigger)
            {
                self.timers.cancel(TimerSlot::Show(kind));
            }
            if self.overlay(kind).owner().is_some_and(|o| !doc.is_connected(o)) {
                self.hide_overlay(doc, kind);
            }
        }
    }

    fn overlay(&self, kind: OverlayKind) -> &SharedOverlay {
        match kind {
            OverlayKind::Tooltip => &self.tooltip,
            OverlayKind::Popover => &self.popover,
        }
    }

    fn cx<'a>(
        doc: &'a mut Document,
        config: &'a RuntimeConfig,
        events: &'a mut Vec<WidgetEvent>,
    ) -> Cx<'a> {
        Cx {
            doc,
            config,
            events,
        }
    }

    /// Deliver a platform input event. Returns true if a widget handled it.
    pub fn dispatch(&mut self, doc: &mut Document, event: InputEvent) -> bool {
        self.observe(doc);
        match event {
            InputEvent::PointerMove { target } => {
                self.pointer_move(doc, target);
                false
            }
            InputEvent::PointerDown { target } => {
                let mut cx = Self::cx(doc, &self.config, &mut self.events);
                let was_open = self.menus.open_menu();
                self.menus.pointer_down(&mut cx, target);
                was_open != self.menus.open_menu()
            }
            InputEvent::Click { target } => self.click(doc, target),
            InputEvent::KeyDown { target, key } => self.key_down(doc, target, &key),
            InputEvent::Input { target, value } => self.input(doc, target, &value),
            InputEvent::Change { target, value } => self.change(doc, target, value),
        }
    }

    fn route(doc: &Document, target: NodeId) -> Vec<Dispatch<NodeId, Capabilities>> {
        if !doc.is_alive(target) {
            return Vec::new();
        }
        Router::with_parent(CapabilityLookup(doc), doc).dispatch_for(target)
    }

    fn click(&mut self, doc: &mut Document, target: NodeId) -> bool {
        let seq = Self::route(doc, target);
        {
            let mut cx = Self::cx(doc, &self.config, &mut self.events);
            self.menus.pointer_down(&mut cx, target);
        }
        let mut state = (self, doc);
        dispatcher::run(&seq, &mut state, |(rt, doc), d| rt.click_step(doc, d))
    }

    // Handles one bubble step; the nearest part claims the click.
    fn click_step(&mut self, doc: &mut Document, d: &Dispatch<NodeId, Capabilities>) -> Outcome {
        let (Phase::Bubble, Some(caps)) = (d.phase, d.widget) else {
            return Outcome::Continue;
        };
        let node = d.node;
        let mut cx = Self::cx(doc, &self.config, &mut self.events);
        let root_of = |cx: &Cx<'_>, kind: MenuKind| cx.doc.closest_class(node, kind.root_class());

        if caps.contains(Capabilities::DROPDOWN_CHIP_REMOVE) {
            if let Some(root) = root_of(&cx, MenuKind::Dropdown) {
                dropdown::remove_chip(&mut cx, root, node);
            }
        } else if caps.contains(Capabilities::DROPDOWN_CLEAR) {
            if let Some(root) = root_of(&cx, MenuKind::Dropdown) {
                dropdown::clear(&mut cx, root);
            }
        } else if caps.contains(Capabilities::DROPDOWN_ITEM) {
            if let Some(root) = root_of(&cx, MenuKind::Dropdown) {
                dropdown::activate_item(&mut self.menus, &mut cx, root, node);
            }
        } else if caps.contains(Capabilities::DROPDOWN_SEARCH) {
            // Clicking into the search box must not toggle the menu.
        } else if caps.contains(Capabilities::DROPDOWN_TRIGGER) {
            if let Some(root) = root_of(&cx, MenuKind::Dropdown) {
                self.menus.toggle(&mut cx, root, MenuKind::Dropdown);
            }
        } else if caps.contains(Capabilities::CHIP_DROPDOWN_ITEM) {
            if let Some(root) = root_of(&cx, MenuKind::Chip) {
                chip_dropdown::activate_item(&mut self.menus, &mut cx, root, node);
            }
        } else if caps.contains(Capabilities::CHIP_DROPDOWN_TRIGGER) {
            if let Some(root) = root_of(&cx, MenuKind::Chip) {
                self.menus.toggle(&mut cx, root, MenuKind::Chip);
            }
        } else if caps.contains(Capabilities::POPOVER_CLOSE) {
            if self.popover.surface().is_some_and(|s| doc.contains(s, node)) {
                self.hide_overlay(doc, OverlayKind::Popover);
            }
        } else if caps.intersects(Capabilities::ACCORDION_TOGGLE | Capabilities::ACCORDION_HEADER) {
            accordion::activate(&mut cx, node);
        } else if caps.contains(Capabilities::TAB) {
            tabs::select(&mut cx, node);
        } else if caps.contains(Capabilities::TREE_TOGGLE) {
            tree_menu::activate_toggle(&mut cx, node, &mut self.trees);
        } else if caps.contains(Capabilities::TREE_LINK) {
            tree_menu::activate_link(&mut cx, node, &mut self.trees);
        } else if caps.contains(Capabilities::FILE_UPLOAD_REMOVE) {
            file_upload::remove(&mut cx, node);
        } else {
            return Outcome::Continue;
        }
        Outcome::StopAndConsume
    }

    fn key_down(&mut self, doc: &mut Document, target: NodeId, key: &str) -> bool {
        let seq = Self::route(doc, target);
        let mut cx = Self::cx(doc, &self.config, &mut self.events);
        let hit = closest(&seq, |c| {
            c.intersects(Capabilities::DROPDOWN | Capabilities::CHIP_DROPDOWN | Capabilities::TAB)
        });
        let handled = match hit {
            Some((root, caps)) if caps.contains(Capabilities::DROPDOWN) => {
                dropdown::key(&mut self.menus, &mut cx, root, key)
            }
            Some((root, caps)) if caps.contains(Capabilities::CHIP_DROPDOWN) => {
                chip_dropdown::key(&mut self.menus, &mut cx, root, key)
            }
            Some((tab, _)) => tabs::key(&mut cx, tab, key),
            None => false,
        };
        if handled || key != "Escape" {
            return handled;
        }
        if self.menus.close_current(&mut cx, true) {
            return true;
        }
        if self.popover.is_visible() {
            self.hide_overlay(doc, OverlayKind::Popover);
            return true;
        }
        false
    }

    fn input(&mut self, doc: &mut Document, target: NodeId, value: &str) -> bool {
        if !doc.has_class(target, class::DROPDOWN_SEARCH) {
            return false;
        }
        let Some(root) = doc.closest_class(target, class::DROPDOWN) else {
            return false;
        };
        doc.set_attr(target, "value", value);
        dropdown::filter(doc, root, value);
        true
    }

    fn change(&mut self, doc: &mut Document, target: NodeId, value: ChangeValue) -> bool {
        let caps = capabilities_of(doc, target);
        let mut cx = Self::cx(doc, &self.config, &mut self.events);
        match value {
            ChangeValue::Checked(checked)
                if caps.intersects(Capabilities::CHECKBOX_SELECT_ALL | Capabilities::CHECKBOX_ITEM) =>
            {
                checkbox_group::change(&mut cx, target, checked);
                true
            }
            ChangeValue::Files(files) if caps.contains(Capabilities::FILE_UPLOAD_INPUT) => {
                file_upload::change(&mut cx, target, &files);
                true
            }
            _ => false,
        }
    }

    /// Pointer moved over `target`: derive enter/leave transitions and drive
    /// hover intent for tooltip and popover triggers.
    pub fn pointer_move(&mut self, doc: &mut Document, target: NodeId) {
        let path = hover_path(doc, target);
        let transitions = self.hover.update_path(&path);
        self.hover_transitions(doc, &transitions, Some(target).filter(|t| doc.is_alive(*t)));
    }

    /// Pointer left the document.
    pub fn pointer_exit(&mut self, doc: &mut Document) {
        let transitions = self.hover.clear();
        self.hover_transitions(doc, &transitions, None);
    }

    fn hover_transitions(
        &mut self,
        doc: &Document,
        transitions: &[HoverEvent<NodeId>],
        related: Option<NodeId>,
    ) {
        let grace = self.config.hide_grace;
        for t in transitions {
            let (node, entering) = match *t {
                HoverEvent::Enter(n) => (n, true),
                HoverEvent::Leave(n) => (n, false),
            };
            let caps = capabilities_of(doc, node);
            for (kind, cap) in [
                (OverlayKind::Tooltip, Capabilities::TOOLTIP_TRIGGER),
                (OverlayKind::Popover, Capabilities::POPOVER_TRIGGER),
            ] {
                let overlay = match kind {
                    OverlayKind::Tooltip => &self.tooltip,
                    OverlayKind::Popover => &self.popover,
                };
                if overlay.surface() == Some(node) {
                    if entering {
                        overlay.enter_surface(&mut self.timers);
                    } else {
                        overlay.leave_surface(doc, &mut self.timers, related, grace);
                    }
                } else if caps.contains(cap) {
                    if entering {
                        let delay = match kind {
                            OverlayKind::Tooltip => tooltip::delay(doc, node, &self.config),
                            OverlayKind::Popover => popover::delay(doc, node, &self.config),
                        };
                        overlay.enter_trigger(&mut self.timers, node, delay);
                    } else {
                        overlay.leave_trigger(doc, &mut self.timers, node, related, grace);
                    }
                }
            }
        }
    }

    /// Advance the virtual clock and run due show/hide actions.
    pub fn advance(&mut self, doc: &mut Document, elapsed: Duration) {
        self.observe(doc);
        for (slot, node) in self.timers.advance(elapsed) {
            match slot {
                TimerSlot::Show(kind) if doc.is_connected(node) => self.show_overlay(doc, kind, node),
                TimerSlot::Show(_) => {}
                TimerSlot::Hide(kind) => {
                    if self.overlay(kind).owner() == Some(node) {
                        self.hide_overlay(doc, kind);
                    }
                }
            }
        }
    }

    /// Show the `kind` overlay for `trigger` immediately.
    pub fn show_overlay(&mut self, doc: &mut Document, kind: OverlayKind, trigger: NodeId) {
        let (content, sticky, placement, offset, event) = match kind {
            OverlayKind::Tooltip => {
                let Some(opts) = TooltipOptions::read(doc, trigger, &self.config) else {
                    return;
                };
                let event = WidgetEvent::new(EventKind::TooltipShow, trigger).with_text(&opts.text);
                (opts.markup(), false, opts.placement, opts.offset, event)
            }
            OverlayKind::Popover => {
                let Some(opts) = PopoverOptions::read(doc, trigger, &self.config) else {
                    return;
                };
                let mut event = WidgetEvent::new(EventKind::PopoverShow, trigger);
                if let Some(title) = &opts.title {
                    event = event.with_text(title);
                }
                (opts.markup(), opts.sticky, opts.placement, opts.offset, event)
            }
        };
        let overlay = match kind {
            OverlayKind::Tooltip => &mut self.tooltip,
            OverlayKind::Popover => &mut self.popover,
        };
        let surface = overlay.render(doc, trigger, &content, sticky);
        let size = self
            .measure
            .measure(doc, surface)
            .unwrap_or(self.config.overlay_fallback_size);
        overlay.position(
            doc,
            trigger,
            size,
            placement,
            offset,
            &self.viewport,
            self.config.viewport_margin,
        );
        overlay.reveal(doc);
        self.timers.cancel(TimerSlot::Hide(kind));
        log::debug!("{kind:?} shown for {trigger:?} at {placement}");
        self.events.push(event);
    }

    /// Hide the `kind` overlay immediately.
    pub fn hide_overlay(&mut self, doc: &mut Document, kind: OverlayKind) {
        self.timers.cancel(TimerSlot::Hide(kind));
        let overlay = match kind {
            OverlayKind::Tooltip => &mut self.tooltip,
            OverlayKind::Popover => &mut self.popover,
        };
        if let Some(owner) = overlay.hide(doc)
            && kind == OverlayKind::Popover
        {
            self.events
                .push(WidgetEvent::new(EventKind::PopoverHide, owner));
        }
    }
}
