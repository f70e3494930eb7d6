// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared singleton overlays and their hover-intent state machine.
//!
//! ## Ownership
//!
//! Each hover category (tooltip, popover) owns one surface element reused by
//! every trigger of that category. At most one trigger owns the surface at a
//! time; showing for a new trigger replaces the content and the owner.
//!
//! ## Timers
//!
//! Show and hide are deferred through a [`DeferredQueue`] with one slot per
//! category and direction. Scheduling into a slot cancels whatever was pending
//! there, so a newer intent always supersedes an older one:
//!
//! - entering a trigger cancels the pending hide and schedules a show;
//! - leaving a trigger cancels its pending show and, unless the pointer moved
//!   into the owner or the surface, schedules a hide after the grace period;
//! - entering the surface cancels the pending hide.
//!
//! Sticky overlays never schedule a hide; they close through an explicit action.

use core::time::Duration;

use kurbo::{Point, Rect, Size};
use vitrine_dom::{Document, NodeId, markup};
use vitrine_place::{Placement, PlacementRequest, Viewport, clamp_to_viewport, nominal};
use vitrine_responder::deferred::DeferredQueue;

use crate::markers::{aria_bool, attr, class};

/// Measures a rendered overlay surface.
///
/// Hosts with a layout engine implement this to report the surface's size
/// after its content was replaced. Returning `None` falls back to
/// [`RuntimeConfig::overlay_fallback_size`](crate::RuntimeConfig::overlay_fallback_size).
pub trait Measure {
    /// Size of `surface` as currently rendered.
    fn measure(&self, doc: &Document, surface: NodeId) -> Option<Size>;
}

/// Reads the surface's current bounds; zero-sized bounds count as unmeasured.
#[derive(Copy, Clone, Debug, Default)]
pub struct BoundsMeasure;

impl Measure for BoundsMeasure {
    fn measure(&self, doc: &Document, surface: NodeId) -> Option<Size> {
        let size = doc.bounds(surface).size();
        (size.width > 0.0 && size.height > 0.0).then_some(size)
    }
}

impl<F: Fn(&Document, NodeId) -> Option<Size>> Measure for F {
    fn measure(&self, doc: &Document, surface: NodeId) -> Option<Size> {
        self(doc, surface)
    }
}

/// Hover overlay categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// The shared tooltip.
    Tooltip,
    /// The shared popover.
    Popover,
}

impl OverlayKind {
    /// Class carried by the surface element.
    pub const fn surface_class(self) -> &'static str {
        match self {
            Self::Tooltip => class::TOOLTIP,
            Self::Popover => class::POPOVER,
        }
    }

    const fn role(self) -> &'static str {
        match self {
            Self::Tooltip => "tooltip",
            Self::Popover => "dialog",
        }
    }
}

/// Deferred-action slots: one show and one hide per category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Pending show; the action is the trigger to show for.
    Show(OverlayKind),
    /// Pending hide; the action is the owner at scheduling time.
    Hide(OverlayKind),
}

/// The runtime's timer queue.
pub type Timers = DeferredQueue<TimerSlot, NodeId>;

/// A shared singleton overlay surface with a single current owner.
#[derive(Clone, Debug)]
pub struct SharedOverlay {
    kind: OverlayKind,
    surface: Option<NodeId>,
    owner: Option<NodeId>,
    visible: bool,
    sticky: bool,
}

impl SharedOverlay {
    /// A category's overlay with no surface yet.
    pub fn new(kind: OverlayKind) -> Self {
        Self {
            kind,
            surface: None,
            owner: None,
            visible: false,
            sticky: false,
        }
    }

    /// Category.
    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    /// Surface element, if created.
    pub fn surface(&self) -> Option<NodeId> {
        self.surface
    }

    /// Trigger currently owning the surface.
    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    /// True while shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True while shown in sticky mode.
    pub fn is_sticky(&self) -> bool {
        self.visible && self.sticky
    }

    /// The surface element, creating it under the root when missing or detached.
    pub fn ensure_surface(&mut self, doc: &mut Document) -> NodeId {
        if let Some(s) = self.surface.filter(|s| doc.is_connected(*s)) {
            return s;
        }
        let s = doc.create_element("div");
        doc.add_class(s, self.kind.surface_class());
        doc.set_attr(s, attr::OVERLAY, self.kind.surface_class());
        doc.set_attr(s, "role", self.kind.role());
        doc.set_attr(s, attr::ARIA_HIDDEN, "true");
        doc.set_hidden(s, true);
        let root = doc.root();
        doc.append_child(root, s);
        log::trace!("created {:?} surface {s:?}", self.kind);
        self.surface = Some(s);
        self.visible = false;
        self.owner = None;
        s
    }

    /// True if `node` lies inside the owner or the surface.
    pub fn covers(&self, doc: &Document, node: Option<NodeId>) -> bool {
        let Some(node) = node else {
            return false;
        };
        self.owner.is_some_and(|o| doc.contains(o, node))
            || self.surface.is_some_and(|s| doc.contains(s, node))
    }

    /// Replace the surface content and record `owner`. The surface stays
    /// hidden until [`SharedOverlay::reveal`].
    ///
    /// The surface bounds are reset, so a size written by an earlier
    /// [`SharedOverlay::position`] is never measured for the new content.
    pub fn render(
        &mut self,
        doc: &mut Document,
        owner: NodeId,
        content: &str,
        sticky: bool,
    ) -> NodeId {
        let surface = self.ensure_surface(doc);
        if let Err(err) = doc.set_inner_markup(surface, content) {
            log::error!("{:?} content for {owner:?} is not valid markup: {err}", self.kind);
            doc.set_text(surface, content);
        }
        doc.set_bounds(surface, Rect::ZERO);
        self.owner = Some(owner);
        self.sticky = sticky;
        surface
    }

    /// Position the surface against `anchor` and return its document-space top-left.
    pub fn position(
        &self,
        doc: &mut Document,
        anchor: NodeId,
        size: Size,
        placement: Placement,
        offset: f64,
        viewport: &Viewport,
        margin: f64,
    ) -> Point {
        let req = PlacementRequest {
            anchor: doc.bounds(anchor),
            overlay: size,
            placement,
            offset,
        };
        let pos = clamp_to_viewport(nominal(&req) + viewport.scroll, size, viewport, margin);
        if let Some(s) = self.surface {
            doc.set_bounds(s, Rect::from_origin_size(pos - viewport.scroll, size));
            doc.set_attr(
                s,
                attr::STYLE,
                &format!("top: {}px; left: {}px;", pos.y, pos.x),
            );
            doc.set_attr(s, attr::PLACEMENT, placement.code());
        }
        pos
    }

    /// Make the surface visible.
    pub fn reveal(&mut self, doc: &mut Document) {
        if let Some(s) = self.surface {
            doc.set_hidden(s, false);
            doc.add_class(s, class::IS_VISIBLE);
            doc.set_attr(s, attr::ARIA_HIDDEN, aria_bool(false));
            self.visible = true;
        }
    }

    /// Hide the surface and release the owner. Returns the previous owner if
    /// the surface was visible.
    pub fn hide(&mut self, doc: &mut Document) -> Option<NodeId> {
        let was = self.visible.then_some(self.owner).flatten();
        if let Some(s) = self.surface {
            doc.remove_class(s, class::IS_VISIBLE);
            doc.set_hidden(s, true);
            doc.set_attr(s, attr::ARIA_HIDDEN, aria_bool(true));
        }
        self.visible = false;
        self.sticky = false;
        self.owner = None;
        was
    }

    /// Pointer entered a trigger of this category.
    pub fn enter_trigger(&self, timers: &mut Timers, trigger: NodeId, delay: Duration) {
        timers.cancel(TimerSlot::Hide(self.kind));
        if self.visible && self.owner == Some(trigger) {
            return;
        }
        timers.schedule(TimerSlot::Show(self.kind), delay, trigger);
    }

    /// Pointer left a trigger of this category toward `related`.
    pub fn leave_trigger(
        &self,
        doc: &Document,
        timers: &mut Timers,
        trigger: NodeId,
        related: Option<NodeId>,
        grace: Duration,
    ) {
        if timers.pending(TimerSlot::Show(self.kind)) == Some(&trigger) {
            timers.cancel(TimerSlot::Show(self.kind));
        }
        self.schedule_hide(doc, timers, related, grace);
    }

    /// Pointer entered the surface.
    pub fn enter_surface(&self, timers: &mut Timers) {
        timers.cancel(TimerSlot::Hide(self.kind));
    }

    /// Pointer left the surface toward `related`.
    pub fn leave_surface(
        &self,
        doc: &Document,
        timers: &mut Timers,
        related: Option<NodeId>,
        grace: Duration,
    ) {
        self.schedule_hide(doc, timers, related, grace);
    }

    fn schedule_hide(
        &self,
        doc: &Document,
        timers: &mut Timers,
        related: Option<NodeId>,
        grace: Duration,
    ) {
        let Some(owner) = self.owner.filter(|_| self.visible && !self.sticky) else {
            return;
        };
        if self.covers(doc, related) {
            return;
        }
        timers.schedule(TimerSlot::Hide(self.kind), grace, owner);
    }
}

/// Escape `s` for use as element text.
pub(crate) fn text(s: &str) -> String {
    markup::escape_text(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_place::{Align, Side};

    const GRACE: Duration = Duration::from_millis(100);

    fn setup() -> (Document, NodeId, NodeId, SharedOverlay) {
        let mut doc = Document::new();
        let root = doc.root();
        let nodes = doc
            .set_inner_markup(
                root,
                r#"<span class="has-tooltip">A</span><span class="has-tooltip">B</span>"#,
            )
            .unwrap();
        let mut overlay = SharedOverlay::new(OverlayKind::Tooltip);
        overlay.ensure_surface(&mut doc);
        (doc, nodes[0], nodes[1], overlay)
    }

    #[test]
    fn rerendering_drops_the_previous_positioned_size() {
        let (mut doc, a, b, mut overlay) = setup();
        doc.set_bounds(a, Rect::new(100.0, 100.0, 140.0, 120.0));
        let surface = overlay.render(&mut doc, a, "a long first tip", false);
        let viewport = Viewport::default();
        overlay.position(
            &mut doc,
            a,
            Size::new(180.0, 30.0),
            Placement::new(Side::Bottom, Align::Start),
            8.0,
            &viewport,
            16.0,
        );
        assert_eq!(BoundsMeasure.measure(&doc, surface), Some(Size::new(180.0, 30.0)));

        overlay.render(&mut doc, b, "b", false);
        assert_eq!(BoundsMeasure.measure(&doc, surface), None);
    }

    #[test]
    fn leaving_before_delay_cancels_show() {
        let (doc, a, _, overlay) = setup();
        let mut timers = Timers::new();
        overlay.enter_trigger(&mut timers, a, Duration::from_millis(200));
        overlay.leave_trigger(&doc, &mut timers, a, Some(doc.root()), GRACE);
        assert!(timers.is_empty());
    }

    #[test]
    fn leaving_into_surface_keeps_overlay() {
        let (mut doc, a, _, mut overlay) = setup();
        let mut timers = Timers::new();
        let surface = overlay.render(&mut doc, a, "tip", false);
        overlay.reveal(&mut doc);
        overlay.leave_trigger(&doc, &mut timers, a, Some(surface), GRACE);
        assert!(timers.pending(TimerSlot::Hide(OverlayKind::Tooltip)).is_none());
        overlay.leave_surface(&doc, &mut timers, Some(doc.root()), GRACE);
        assert_eq!(
            timers.pending(TimerSlot::Hide(OverlayKind::Tooltip)),
            Some(&a)
        );
        overlay.enter_surface(&mut timers);
        assert!(timers.is_empty());
    }

    #[test]
    fn reentering_owner_is_a_no_op() {
        let (mut doc, a, _, mut overlay) = setup();
        let mut timers = Timers::new();
        overlay.render(&mut doc, a, "tip", false);
        overlay.reveal(&mut doc);
        overlay.leave_trigger(&doc, &mut timers, a, Some(doc.root()), GRACE);
        overlay.enter_trigger(&mut timers, a, Duration::from_millis(200));
        assert!(timers.is_empty(), "pending hide cancelled, no new show");
    }

    #[test]
    fn entering_other_trigger_supersedes_hide() {
        let (mut doc, a, b, mut overlay) = setup();
        let mut timers = Timers::new();
        overlay.render(&mut doc, a, "tip", false);
        overlay.reveal(&mut doc);
        overlay.leave_trigger(&doc, &mut timers, a, Some(b), GRACE);
        overlay.enter_trigger(&mut timers, b, Duration::from_millis(200));
        assert!(timers.pending(TimerSlot::Hide(OverlayKind::Tooltip)).is_none());
        assert_eq!(
            timers.pending(TimerSlot::Show(OverlayKind::Tooltip)),
            Some(&b)
        );
    }

    #[test]
    fn sticky_never_schedules_hide() {
        let (mut doc, a, _, mut overlay) = setup();
        let mut timers = Timers::new();
        overlay.render(&mut doc, a, "tip", true);
        overlay.reveal(&mut doc);
        overlay.leave_trigger(&doc, &mut timers, a, Some(doc.root()), GRACE);
        assert!(timers.is_empty());
        assert!(overlay.is_sticky());
    }

    #[test]
    fn hide_releases_owner_and_hides_surface() {
        let (mut doc, a, _, mut overlay) = setup();
        let s = overlay.render(&mut doc, a, "<b>tip</b>", false);
        overlay.reveal(&mut doc);
        assert!(!doc.is_hidden(s));
        assert_eq!(overlay.hide(&mut doc), Some(a));
        assert!(doc.is_hidden(s));
        assert_eq!(overlay.owner(), None);
        assert_eq!(overlay.hide(&mut doc), None);
    }

    #[test]
    fn position_writes_bounds_and_style() {
        let (mut doc, a, _, mut overlay) = setup();
        doc.set_bounds(a, Rect::new(100.0, 100.0, 200.0, 130.0));
        overlay.render(&mut doc, a, "tip", false);
        let vp = Viewport::new(Size::new(800.0, 600.0));
        let pos = overlay.position(
            &mut doc,
            a,
            Size::new(60.0, 20.0),
            Placement::default(),
            8.0,
            &vp,
            16.0,
        );
        assert_eq!((pos.x, pos.y), (120.0, 72.0));
        let s = overlay.surface().unwrap();
        assert_eq!(doc.attr(s, attr::STYLE), Some("top: 72px; left: 120px;"));
        assert_eq!(doc.attr(s, attr::PLACEMENT), Some("top"));
    }
}
