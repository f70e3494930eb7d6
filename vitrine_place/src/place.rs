// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement math: nominal position per code, then viewport clamping.
//!
//! ## Coordinates
//!
//! The anchor rectangle is in client (viewport) coordinates, as a layout pass
//! would report it. The returned position is in document coordinates: the
//! nominal client position shifted by the viewport's scroll offset.
//!
//! ## Clamping
//!
//! After the nominal position is computed, each axis is clamped into the
//! visible region shrunk by [`VIEWPORT_MARGIN`]. The far edge is clamped first
//! and the near edge last, so an overlay larger than the viewport keeps its
//! start edge at the margin. The primary side is never flipped; at extreme
//! edges the overlay may overlap its anchor.

use kurbo::{Point, Rect, Size};

use crate::types::{Align, Placement, Side, Viewport};

/// Margin kept between an overlay and every viewport edge.
pub const VIEWPORT_MARGIN: f64 = 16.0;

/// Inputs for a single placement computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    /// Anchor rectangle in client coordinates.
    pub anchor: Rect,
    /// Measured overlay size.
    pub overlay: Size,
    /// Requested placement code.
    pub placement: Placement,
    /// Gap between anchor and overlay along the primary axis.
    pub offset: f64,
}

/// Nominal top-left of the overlay in client coordinates, before clamping.
///
/// One formula per placement code:
///
/// | side   | primary axis              | start      | center              | end             |
/// |--------|---------------------------|------------|---------------------|-----------------|
/// | top    | `y = a.y0 - o.h - offset` | `x = a.x0` | `x = a.cx - o.w/2`  | `x = a.x1 - o.w`|
/// | bottom | `y = a.y1 + offset`       | `x = a.x0` | `x = a.cx - o.w/2`  | `x = a.x1 - o.w`|
/// | left   | `x = a.x0 - o.w - offset` | `y = a.y0` | `y = a.cy - o.h/2`  | `y = a.y1 - o.h`|
/// | right  | `x = a.x1 + offset`       | `y = a.y0` | `y = a.cy - o.h/2`  | `y = a.y1 - o.h`|
pub fn nominal(req: &PlacementRequest) -> Point {
    let a = req.anchor;
    let o = req.overlay;
    let d = req.offset;
    let center = a.center();
    let cross_x = match req.placement.align {
        Align::Start => a.x0,
        Align::Center => center.x - o.width / 2.0,
        Align::End => a.x1 - o.width,
    };
    let cross_y = match req.placement.align {
        Align::Start => a.y0,
        Align::Center => center.y - o.height / 2.0,
        Align::End => a.y1 - o.height,
    };
    match req.placement.side {
        Side::Top => Point::new(cross_x, a.y0 - o.height - d),
        Side::Bottom => Point::new(cross_x, a.y1 + d),
        Side::Left => Point::new(a.x0 - o.width - d, cross_y),
        Side::Right => Point::new(a.x1 + d, cross_y),
    }
}

/// Clamp a document-space top-left so the overlay stays inside the viewport.
pub fn clamp_to_viewport(pos: Point, overlay: Size, viewport: &Viewport, margin: f64) -> Point {
    let visible = viewport.document_rect();
    Point::new(
        clamp_axis(pos.x, overlay.width, visible.x0, visible.x1, margin),
        clamp_axis(pos.y, overlay.height, visible.y0, visible.y1, margin),
    )
}

fn clamp_axis(start: f64, extent: f64, lo: f64, hi: f64, margin: f64) -> f64 {
    let mut v = start;
    if v + extent > hi - margin {
        v = hi - margin - extent;
    }
    if v < lo + margin {
        v = lo + margin;
    }
    v
}

/// Compute the final document-space top-left for an overlay.
///
/// ```
/// use kurbo::{Rect, Size};
/// use vitrine_place::{place, Placement, PlacementRequest, Viewport};
///
/// let req = PlacementRequest {
///     anchor: Rect::new(100.0, 100.0, 200.0, 130.0),
///     overlay: Size::new(60.0, 20.0),
///     placement: "top".parse().unwrap(),
///     offset: 8.0,
/// };
/// let pos = place(&req, &Viewport::new(Size::new(800.0, 600.0)));
/// assert_eq!((pos.x, pos.y), (120.0, 72.0));
/// ```
pub fn place(req: &PlacementRequest, viewport: &Viewport) -> Point {
    let pos = nominal(req) + viewport.scroll;
    clamp_to_viewport(pos, req.overlay, viewport, VIEWPORT_MARGIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn req(placement: Placement, anchor: Rect, overlay: Size) -> PlacementRequest {
        PlacementRequest {
            anchor,
            overlay,
            placement,
            offset: 8.0,
        }
    }

    // Anchor sits in the middle of a large viewport so no clamping applies.
    #[test]
    fn nominal_table_matches_formulas() {
        let anchor = Rect::new(400.0, 300.0, 500.0, 340.0);
        let overlay = Size::new(60.0, 20.0);
        let vp = Viewport::new(Size::new(1000.0, 800.0));
        let expect = [
            ("top-start", 400.0, 272.0),
            ("top", 420.0, 272.0),
            ("top-end", 440.0, 272.0),
            ("right-start", 508.0, 300.0),
            ("right", 508.0, 310.0),
            ("right-end", 508.0, 320.0),
            ("bottom-start", 400.0, 348.0),
            ("bottom", 420.0, 348.0),
            ("bottom-end", 440.0, 348.0),
            ("left-start", 332.0, 300.0),
            ("left", 332.0, 310.0),
            ("left-end", 332.0, 320.0),
        ];
        for (code, x, y) in expect {
            let p = Placement::from_code(code).unwrap();
            let got = place(&req(p, anchor, overlay), &vp);
            assert_eq!((got.x, got.y), (x, y), "placement {code}");
        }
    }

    #[test]
    fn scroll_offsets_result_into_document_space() {
        let anchor = Rect::new(400.0, 300.0, 500.0, 340.0);
        let vp = Viewport::new(Size::new(1000.0, 800.0)).with_scroll(Vec2::new(0.0, 1200.0));
        let got = place(
            &req(Placement::default(), anchor, Size::new(60.0, 20.0)),
            &vp,
        );
        assert_eq!((got.x, got.y), (420.0, 1472.0));
    }

    #[test]
    fn clamps_without_flipping_side() {
        // Anchor at the very top: a top placement would go above the viewport.
        let anchor = Rect::new(0.0, 0.0, 40.0, 20.0);
        let vp = Viewport::new(Size::new(300.0, 300.0));
        let got = place(
            &req(Placement::default(), anchor, Size::new(100.0, 30.0)),
            &vp,
        );
        // Shifted along both axes to the margin; still "top" (overlaps anchor).
        assert_eq!((got.x, got.y), (16.0, 16.0));
    }

    #[test]
    fn far_edge_clamp() {
        let anchor = Rect::new(280.0, 280.0, 300.0, 300.0);
        let vp = Viewport::new(Size::new(300.0, 300.0));
        let got = place(
            &req(
                Placement::from_code("bottom-start").unwrap(),
                anchor,
                Size::new(50.0, 40.0),
            ),
            &vp,
        );
        assert_eq!((got.x, got.y), (234.0, 244.0));
    }

    #[test]
    fn oversized_overlay_keeps_start_edge_at_margin() {
        let anchor = Rect::new(50.0, 50.0, 60.0, 60.0);
        let vp = Viewport::new(Size::new(200.0, 200.0));
        let got = place(
            &req(Placement::default(), anchor, Size::new(500.0, 10.0)),
            &vp,
        );
        assert_eq!(got.x, 16.0);
    }

    // Exhaustive sweep: 12 codes x anchors along every edge and corner.
    #[test]
    fn every_code_stays_inside_margins() {
        let vp = Viewport::new(Size::new(640.0, 480.0)).with_scroll(Vec2::new(30.0, 900.0));
        let overlays = [Size::new(10.0, 10.0), Size::new(120.0, 48.0), Size::new(300.0, 200.0)];
        let xs = [-50.0, 0.0, 5.0, 320.0, 600.0, 640.0, 700.0];
        let ys = [-50.0, 0.0, 5.0, 240.0, 460.0, 480.0, 530.0];
        for p in Placement::ALL {
            for overlay in overlays {
                for x in xs {
                    for y in ys {
                        let anchor = Rect::new(x, y, x + 40.0, y + 24.0);
                        let pos = place(&req(p, anchor, overlay), &vp);
                        let r = Rect::from_origin_size(pos, overlay);
                        let vis = vp.document_rect();
                        assert!(r.x0 >= vis.x0 + VIEWPORT_MARGIN, "{p} left edge");
                        assert!(r.x1 <= vis.x1 - VIEWPORT_MARGIN, "{p} right edge");
                        assert!(r.y0 >= vis.y0 + VIEWPORT_MARGIN, "{p} top edge");
                        assert!(r.y1 <= vis.y1 - VIEWPORT_MARGIN, "{p} bottom edge");
                    }
                }
            }
        }
    }
}
