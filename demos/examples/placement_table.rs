// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where each placement code puts an overlay.
//!
//! Prints the nominal and clamped top-left for every code, once for an anchor
//! in the middle of the viewport and once for an anchor hugging its top-left
//! corner, where clamping takes over.
//!
//! Run:
//! - `cargo run -p vitrine_demos --example placement_table`

use kurbo::{Rect, Size, Vec2};
use vitrine_place::{Placement, PlacementRequest, Viewport, nominal, place};

fn table(title: &str, anchor: Rect, viewport: &Viewport) {
    println!("{title}: anchor {anchor:?}");
    println!("  {:<14} {:<6} {:>18} {:>18}", "code", "compass", "nominal", "placed");
    for placement in Placement::ALL {
        let req = PlacementRequest {
            anchor,
            overlay: Size::new(160.0, 48.0),
            placement,
            offset: 8.0,
        };
        let n = nominal(&req) + viewport.scroll;
        let p = place(&req, viewport);
        println!(
            "  {:<14} {:<6} {:>8.1},{:>8.1} {:>8.1},{:>8.1}",
            placement.code(),
            placement.compass(),
            n.x,
            n.y,
            p.x,
            p.y
        );
    }
    println!();
}

fn main() {
    let viewport = Viewport::new(Size::new(1024.0, 768.0)).with_scroll(Vec2::new(0.0, 200.0));
    table("centered", Rect::new(460.0, 360.0, 560.0, 392.0), &viewport);
    table("corner", Rect::new(0.0, 0.0, 40.0, 24.0), &viewport);
}
