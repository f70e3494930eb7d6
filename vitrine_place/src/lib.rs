// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Place: overlay placement for tooltips, popovers, and menus.
//!
//! ## Overview
//!
//! Given an anchor rectangle, the measured size of an overlay, one of 12
//! placement codes, an offset, and the viewport metrics, compute the overlay's
//! absolute top-left. The computation is a pure function: a fixed table of
//! formulas produces a nominal position, which is then clamped into the
//! viewport with a 16px margin on every side.
//!
//! ## Placement codes
//!
//! A [`Placement`] is a primary [`Side`] crossed with an [`Align`]ment.
//! Tooltips spell them `top`, `top-start`, `top-end`, `right`, ... and popovers
//! use compass names `n`, `nw`, `ne`, `e`, `en`, `es`, ... Both parse into the
//! same value.
//!
//! ## No side flipping
//!
//! Clamping shifts the overlay along each axis but never moves it to the
//! opposite side of the anchor. When the viewport is too small the overlay may
//! overlap its anchor.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size, Vec2};
//! use vitrine_place::{place, Placement, PlacementRequest, Viewport};
//!
//! let viewport = Viewport::new(Size::new(1024.0, 768.0)).with_scroll(Vec2::new(0.0, 400.0));
//! let req = PlacementRequest {
//!     anchor: Rect::new(10.0, 10.0, 110.0, 40.0),
//!     overlay: Size::new(200.0, 80.0),
//!     placement: Placement::from_compass("n").unwrap(),
//!     offset: 8.0,
//! };
//! let pos = place(&req, &viewport);
//! // The nominal position is above the viewport, so it is clamped to the top margin.
//! assert_eq!(pos.y, 416.0);
//! assert_eq!(pos.x, 16.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod place;
pub mod types;

pub use place::{PlacementRequest, VIEWPORT_MARGIN, clamp_to_viewport, nominal, place};
pub use types::{Align, ParsePlacementError, Placement, Side, Viewport};
