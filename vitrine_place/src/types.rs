// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement vocabulary: sides, alignments, the 12 placement codes, and viewport metrics.

use core::fmt;
use core::str::FromStr;

use kurbo::{Rect, Size, Vec2};

/// Primary side of the anchor the overlay is placed against.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// To the right of the anchor.
    Right,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
}

impl Side {
    /// Whether the side stacks the overlay vertically (top or bottom).
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Alignment of the overlay along the cross axis of its [`Side`].
///
/// For `Top`/`Bottom`, `Start` is the anchor's left edge; for `Left`/`Right`,
/// `Start` is the anchor's top edge.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Align {
    /// Align with the start edge.
    Start,
    /// Center on the anchor.
    Center,
    /// Align with the end edge.
    End,
}

/// One of the 12 discrete placement codes.
///
/// Two spellings are understood:
/// - the tooltip vocabulary (`top`, `top-start`, `right-end`, ...), see [`Placement::code`];
/// - the popover compass vocabulary (`n`, `ne`, `en`, ...), see [`Placement::compass`].
///
/// ```
/// use vitrine_place::{Align, Placement, Side};
///
/// let p: Placement = "bottom-end".parse().unwrap();
/// assert_eq!(p, Placement::new(Side::Bottom, Align::End));
/// assert_eq!(Placement::from_compass("se"), Some(p));
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Placement {
    /// Primary side.
    pub side: Side,
    /// Cross-axis alignment.
    pub align: Align,
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(Side::Top, Align::Center)
    }
}

impl Placement {
    /// Every placement, in table order.
    pub const ALL: [Self; 12] = [
        Self::new(Side::Top, Align::Start),
        Self::new(Side::Top, Align::Center),
        Self::new(Side::Top, Align::End),
        Self::new(Side::Right, Align::Start),
        Self::new(Side::Right, Align::Center),
        Self::new(Side::Right, Align::End),
        Self::new(Side::Bottom, Align::Start),
        Self::new(Side::Bottom, Align::Center),
        Self::new(Side::Bottom, Align::End),
        Self::new(Side::Left, Align::Start),
        Self::new(Side::Left, Align::Center),
        Self::new(Side::Left, Align::End),
    ];

    /// Create a placement.
    pub const fn new(side: Side, align: Align) -> Self {
        Self { side, align }
    }

    /// Tooltip code for this placement, e.g. `"top"` or `"left-end"`.
    pub const fn code(self) -> &'static str {
        match (self.side, self.align) {
            (Side::Top, Align::Start) => "top-start",
            (Side::Top, Align::Center) => "top",
            (Side::Top, Align::End) => "top-end",
            (Side::Right, Align::Start) => "right-start",
            (Side::Right, Align::Center) => "right",
            (Side::Right, Align::End) => "right-end",
            (Side::Bottom, Align::Start) => "bottom-start",
            (Side::Bottom, Align::Center) => "bottom",
            (Side::Bottom, Align::End) => "bottom-end",
            (Side::Left, Align::Start) => "left-start",
            (Side::Left, Align::Center) => "left",
            (Side::Left, Align::End) => "left-end",
        }
    }

    /// Compass name for this placement, e.g. `"n"` or `"ws"`.
    ///
    /// The first letter names the primary side, the second the anchor edge the
    /// overlay lines up with.
    pub const fn compass(self) -> &'static str {
        match (self.side, self.align) {
            (Side::Top, Align::Start) => "nw",
            (Side::Top, Align::Center) => "n",
            (Side::Top, Align::End) => "ne",
            (Side::Right, Align::Start) => "en",
            (Side::Right, Align::Center) => "e",
            (Side::Right, Align::End) => "es",
            (Side::Bottom, Align::Start) => "sw",
            (Side::Bottom, Align::Center) => "s",
            (Side::Bottom, Align::End) => "se",
            (Side::Left, Align::Start) => "wn",
            (Side::Left, Align::Center) => "w",
            (Side::Left, Align::End) => "ws",
        }
    }

    /// Parse a tooltip code. `-center` suffixes are accepted as an alias.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        let (side, align) = match code.split_once('-') {
            Some((side, align)) => (side, align),
            None => (code, "center"),
        };
        let side = match side {
            "top" => Side::Top,
            "right" => Side::Right,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            _ => return None,
        };
        let align = match align {
            "start" => Align::Start,
            "center" => Align::Center,
            "end" => Align::End,
            _ => return None,
        };
        Some(Self::new(side, align))
    }

    /// Parse a compass name.
    pub fn from_compass(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|p| p.compass() == name)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a string is neither a placement code nor a compass name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsePlacementError;

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown placement code")
    }
}

impl core::error::Error for ParsePlacementError {}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    /// Accepts either vocabulary; tooltip codes are tried first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
            .or_else(|| Self::from_compass(s))
            .ok_or(ParsePlacementError)
    }
}

/// Viewport size and scroll position, in document pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Visible size of the viewport.
    pub size: Size,
    /// Current scroll offset of the document.
    pub scroll: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::new(1280.0, 800.0))
    }
}

impl Viewport {
    /// A viewport of the given size at scroll origin.
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            scroll: Vec2::ZERO,
        }
    }

    /// Set the scroll offset.
    pub const fn with_scroll(mut self, scroll: Vec2) -> Self {
        self.scroll = scroll;
        self
    }

    /// The visible region in document coordinates.
    pub fn document_rect(&self) -> Rect {
        Rect::from_origin_size(self.scroll.to_point(), self.size)
    }
}
