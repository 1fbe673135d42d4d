// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card box layout.
//!
//! The card fills the available width at its aspect ratio, falling back to
//! filling the height when the result would not fit, and is centered in the
//! available area. Both layers share that box: the glow is inset by the card
//! padding and the tilt surface sits a little further in.

use kurbo::{Point, Rect, Size};

use crate::config::CardConfig;

/// Boxes of one layout pass, in card-local coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CardLayout {
    /// The aspect-ratio box, including padding.
    pub card: Rect,
    /// Bounds of the glow layer.
    pub glow: Rect,
    /// Bounds of the tilt surface.
    pub surface: Rect,
}

impl CardLayout {
    /// Lay out a card inside `available`.
    pub fn compute(available: Size, config: &CardConfig) -> Self {
        let card = fit_aspect(available, config.aspect_ratio);
        let glow = shrink(card, config.card_padding);
        let surface = shrink(glow, config.surface_inset);
        Self {
            card,
            glow,
            surface,
        }
    }

    /// Returns `true` when the glow box has no area, so nothing can be drawn.
    pub fn is_degenerate(&self) -> bool {
        is_empty(self.glow)
    }

    /// Center of the tilt surface, or `None` when the surface has no area.
    pub fn surface_center(&self) -> Option<Point> {
        (!is_empty(self.surface)).then(|| self.surface.center())
    }
}

fn fit_aspect(available: Size, aspect_ratio: f64) -> Rect {
    let (w, h) = (available.width, available.height);
    if !(w.is_finite() && w > 0.0) || h.is_nan() || h <= 0.0 {
        return Rect::ZERO;
    }
    let aspect = if aspect_ratio.is_finite() {
        aspect_ratio.max(1.0)
    } else {
        1.0
    };
    let mut size = Size::new(w, w / aspect);
    if size.height > h {
        size = Size::new(h * aspect, h);
    }
    let origin = Point::new((w - size.width) / 2.0, (h - size.height) / 2.0);
    // An unbounded height leaves the card at the top.
    let origin = if origin.y.is_finite() {
        origin
    } else {
        Point::new(origin.x, 0.0)
    };
    Rect::from_origin_size(origin, size)
}

fn shrink(rect: Rect, by: f64) -> Rect {
    Rect::new(rect.x0 + by, rect.y0 + by, rect.x1 - by, rect.y1 - by)
}

fn is_empty(rect: Rect) -> bool {
    !(rect.width() > 0.0 && rect.height() > 0.0)
}
