// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small display list produced by rendering a card.
//!
//! A [`Scene`] is an ordered list of [`CardOp`]s. Layers are pushed and
//! popped in pairs; each layer may carry a rounded-rect clip and a
//! [`Tilt`] that backends apply to everything drawn inside it. Later ops
//! draw over earlier ones.
//!
//! The list only covers what the card draws (see `understory_tilt_card_svg`
//! for a backend). [`Fill::to_brush`] bridges to `peniko` for backends that
//! already speak it.

use alloc::vec::Vec;
use core::f64::consts::TAU;

use kurbo::{Point, RoundedRect, Vec2};
use peniko::{Brush, Color, ColorStop, Extend, Gradient, GradientKind, SweepGradientPosition};

use crate::rotation::Tilt;

/// Paint used to fill a shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    /// A single color.
    Solid(Color),
    /// A sweep (conic) gradient around `center`, with `colors` spread evenly
    /// from angle `0` (the positive X axis) clockwise to a full turn.
    Sweep {
        /// Center of the sweep.
        center: Point,
        /// Gradient colors. Fewer than two paint as a solid color, transparent
        /// when empty.
        colors: Vec<Color>,
    },
}

impl Fill {
    /// Build a sweep fill, degrading to a solid fill for fewer than two colors.
    ///
    /// An empty list uses `fallback`.
    pub fn sweep(center: Point, colors: &[Color], fallback: Color) -> Self {
        match colors {
            [] => Self::Solid(fallback),
            [only] => Self::Solid(*only),
            _ => Self::Sweep {
                center,
                colors: colors.to_vec(),
            },
        }
    }

    /// Color of this fill along the ray at `angle` radians from its center.
    pub fn color_at(&self, angle: f64) -> Color {
        match self {
            Self::Solid(color) => *color,
            Self::Sweep { colors, .. } => {
                let wrapped = angle % TAU;
                let wrapped = if wrapped < 0.0 { wrapped + TAU } else { wrapped };
                sample_stops(colors, wrapped / TAU)
            }
        }
    }

    /// Equivalent `peniko` brush.
    pub fn to_brush(&self) -> Brush {
        match self {
            Self::Solid(color) => Brush::Solid(*color),
            Self::Sweep { colors, .. } if colors.is_empty() => Brush::Solid(Color::TRANSPARENT),
            Self::Sweep { colors, .. } if colors.len() == 1 => Brush::Solid(colors[0]),
            Self::Sweep { center, colors } => {
                let last = (colors.len() - 1) as f32;
                let stops: Vec<ColorStop> = colors
                    .iter()
                    .enumerate()
                    .map(|(i, color)| ColorStop::from((i as f32 / last, *color)))
                    .collect();
                let kind = GradientKind::Sweep(SweepGradientPosition::new(
                    (center.x, center.y),
                    0.0_f32,
                    core::f32::consts::TAU,
                ));
                Brush::Gradient(Gradient {
                    kind,
                    extend: Extend::Pad,
                    stops: stops.as_slice().into(),
                    ..Gradient::default()
                })
            }
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "gradient interpolation happens in f32 color space"
)]
fn sample_stops(colors: &[Color], t: f64) -> Color {
    match colors {
        [] => Color::TRANSPARENT,
        [only] => *only,
        _ => {
            let scaled = t.clamp(0.0, 1.0) * (colors.len() - 1) as f64;
            let index = (scaled as usize).min(colors.len() - 2);
            let frac = (scaled - index as f64) as f32;
            let a = colors[index].components;
            let b = colors[index + 1].components;
            Color::new([
                a[0] + (b[0] - a[0]) * frac,
                a[1] + (b[1] - a[1]) * frac,
                a[2] + (b[2] - a[2]) * frac,
                a[3] + (b[3] - a[3]) * frac,
            ])
        }
    }
}

/// A blurred, tinted copy of a shape drawn beneath it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shadow {
    /// Tint of the shadow.
    pub color: Color,
    /// Displacement of the shadow from the shape.
    pub offset: Vec2,
    /// Blur radius.
    pub blur_radius: f64,
}

impl Shadow {
    /// Gaussian standard deviation matching [`blur_radius`](Self::blur_radius).
    ///
    /// Uses the conventional `0.57735 · r + 0.5` conversion; a zero radius is
    /// a hard shadow.
    pub fn sigma(&self) -> f64 {
        if self.blur_radius > 0.0 {
            0.577_35 * self.blur_radius + 0.5
        } else {
            0.0
        }
    }
}

/// Properties of a pushed layer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Layer {
    /// Clip applied to the layer content, in card-local coordinates before tilting.
    pub clip: Option<RoundedRect>,
    /// Rotation applied to the layer content.
    pub tilt: Option<Tilt>,
    /// Stacking order relative to sibling layers; higher draws on top.
    pub z_index: i32,
}

/// A display-list operation.
#[derive(Clone, Debug, PartialEq)]
pub enum CardOp {
    /// Begin a layer. Must be balanced by [`CardOp::PopLayer`].
    PushLayer(Layer),
    /// End the innermost layer.
    PopLayer,
    /// Fill a rounded rectangle, optionally with a shadow beneath it.
    FillRoundedRect {
        /// Shape to fill.
        shape: RoundedRect,
        /// Paint of the shape.
        fill: Fill,
        /// Shadow drawn under the shape.
        shadow: Option<Shadow>,
    },
}

/// An ordered list of [`CardOp`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    ops: Vec<CardOp>,
    depth: usize,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations.
    pub fn ops(&self) -> &[CardOp] {
        &self.ops
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Drop all operations.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.depth = 0;
    }

    /// Begin a layer.
    pub fn push_layer(&mut self, layer: Layer) {
        self.depth += 1;
        self.ops.push(CardOp::PushLayer(layer));
    }

    /// End the innermost layer. Unbalanced pops are dropped.
    pub fn pop_layer(&mut self) {
        if self.depth == 0 {
            debug_assert!(false, "pop_layer without a matching push_layer");
            return;
        }
        self.depth -= 1;
        self.ops.push(CardOp::PopLayer);
    }

    /// Run `f` inside a layer.
    pub fn with_layer(&mut self, layer: Layer, f: impl FnOnce(&mut Self)) {
        self.push_layer(layer);
        f(self);
        self.pop_layer();
    }

    /// Fill a rounded rectangle.
    pub fn fill_rounded_rect(&mut self, shape: RoundedRect, fill: Fill, shadow: Option<Shadow>) {
        self.ops.push(CardOp::FillRoundedRect {
            shape,
            fill,
            shadow,
        });
    }

    /// Layers in the order they are drawn.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.ops.iter().filter_map(|op| match op {
            CardOp::PushLayer(layer) => Some(layer),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    const RED: Color = Color::from_rgba8(255, 0, 0, 255);
    const BLUE: Color = Color::from_rgba8(0, 0, 255, 255);

    #[test]
    fn sweep_degrades_for_short_lists() {
        assert_eq!(Fill::sweep(Point::ZERO, &[], BLUE), Fill::Solid(BLUE));
        assert_eq!(Fill::sweep(Point::ZERO, &[RED], BLUE), Fill::Solid(RED));
        assert!(matches!(
            Fill::sweep(Point::ZERO, &[RED, BLUE], BLUE),
            Fill::Sweep { .. }
        ));
    }

    #[test]
    fn sweep_color_interpolates_by_angle() {
        let fill = Fill::sweep(Point::ZERO, &[RED, BLUE], RED);
        assert_eq!(fill.color_at(0.0), RED);
        let half = fill.color_at(TAU / 2.0).components;
        assert!((half[0] - 0.5).abs() < 1e-6);
        assert!((half[2] - 0.5).abs() < 1e-6);
        // Negative angles wrap around.
        assert_eq!(fill.color_at(-TAU), RED);
    }

    #[test]
    fn brush_matches_fill_kind() {
        assert_eq!(Fill::Solid(RED).to_brush(), Brush::Solid(RED));
        let Brush::Gradient(gradient) = Fill::sweep(Point::new(5.0, 5.0), &[RED, BLUE, RED], RED)
            .to_brush()
        else {
            panic!("sweep fill must produce a gradient brush");
        };
        assert!(matches!(gradient.kind, GradientKind::Sweep(_)));
        assert_eq!(gradient.stops.len(), 3);
    }

    #[test]
    fn short_sweep_brush_is_solid() {
        let empty = Fill::Sweep {
            center: Point::ZERO,
            colors: Vec::new(),
        };
        assert_eq!(empty.to_brush(), Brush::Solid(Color::TRANSPARENT));
        assert_eq!(empty.color_at(1.0), Color::TRANSPARENT);

        let single = Fill::Sweep {
            center: Point::ZERO,
            colors: alloc::vec![RED],
        };
        assert_eq!(single.to_brush(), Brush::Solid(RED));
        assert_eq!(single.color_at(2.0), RED);
    }

    #[test]
    fn shadow_sigma_follows_radius() {
        let shadow = Shadow {
            color: RED,
            offset: Vec2::ZERO,
            blur_radius: 16.0,
        };
        assert!((shadow.sigma() - 9.7376).abs() < 1e-9);
        let hard = Shadow {
            blur_radius: 0.0,
            ..shadow
        };
        assert_eq!(hard.sigma(), 0.0);
    }

    #[test]
    fn layers_are_balanced() {
        let mut scene = Scene::new();
        scene.with_layer(Layer::default(), |scene| {
            scene.fill_rounded_rect(
                RoundedRect::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0),
                Fill::Solid(RED),
                None,
            );
        });
        assert_eq!(scene.ops().len(), 3);
        assert!(matches!(scene.ops()[0], CardOp::PushLayer(_)));
        assert!(matches!(scene.ops()[2], CardOp::PopLayer));
        assert_eq!(scene.layers().count(), 1);

        scene.clear();
        assert!(scene.is_empty());
    }
}
