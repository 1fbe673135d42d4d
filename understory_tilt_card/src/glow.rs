// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The glow behind the card: a rounded rectangle filled with a sweep
//! gradient and a tinted, blurred shadow.

use alloc::vec::Vec;

use kurbo::{Rect, RoundedRect};
use peniko::Color;

use crate::config::CardConfig;
use crate::scene::{Fill, Layer, Scene, Shadow};

/// Stacking order of the glow layer.
pub const GLOW_Z_INDEX: i32 = 0;

/// Stateless glow painter.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowLayer {
    corner_radius: f64,
    colors: Vec<Color>,
    shadow: Shadow,
}

impl GlowLayer {
    /// Capture the glow settings of `config`.
    pub fn new(config: &CardConfig) -> Self {
        if config.gradient_colors.is_empty() {
            tracing::debug!("no gradient colors, glow falls back to a solid fill");
        }
        Self {
            corner_radius: config.glow_corner_radius,
            colors: config.gradient_colors.clone(),
            shadow: Shadow {
                color: config.glow_color,
                offset: config.glow_offset,
                blur_radius: config.glow_radius,
            },
        }
    }

    /// Shadow drawn under the glow shape.
    pub fn shadow(&self) -> Shadow {
        self.shadow
    }

    /// Fill of the glow shape laid out in `bounds`.
    pub fn fill(&self, bounds: Rect) -> Fill {
        Fill::sweep(bounds.center(), &self.colors, self.shadow.color)
    }

    /// Record the glow into `scene`.
    ///
    /// Returns `false`, drawing nothing, when `bounds` has no area.
    pub fn paint(&self, scene: &mut Scene, bounds: Rect) -> bool {
        if !(bounds.width() > 0.0 && bounds.height() > 0.0) {
            return false;
        }
        let shape = RoundedRect::from_rect(bounds, self.corner_radius);
        let fill = self.fill(bounds);
        let shadow = self.shadow;
        scene.with_layer(
            Layer {
                z_index: GLOW_Z_INDEX,
                ..Layer::default()
            },
            |scene| scene.fill_rounded_rect(shape, fill, Some(shadow)),
        );
        true
    }
}
