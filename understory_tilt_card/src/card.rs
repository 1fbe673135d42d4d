// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composed card: a glow layer under a tilt surface sharing one box.

use kurbo::Size;

use crate::animate::{Animator, SpringAnimator};
use crate::config::CardConfig;
use crate::glow::GlowLayer;
use crate::layout::CardLayout;
use crate::pointer::PointerEvent;
use crate::rotation::RotationAngles;
use crate::scene::Scene;
use crate::surface::TiltSurface;
use crate::tilt::TiltPhase;

/// A 3D tilt card.
///
/// Drive it from the host loop:
/// - call [`layout`](Self::layout) whenever the available size changes,
/// - forward pointer input to [`pointer_event`](Self::pointer_event),
/// - call [`tick`](Self::tick) every frame while [`needs_animation`](Self::needs_animation),
/// - call [`render`](Self::render) to get the display list for the frame.
///
/// Rendering is a pure function of configuration, layout, and the animated
/// offset.
#[derive(Clone, Debug)]
pub struct TiltCard<A = SpringAnimator> {
    config: CardConfig,
    glow: GlowLayer,
    surface: TiltSurface<A>,
    layout: Option<CardLayout>,
}

impl TiltCard<SpringAnimator> {
    /// Create a card animated by the default spring.
    ///
    /// Invalid configuration values are replaced (see [`CardConfig::sanitized`]).
    pub fn new(config: CardConfig) -> Self {
        Self::with_animator(config, SpringAnimator::new())
    }
}

impl Default for TiltCard<SpringAnimator> {
    fn default() -> Self {
        Self::new(CardConfig::default())
    }
}

impl<A: Animator> TiltCard<A> {
    /// Create a card animated by `animator`.
    pub fn with_animator(config: CardConfig, animator: A) -> Self {
        let config = config.sanitized();
        Self {
            glow: GlowLayer::new(&config),
            surface: TiltSurface::with_animator(&config, animator),
            config,
            layout: None,
        }
    }

    /// Configuration in use, after sanitizing.
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Lay the card out inside `available` and return the result.
    ///
    /// A degenerate layout hides the card and forgets the surface center.
    pub fn layout(&mut self, available: Size) -> CardLayout {
        let layout = CardLayout::compute(available, &self.config);
        if layout.is_degenerate() {
            tracing::debug!(
                width = available.width,
                height = available.height,
                "card layout is empty"
            );
            self.surface.set_bounds(None);
        } else {
            self.surface.set_bounds(Some(layout.surface));
        }
        self.layout = Some(layout);
        layout
    }

    /// Most recent layout, if any.
    pub fn card_layout(&self) -> Option<&CardLayout> {
        self.layout.as_ref()
    }

    /// Forward a pointer event. Returns `true` if the card consumed it.
    pub fn pointer_event(&mut self, event: PointerEvent) -> bool {
        self.surface.handle(event)
    }

    /// Advance animations by `dt` seconds. Returns `true` while still moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.surface.tick(dt)
    }

    /// Returns `true` if another frame is needed to finish animating.
    pub fn needs_animation(&self) -> bool {
        self.surface.is_animating()
    }

    /// Current rendered rotation.
    pub fn rotation(&self) -> RotationAngles {
        self.surface.rotation()
    }

    /// Current gesture phase.
    pub fn phase(&self) -> TiltPhase {
        self.surface.phase()
    }

    /// The tilt surface.
    pub fn surface(&self) -> &TiltSurface<A> {
        &self.surface
    }

    /// The glow layer.
    pub fn glow(&self) -> &GlowLayer {
        &self.glow
    }

    /// Record the card into `scene`: glow first, surface on top.
    ///
    /// Nothing is recorded before layout or when the layout is degenerate.
    pub fn render_into(&self, scene: &mut Scene) {
        let Some(layout) = self.layout.filter(|l| !l.is_degenerate()) else {
            return;
        };
        self.glow.paint(scene, layout.glow);
        self.surface.paint(scene);
    }

    /// Render a fresh scene.
    pub fn render(&self) -> Scene {
        let mut scene = Scene::new();
        self.render_into(&mut scene);
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::CardOp;
    use kurbo::Point;

    #[test]
    fn renders_nothing_before_layout() {
        let card = TiltCard::default();
        assert!(card.render().is_empty());
    }

    #[test]
    fn glow_is_drawn_before_surface() {
        let mut card = TiltCard::default();
        card.layout(Size::new(350.0, 600.0));
        let scene = card.render();
        let z: alloc::vec::Vec<i32> = scene.layers().map(|l| l.z_index).collect();
        assert_eq!(z, [0, 1]);
        assert!(matches!(
            scene.ops()[1],
            CardOp::FillRoundedRect {
                shadow: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn degenerate_layout_hides_card_and_flattens_press() {
        let mut card = TiltCard::default();
        let layout = card.layout(Size::new(30.0, 30.0));
        assert!(layout.is_degenerate());
        assert!(card.render().is_empty());

        assert!(card.pointer_event(PointerEvent::Down(Point::new(10.0, 10.0))));
        assert!(!card.needs_animation());
        assert!(card.rotation().is_flat());
    }

    #[test]
    fn config_is_sanitized() {
        let card = TiltCard::new(CardConfig::default().with_slow_down_factor(0.0));
        assert!(card.config().slow_down_factor > 0.0);
        assert_eq!(card.config().validate(), Ok(()));
    }
}
