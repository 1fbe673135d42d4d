// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tiltable foreground surface.
//!
//! [`TiltSurface`] wires a [`TiltState`] to an [`Animator`]: every pointer
//! transition retargets the animator at the new raw offset, and the rendered
//! rotation is always derived from the animated value.

use kurbo::{Point, Rect, RoundedRect, Shape, Vec2};
use peniko::Color;

use crate::animate::{Animator, SpringAnimator};
use crate::config::CardConfig;
use crate::pointer::PointerEvent;
use crate::rotation::{RotationAngles, RotationScale, Tilt};
use crate::scene::{Fill, Layer, Scene};
use crate::tilt::{GestureParams, TiltPhase, TiltState};

/// Stacking order of the tilt surface; always above the glow.
pub const SURFACE_Z_INDEX: i32 = 1;

/// Pointer-driven rotating surface.
#[derive(Clone, Debug)]
pub struct TiltSurface<A = SpringAnimator> {
    state: TiltState,
    animator: A,
    bounds: Option<Rect>,
    corner_radius: f64,
    color: Color,
    rotation_scale: RotationScale,
    max_angle: f64,
    camera_distance: f64,
}

impl TiltSurface<SpringAnimator> {
    /// Create a surface animated by the default spring.
    pub fn new(config: &CardConfig) -> Self {
        Self::with_animator(config, SpringAnimator::new())
    }
}

impl<A: Animator> TiltSurface<A> {
    /// Create a surface animated by `animator`.
    ///
    /// The animator is snapped to rest so the surface starts flat.
    pub fn with_animator(config: &CardConfig, mut animator: A) -> Self {
        animator.snap_to(Vec2::ZERO);
        Self {
            state: TiltState::new(GestureParams::from(config)),
            animator,
            bounds: None,
            corner_radius: config.corner_radius,
            color: config.surface_color,
            rotation_scale: config.rotation_scale,
            max_angle: config.max_angle,
            camera_distance: config.camera_distance,
        }
    }

    /// Update the laid-out bounds. `None` (or an empty rectangle) forgets them.
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        let bounds = bounds.filter(|b| b.width() > 0.0 && b.height() > 0.0);
        if bounds != self.bounds {
            tracing::debug!(?bounds, "tilt surface laid out");
        }
        self.bounds = bounds;
        self.state.set_bounds(bounds);
    }

    /// Laid-out bounds, if known.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Clip shape of the surface, if laid out.
    pub fn shape(&self) -> Option<RoundedRect> {
        self.bounds
            .map(|b| RoundedRect::from_rect(b, self.corner_radius))
    }

    /// Returns `true` if `pos` lies within the rounded bounds.
    pub fn hit_test(&self, pos: Point) -> bool {
        self.shape().is_some_and(|shape| shape.contains(pos))
    }

    /// Feed a pointer event. Returns `true` if the surface consumed it.
    ///
    /// A press is captured only inside the surface bounds; once captured,
    /// moves are followed anywhere until release or cancel. A press that
    /// arrives before the first layout is accepted with no tilt.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        let handled = match event {
            PointerEvent::Down(pos) => {
                if self.bounds.is_some() && !self.hit_test(pos) {
                    return false;
                }
                self.state.press(pos);
                true
            }
            PointerEvent::Move(pos) => self.state.move_to(pos),
            PointerEvent::Up(_) => {
                let active = self.state.is_active();
                self.state.release();
                active
            }
            PointerEvent::Cancel => {
                let active = self.state.is_active();
                self.state.cancel();
                active
            }
        };
        self.animator.set_target(self.state.offset());
        handled
    }

    /// Advance the animation by `dt` seconds. Returns `true` while still moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.animator.tick(dt);
        !self.animator.is_settled()
    }

    /// Returns `true` if the animated offset has not reached its target.
    pub fn is_animating(&self) -> bool {
        !self.animator.is_settled()
    }

    /// Gesture phase.
    pub fn phase(&self) -> TiltPhase {
        self.state.phase()
    }

    /// Raw target offset.
    pub fn pointer_offset(&self) -> Vec2 {
        self.state.offset()
    }

    /// Animated offset currently driving the rotation.
    pub fn animated_offset(&self) -> Vec2 {
        self.animator.value()
    }

    /// Rotation derived from the animated offset.
    pub fn rotation(&self) -> RotationAngles {
        RotationAngles::from_offset(self.animator.value(), self.rotation_scale, self.max_angle)
    }

    /// Rotation the surface settles at for the current pointer offset.
    pub fn target_rotation(&self) -> RotationAngles {
        RotationAngles::from_offset(self.state.offset(), self.rotation_scale, self.max_angle)
    }

    /// Tilt transform around the surface center, if laid out.
    pub fn tilt(&self) -> Option<Tilt> {
        self.bounds
            .map(|b| Tilt::new(self.rotation(), b.center(), self.camera_distance))
    }

    /// Borrow the animator.
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Record the surface into `scene`. Returns `false` before layout.
    pub fn paint(&self, scene: &mut Scene) -> bool {
        let (Some(shape), Some(tilt)) = (self.shape(), self.tilt()) else {
            return false;
        };
        let fill = Fill::Solid(self.color);
        scene.with_layer(
            Layer {
                clip: Some(shape),
                tilt: Some(tilt),
                z_index: SURFACE_Z_INDEX,
            },
            |scene| scene.fill_rounded_rect(shape, fill, None),
        );
        true
    }
}
