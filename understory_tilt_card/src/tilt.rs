// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tilt gesture state: turn pointer presses and drags into a target offset.
//!
//! ## Usage
//!
//! 1) Report the surface bounds with [`TiltState::set_bounds`] after every layout pass.
//! 2) Call [`TiltState::press`] on pointer down.
//! 3) Call [`TiltState::move_to`] on every pointer move while held.
//! 4) Call [`TiltState::release`] (or [`TiltState::cancel`]) to return to rest.
//!
//! Every transition fully reassigns [`TiltState::offset`], so a new press in
//! the middle of a previous gesture cannot leave a stale target behind.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use understory_tilt_card::{GestureParams, TiltPhase, TiltState};
//!
//! let mut tilt = TiltState::new(GestureParams::default());
//! tilt.set_bounds(Some(Rect::new(0.0, 0.0, 200.0, 200.0)));
//!
//! tilt.press(Point::new(130.0, 160.0));
//! assert_eq!(tilt.phase(), TiltPhase::Pressed);
//! assert!((tilt.offset() - Vec2::new(1.0, 2.0)).hypot() < 1e-9);
//!
//! tilt.release();
//! assert_eq!(tilt.phase(), TiltPhase::Idle);
//! assert_eq!(tilt.offset(), Vec2::ZERO);
//! ```

use kurbo::{Point, Rect, Vec2};

use crate::config::{CardConfig, DEFAULT_SLOW_DOWN_FACTOR, MIN_SLOW_DOWN_FACTOR};

/// Where a tilt gesture currently is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TiltPhase {
    /// No pointer is held.
    #[default]
    Idle,
    /// A pointer went down and has not moved yet.
    Pressed,
    /// A pointer is moving while held.
    Dragging,
}

/// How the first move of a drag is turned into an offset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragStartMode {
    /// Adjust the drag-start position like every other sample.
    #[default]
    Adjusted,
    /// Store the drag-start position unadjusted, relative to the surface
    /// origin. The surface jumps toward the clamp for one sample before the
    /// next move corrects it.
    Raw,
}

/// Parameters of the gesture mapping.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureParams {
    /// Divisor applied to the offset from the center.
    pub slow_down_factor: f64,
    /// Handling of the first drag sample.
    pub drag_start: DragStartMode,
    /// Travel from the press position required before a move starts a drag.
    pub drag_slop: f64,
}

impl Default for GestureParams {
    fn default() -> Self {
        Self {
            slow_down_factor: DEFAULT_SLOW_DOWN_FACTOR,
            drag_start: DragStartMode::Adjusted,
            drag_slop: 0.0,
        }
    }
}

impl From<&CardConfig> for GestureParams {
    fn from(config: &CardConfig) -> Self {
        Self {
            slow_down_factor: config.slow_down_factor,
            drag_start: config.drag_start,
            drag_slop: config.drag_slop,
        }
    }
}

/// Offset of `pos` from `center`, divided by `slow_down_factor`.
///
/// Non-positive or NaN divisors are raised to [`MIN_SLOW_DOWN_FACTOR`].
pub fn adjust_offset(pos: Point, center: Point, slow_down_factor: f64) -> Vec2 {
    (pos - center) / slow_down_factor.max(MIN_SLOW_DOWN_FACTOR)
}

/// Pointer-driven tilt target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TiltState {
    params: GestureParams,
    bounds: Option<Rect>,
    phase: TiltPhase,
    press_pos: Option<Point>,
    offset: Vec2,
}

impl TiltState {
    /// Create an idle state with no known center.
    pub fn new(params: GestureParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Gesture parameters in use.
    pub fn params(&self) -> GestureParams {
        self.params
    }

    /// Record the surface bounds of the most recent layout, or forget them.
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    /// Most recent surface bounds, if any.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Center of the most recent surface bounds, if any.
    pub fn center(&self) -> Option<Point> {
        self.bounds.map(|b| b.center())
    }

    /// Current phase.
    pub fn phase(&self) -> TiltPhase {
        self.phase
    }

    /// Current raw target offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Adjusted offset of `pos` against the current center.
    ///
    /// Without a center there is nothing to tilt against, so this is zero.
    pub fn adjust(&self, pos: Point) -> Vec2 {
        match self.center() {
            Some(center) => adjust_offset(pos, center, self.params.slow_down_factor),
            None => Vec2::ZERO,
        }
    }

    /// `pos` relative to the surface origin, or zero without bounds.
    fn local(&self, pos: Point) -> Vec2 {
        self.bounds.map_or(Vec2::ZERO, |b| pos - b.origin())
    }

    /// Pointer down at `pos`. Restarts any gesture in progress.
    pub fn press(&mut self, pos: Point) {
        if self.bounds.is_none() {
            tracing::warn!(x = pos.x, y = pos.y, "press before layout, not tilting");
        }
        self.offset = self.adjust(pos);
        self.phase = TiltPhase::Pressed;
        self.press_pos = Some(pos);
        tracing::debug!(x = self.offset.x, y = self.offset.y, "tilt pressed");
    }

    /// Pointer moved to `pos` while held.
    ///
    /// Returns `true` if the move belongs to the current gesture. Moves while
    /// idle are ignored. While pressed, moves within the drag slop keep the
    /// press offset.
    pub fn move_to(&mut self, pos: Point) -> bool {
        match self.phase {
            TiltPhase::Idle => false,
            TiltPhase::Pressed => {
                if let Some(start) = self.press_pos
                    && self.params.drag_slop > 0.0
                    && (pos - start).hypot() < self.params.drag_slop
                {
                    return true;
                }
                self.offset = match self.params.drag_start {
                    DragStartMode::Adjusted => self.adjust(pos),
                    DragStartMode::Raw => self.local(pos),
                };
                self.phase = TiltPhase::Dragging;
                tracing::debug!(x = self.offset.x, y = self.offset.y, "tilt drag started");
                true
            }
            TiltPhase::Dragging => {
                self.offset = self.adjust(pos);
                true
            }
        }
    }

    /// Pointer released. Returns the surface to rest; repeated calls are no-ops.
    pub fn release(&mut self) {
        self.reset("tilt released");
    }

    /// Gesture cancelled by the host. Same effect as [`release`](Self::release).
    pub fn cancel(&mut self) {
        self.reset("tilt cancelled");
    }

    /// Returns `true` while a pointer is held.
    pub fn is_active(&self) -> bool {
        self.phase != TiltPhase::Idle
    }

    fn reset(&mut self, reason: &'static str) {
        if self.is_active() {
            tracing::debug!("{reason}");
        }
        self.phase = TiltPhase::Idle;
        self.press_pos = None;
        self.offset = Vec2::ZERO;
    }
}
