// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration for a tilt card.
//!
//! [`CardConfig`] is a plain struct: every field is public and has a
//! sensible default. Builders (`with_*`) are provided for
//! chaining. Values that would break the pointer math (a zero slow-down
//! divisor, an aspect ratio below one, ...) are reported by
//! [`CardConfig::validate`] and repaired by [`CardConfig::sanitized`].

use alloc::vec::Vec;
use core::fmt;

use kurbo::Vec2;
use peniko::Color;

use crate::rotation::RotationScale;
use crate::tilt::DragStartMode;

/// Default pointer-offset divisor.
pub const DEFAULT_SLOW_DOWN_FACTOR: f64 = 30.0;
/// Smallest slow-down divisor accepted after sanitizing.
pub const MIN_SLOW_DOWN_FACTOR: f64 = 1e-3;
/// Default width:height ratio of the card box.
pub const DEFAULT_ASPECT_RATIO: f64 = 1.75;
/// Default corner radius of both the glow shape and the surface clip.
pub const DEFAULT_CORNER_RADIUS: f64 = 16.0;
/// Default blur radius of the glow.
pub const DEFAULT_GLOW_RADIUS: f64 = 16.0;
/// Default rotation clamp, in degrees.
pub const DEFAULT_MAX_ANGLE: f64 = 20.0;
/// Default inset between the card box and the glow layer.
pub const DEFAULT_CARD_PADDING: f64 = 20.0;
/// Default extra inset of the tilt surface inside the glow box.
pub const DEFAULT_SURFACE_INSET: f64 = 2.0;
/// Default perspective distance: 8 inches at 72 units per inch.
pub const DEFAULT_CAMERA_DISTANCE: f64 = 8.0 * 72.0;

/// Default glow tint.
pub const DEFAULT_GLOW_COLOR: Color = Color::from_rgba8(0, 255, 0, 255);
/// Default surface fill (light theme).
pub const DEFAULT_SURFACE_COLOR: Color = Color::from_rgba8(0xff, 0xfb, 0xfe, 255);

/// Default sweep-gradient stops: magenta, red, blue, green, yellow, cyan.
pub const DEFAULT_GRADIENT_COLORS: [Color; 6] = [
    Color::from_rgba8(255, 0, 255, 255),
    Color::from_rgba8(255, 0, 0, 255),
    Color::from_rgba8(0, 0, 255, 255),
    Color::from_rgba8(0, 255, 0, 255),
    Color::from_rgba8(255, 255, 0, 255),
    Color::from_rgba8(0, 255, 255, 255),
];

/// Configuration of a tilt card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardConfig {
    /// Width:height ratio of the card box. Must be at least `1.0`.
    pub aspect_ratio: f64,
    /// Corner radius of the tilt surface clip.
    pub corner_radius: f64,
    /// Corner radius of the glow shape.
    pub glow_corner_radius: f64,
    /// Tint of the glow shadow.
    pub glow_color: Color,
    /// Blur radius of the glow shadow.
    pub glow_radius: f64,
    /// Displacement of the glow shadow.
    pub glow_offset: Vec2,
    /// Ordered sweep-gradient colors of the glow shape.
    ///
    /// One color degenerates to a solid fill; an empty list falls back to a
    /// solid fill in [`glow_color`](Self::glow_color).
    pub gradient_colors: Vec<Color>,
    /// Rotation clamp in degrees, applied to both axes.
    pub max_angle: f64,
    /// Divisor applied to the pointer offset from the surface center. Must be `> 0`.
    pub slow_down_factor: f64,
    /// Per-axis multipliers turning the animated offset into degrees.
    pub rotation_scale: RotationScale,
    /// Inset between the card box and the glow layer.
    pub card_padding: f64,
    /// Extra inset of the tilt surface inside the glow box.
    pub surface_inset: f64,
    /// Fill of the tilt surface.
    pub surface_color: Color,
    /// Distance from the viewer used for perspective projection.
    pub camera_distance: f64,
    /// How the first move of a drag turns into an offset.
    pub drag_start: DragStartMode,
    /// Travel from the press position required before a move starts a drag.
    pub drag_slop: f64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            corner_radius: DEFAULT_CORNER_RADIUS,
            glow_corner_radius: DEFAULT_CORNER_RADIUS,
            glow_color: DEFAULT_GLOW_COLOR,
            glow_radius: DEFAULT_GLOW_RADIUS,
            glow_offset: Vec2::ZERO,
            gradient_colors: DEFAULT_GRADIENT_COLORS.to_vec(),
            max_angle: DEFAULT_MAX_ANGLE,
            slow_down_factor: DEFAULT_SLOW_DOWN_FACTOR,
            rotation_scale: RotationScale::DEFAULT,
            card_padding: DEFAULT_CARD_PADDING,
            surface_inset: DEFAULT_SURFACE_INSET,
            surface_color: DEFAULT_SURFACE_COLOR,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            drag_start: DragStartMode::default(),
            drag_slop: 0.0,
        }
    }
}

impl CardConfig {
    /// Set the aspect ratio.
    #[must_use]
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the surface corner radius.
    #[must_use]
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the glow corner radius.
    #[must_use]
    pub fn with_glow_corner_radius(mut self, radius: f64) -> Self {
        self.glow_corner_radius = radius;
        self
    }

    /// Set the glow tint.
    #[must_use]
    pub fn with_glow_color(mut self, color: Color) -> Self {
        self.glow_color = color;
        self
    }

    /// Set the glow blur radius.
    #[must_use]
    pub fn with_glow_radius(mut self, radius: f64) -> Self {
        self.glow_radius = radius;
        self
    }

    /// Set the glow shadow offset.
    #[must_use]
    pub fn with_glow_offset(mut self, offset: Vec2) -> Self {
        self.glow_offset = offset;
        self
    }

    /// Replace the sweep-gradient colors.
    #[must_use]
    pub fn with_gradient_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.gradient_colors = colors.into_iter().collect();
        self
    }

    /// Set the rotation clamp in degrees.
    #[must_use]
    pub fn with_max_angle(mut self, degrees: f64) -> Self {
        self.max_angle = degrees;
        self
    }

    /// Set the pointer-offset divisor.
    #[must_use]
    pub fn with_slow_down_factor(mut self, factor: f64) -> Self {
        self.slow_down_factor = factor;
        self
    }

    /// Set the per-axis rotation multipliers.
    #[must_use]
    pub fn with_rotation_scale(mut self, scale: RotationScale) -> Self {
        self.rotation_scale = scale;
        self
    }

    /// Set the card padding.
    #[must_use]
    pub fn with_card_padding(mut self, padding: f64) -> Self {
        self.card_padding = padding;
        self
    }

    /// Set the surface inset.
    #[must_use]
    pub fn with_surface_inset(mut self, inset: f64) -> Self {
        self.surface_inset = inset;
        self
    }

    /// Set the surface fill.
    #[must_use]
    pub fn with_surface_color(mut self, color: Color) -> Self {
        self.surface_color = color;
        self
    }

    /// Set the perspective distance.
    #[must_use]
    pub fn with_camera_distance(mut self, distance: f64) -> Self {
        self.camera_distance = distance;
        self
    }

    /// Set the drag-start mode.
    #[must_use]
    pub fn with_drag_start(mut self, mode: DragStartMode) -> Self {
        self.drag_start = mode;
        self
    }

    /// Set the drag slop.
    #[must_use]
    pub fn with_drag_slop(mut self, slop: f64) -> Self {
        self.drag_slop = slop;
        self
    }

    /// Check every constraint, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.slow_down_factor.is_finite() && self.slow_down_factor > 0.0) {
            return Err(ConfigError::SlowDownFactor(self.slow_down_factor));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio >= 1.0) {
            return Err(ConfigError::AspectRatio(self.aspect_ratio));
        }
        if self.max_angle.is_nan() || self.max_angle < 0.0 {
            return Err(ConfigError::MaxAngle(self.max_angle));
        }
        if !(self.camera_distance.is_finite() && self.camera_distance > 0.0) {
            return Err(ConfigError::CameraDistance(self.camera_distance));
        }
        for (field, value) in self.lengths() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NegativeLength { field, value });
            }
        }
        Ok(())
    }

    /// Return a copy with every invalid value replaced by the nearest valid one.
    ///
    /// Each correction is logged at `warn` level.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !(self.slow_down_factor.is_finite() && self.slow_down_factor > 0.0) {
            let fixed = if self.slow_down_factor == f64::INFINITY {
                f64::MAX
            } else {
                MIN_SLOW_DOWN_FACTOR
            };
            tracing::warn!(
                value = self.slow_down_factor,
                fixed,
                "slow-down factor must be positive"
            );
            self.slow_down_factor = fixed;
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio >= 1.0) {
            tracing::warn!(value = self.aspect_ratio, "aspect ratio below 1.0, using 1.0");
            self.aspect_ratio = 1.0;
        }
        if self.max_angle.is_nan() || self.max_angle < 0.0 {
            tracing::warn!(value = self.max_angle, "negative max angle, disabling tilt");
            self.max_angle = 0.0;
        }
        if !(self.camera_distance.is_finite() && self.camera_distance > 0.0) {
            tracing::warn!(
                value = self.camera_distance,
                "camera distance must be positive, using default"
            );
            self.camera_distance = DEFAULT_CAMERA_DISTANCE;
        }
        for (field, value) in self.lengths() {
            if !(value.is_finite() && value >= 0.0) {
                tracing::warn!(field, value, "negative length, using 0");
                *self.length_mut(field) = 0.0;
            }
        }
        self
    }

    fn lengths(&self) -> [(&'static str, f64); 6] {
        [
            ("corner_radius", self.corner_radius),
            ("glow_corner_radius", self.glow_corner_radius),
            ("glow_radius", self.glow_radius),
            ("card_padding", self.card_padding),
            ("surface_inset", self.surface_inset),
            ("drag_slop", self.drag_slop),
        ]
    }

    fn length_mut(&mut self, field: &str) -> &mut f64 {
        match field {
            "corner_radius" => &mut self.corner_radius,
            "glow_corner_radius" => &mut self.glow_corner_radius,
            "glow_radius" => &mut self.glow_radius,
            "card_padding" => &mut self.card_padding,
            "surface_inset" => &mut self.surface_inset,
            _ => &mut self.drag_slop,
        }
    }
}

/// A configuration value outside its allowed range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `slow_down_factor` is zero, negative, or not finite.
    SlowDownFactor(f64),
    /// `aspect_ratio` is below `1.0` or not finite.
    AspectRatio(f64),
    /// `max_angle` is negative or NaN.
    MaxAngle(f64),
    /// `camera_distance` is zero, negative, or not finite.
    CameraDistance(f64),
    /// A radius, padding, or slop value is negative or not finite.
    NegativeLength {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlowDownFactor(v) => write!(f, "slow-down factor must be > 0, got {v}"),
            Self::AspectRatio(v) => write!(f, "aspect ratio must be >= 1.0, got {v}"),
            Self::MaxAngle(v) => write!(f, "max angle must be >= 0, got {v}"),
            Self::CameraDistance(v) => write!(f, "camera distance must be > 0, got {v}"),
            Self::NegativeLength { field, value } => {
                write!(f, "{field} must be a non-negative length, got {value}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn defaults_are_valid() {
        let config = CardConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.gradient_colors.len(), 6);
        assert_eq!(config.slow_down_factor, 30.0);
        assert_eq!(config.aspect_ratio, 1.75);
        assert_eq!(config.max_angle, 20.0);
        assert_eq!(config.glow_offset, Vec2::ZERO);
    }

    #[test]
    fn zero_slow_down_is_rejected_and_sanitized() {
        let config = CardConfig::default().with_slow_down_factor(0.0);
        assert_eq!(config.validate(), Err(ConfigError::SlowDownFactor(0.0)));

        let fixed = config.sanitized();
        assert_eq!(fixed.slow_down_factor, MIN_SLOW_DOWN_FACTOR);
        assert_eq!(fixed.validate(), Ok(()));
    }

    #[test]
    fn nan_slow_down_is_rejected() {
        let config = CardConfig::default().with_slow_down_factor(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SlowDownFactor(_))
        ));
        assert!(config.sanitized().slow_down_factor > 0.0);
    }

    #[test]
    fn narrow_aspect_ratio_is_clamped_to_one() {
        let config = CardConfig::default().with_aspect_ratio(0.5);
        assert_eq!(config.validate(), Err(ConfigError::AspectRatio(0.5)));
        assert_eq!(config.sanitized().aspect_ratio, 1.0);
    }

    #[test]
    fn zero_max_angle_is_valid() {
        let config = CardConfig::default().with_max_angle(0.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn negative_lengths_are_zeroed() {
        let config = CardConfig::default()
            .with_card_padding(-4.0)
            .with_glow_radius(-1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeLength {
                field: "glow_radius",
                value: -1.0
            })
        );
        let fixed = config.sanitized();
        assert_eq!(fixed.card_padding, 0.0);
        assert_eq!(fixed.glow_radius, 0.0);
        assert_eq!(fixed.validate(), Ok(()));
    }

    #[test]
    fn error_messages_name_the_value() {
        let msg = ConfigError::SlowDownFactor(0.0).to_string();
        assert!(msg.contains("slow-down"), "unexpected message: {msg}");
        let msg = ConfigError::NegativeLength {
            field: "drag_slop",
            value: -2.0,
        }
        .to_string();
        assert!(msg.contains("drag_slop"), "unexpected message: {msg}");
    }

    #[test]
    fn builders_chain() {
        let config = CardConfig::default()
            .with_gradient_colors([DEFAULT_GLOW_COLOR])
            .with_glow_offset(Vec2::new(2.0, 4.0))
            .with_drag_start(DragStartMode::Raw);
        assert_eq!(config.gradient_colors, [DEFAULT_GLOW_COLOR]);
        assert_eq!(config.glow_offset, Vec2::new(2.0, 4.0));
        assert_eq!(config.drag_start, DragStartMode::Raw);
    }
}
