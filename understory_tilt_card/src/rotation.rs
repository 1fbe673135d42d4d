// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset-to-rotation mapping and perspective projection of the tilted surface.
//!
//! The mapping swaps axes: the vertical offset drives rotation around the X
//! axis and the horizontal offset drives rotation around the Y axis. Each
//! product is clamped to `[-max_angle, max_angle]`.
//!
//! ```
//! use kurbo::Vec2;
//! use understory_tilt_card::{RotationAngles, RotationScale};
//!
//! let angles = RotationAngles::from_offset(Vec2::new(1.0, 50.0), RotationScale::DEFAULT, 20.0);
//! assert_eq!(angles.x_degrees, -20.0);
//! assert_eq!(angles.y_degrees, 0.5);
//! ```

use kurbo::{BezPath, PathEl, Point, Shape, Vec2};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Smallest depth (distance from the viewer) a projected point may have.
const MIN_DEPTH: f64 = 1.0;

/// Per-axis multipliers applied to the animated offset before clamping.
///
/// `x` scales the vertical offset into X-axis rotation and `y` scales the
/// horizontal offset into Y-axis rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RotationScale {
    /// Degrees of X-axis rotation per unit of vertical offset.
    pub x: f64,
    /// Degrees of Y-axis rotation per unit of horizontal offset.
    pub y: f64,
}

impl RotationScale {
    /// `-2` for the X axis, `1/2` for the Y axis.
    pub const DEFAULT: Self = Self { x: -2.0, y: 0.5 };

    /// Create a scale from per-axis multipliers.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for RotationScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Rotation of the tilt surface, in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RotationAngles {
    /// Rotation around the horizontal axis. Negative values bring the top edge toward the viewer.
    pub x_degrees: f64,
    /// Rotation around the vertical axis. Positive values push the right edge away from the viewer.
    pub y_degrees: f64,
}

impl RotationAngles {
    /// No rotation.
    pub const ZERO: Self = Self {
        x_degrees: 0.0,
        y_degrees: 0.0,
    };

    /// Derive angles from an animated offset.
    pub fn from_offset(offset: Vec2, scale: RotationScale, max_angle: f64) -> Self {
        Self {
            x_degrees: clamp_angle(scale.x * offset.y, max_angle),
            y_degrees: clamp_angle(scale.y * offset.x, max_angle),
        }
    }

    /// Returns `true` when neither axis is rotated.
    pub fn is_flat(&self) -> bool {
        self.x_degrees == 0.0 && self.y_degrees == 0.0
    }
}

/// Clamp `value` to `[-max_angle, max_angle]`.
///
/// A NaN value or a NaN/negative bound yields `0`.
pub fn clamp_angle(value: f64, max_angle: f64) -> f64 {
    if value.is_nan() || max_angle.is_nan() || max_angle <= 0.0 {
        return 0.0;
    }
    value.clamp(-max_angle, max_angle)
}

/// A rotated surface: angles, the pivot they rotate around, and the
/// perspective distance used to flatten the result back onto the screen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tilt {
    /// Rotation of the surface.
    pub angles: RotationAngles,
    /// Point the rotation is applied around, usually the surface center.
    pub pivot: Point,
    /// Distance from the viewer to the untilted surface plane.
    pub camera_distance: f64,
}

impl Tilt {
    /// Create a tilt around `pivot`.
    pub fn new(angles: RotationAngles, pivot: Point, camera_distance: f64) -> Self {
        Self {
            angles,
            pivot,
            camera_distance,
        }
    }

    /// Project a point of the flat surface onto the screen.
    ///
    /// The point is rotated around the X axis, then around the Y axis, and
    /// finally divided by its depth. Points that would end up behind the
    /// viewer are held at a minimal depth.
    pub fn project(&self, point: Point) -> Point {
        if self.angles.is_flat() {
            return point;
        }
        let (sin_x, cos_x) = sin_cos_degrees(self.angles.x_degrees);
        let (sin_y, cos_y) = sin_cos_degrees(self.angles.y_degrees);

        let local = point - self.pivot;
        let y1 = local.y * cos_x;
        let z1 = -local.y * sin_x;
        let x2 = local.x * cos_y - z1 * sin_y;
        let z2 = local.x * sin_y + z1 * cos_y;

        let depth = (self.camera_distance + z2).max(MIN_DEPTH);
        let scale = self.camera_distance / depth;
        self.pivot + Vec2::new(x2 * scale, y1 * scale)
    }

    /// Flatten `shape` and project every vertex.
    ///
    /// Curves are flattened to line segments within `tolerance` first, since
    /// a perspective projection does not map Béziers to Béziers.
    pub fn project_shape(&self, shape: &impl Shape, tolerance: f64) -> BezPath {
        let mut out = BezPath::new();
        kurbo::flatten(shape.path_elements(tolerance), tolerance, |el| match el {
            PathEl::MoveTo(p) => out.move_to(self.project(p)),
            PathEl::LineTo(p) => out.line_to(self.project(p)),
            PathEl::ClosePath => out.close_path(),
            // `flatten` only emits lines.
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        out
    }
}

fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (radians.sin(), radians.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, RoundedRect};

    const EPS: f64 = 1e-9;

    #[test]
    fn axes_are_swapped_and_scaled() {
        let angles = RotationAngles::from_offset(Vec2::new(1.0, 0.5), RotationScale::DEFAULT, 20.0);
        assert!((angles.x_degrees - -1.0).abs() < EPS);
        assert!((angles.y_degrees - 0.5).abs() < EPS);
    }

    #[test]
    fn clamp_limits_both_axes() {
        let angles =
            RotationAngles::from_offset(Vec2::new(-500.0, 50.0), RotationScale::DEFAULT, 20.0);
        assert_eq!(angles.x_degrees, -20.0);
        assert_eq!(angles.y_degrees, -20.0);

        let angles =
            RotationAngles::from_offset(Vec2::new(500.0, -50.0), RotationScale::DEFAULT, 20.0);
        assert_eq!(angles.x_degrees, 20.0);
        assert_eq!(angles.y_degrees, 20.0);
    }

    #[test]
    fn zero_max_angle_forces_flat() {
        let angles =
            RotationAngles::from_offset(Vec2::new(30.0, -12.0), RotationScale::DEFAULT, 0.0);
        assert!(angles.is_flat());
    }

    #[test]
    fn nan_inputs_clamp_to_zero() {
        assert_eq!(clamp_angle(f64::NAN, 20.0), 0.0);
        assert_eq!(clamp_angle(5.0, f64::NAN), 0.0);
        assert_eq!(clamp_angle(5.0, -1.0), 0.0);
        assert_eq!(clamp_angle(f64::INFINITY, 20.0), 20.0);
    }

    #[test]
    fn custom_scale_is_honored() {
        let scale = RotationScale::new(1.0, 1.0);
        let angles = RotationAngles::from_offset(Vec2::new(3.0, 4.0), scale, 20.0);
        assert_eq!(angles.x_degrees, 4.0);
        assert_eq!(angles.y_degrees, 3.0);
    }

    #[test]
    fn flat_tilt_is_identity() {
        let tilt = Tilt::new(RotationAngles::ZERO, Point::new(50.0, 50.0), 576.0);
        let p = Point::new(12.0, 80.0);
        assert_eq!(tilt.project(p), p);
    }

    #[test]
    fn pivot_is_fixed() {
        let angles = RotationAngles {
            x_degrees: -12.0,
            y_degrees: 17.0,
        };
        let pivot = Point::new(100.0, 60.0);
        let tilt = Tilt::new(angles, pivot, 576.0);
        let projected = tilt.project(pivot);
        assert!((projected - pivot).hypot() < EPS);
    }

    #[test]
    fn positive_y_rotation_pushes_right_edge_away() {
        let angles = RotationAngles {
            x_degrees: 0.0,
            y_degrees: 20.0,
        };
        let tilt = Tilt::new(angles, Point::ZERO, 576.0);
        let right = tilt.project(Point::new(100.0, 50.0));
        let left = tilt.project(Point::new(-100.0, 50.0));
        // The receding edge is foreshortened, the approaching one magnified.
        assert!(right.x.abs() < left.x.abs());
        assert!(right.y.abs() < left.y.abs());
    }

    #[test]
    fn negative_x_rotation_brings_top_edge_forward() {
        let angles = RotationAngles {
            x_degrees: -10.0,
            y_degrees: 0.0,
        };
        let tilt = Tilt::new(angles, Point::ZERO, 576.0);
        let top = tilt.project(Point::new(100.0, -50.0));
        let bottom = tilt.project(Point::new(100.0, 50.0));
        assert!(top.x.abs() > bottom.x.abs());
    }

    #[test]
    fn projected_shape_is_closed_polyline() {
        let angles = RotationAngles {
            x_degrees: 5.0,
            y_degrees: -5.0,
        };
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let tilt = Tilt::new(angles, rect.center(), 576.0);
        let path = tilt.project_shape(&RoundedRect::from_rect(rect, 16.0), 0.1);
        assert!(matches!(path.elements().first(), Some(PathEl::MoveTo(_))));
        assert!(
            path.elements()
                .iter()
                .all(|el| !matches!(el, PathEl::QuadTo(..) | PathEl::CurveTo(..))),
            "projected outline must be made of lines only"
        );
        assert!(path.elements().iter().any(|el| matches!(el, PathEl::ClosePath)));
    }
}
