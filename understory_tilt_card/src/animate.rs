// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retargetable vector animators.
//!
//! An [`Animator`] owns a current value that converges toward a target over
//! successive [`tick`](Animator::tick)s. The target can be replaced at any
//! time; the value continues from where it is, so pointer samples arriving
//! mid-animation never cause a jump.
//!
//! Three curves are provided:
//! - [`SpringAnimator`]: critically damped spring, the default.
//! - [`TweenAnimator`]: fixed-duration cubic ease-out.
//! - [`LerpAnimator`]: per-frame exponential approach.

use kurbo::Vec2;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Longest time step accepted by a single [`Animator::tick`], in seconds.
///
/// Longer frames (for example after the host was suspended) are shortened to
/// this so the spring integration stays bounded.
pub const MAX_TICK: f64 = 1.0;

/// Distance below which an animation is considered settled, in offset units.
pub const DEFAULT_SETTLE_THRESHOLD: f64 = 0.5;

/// A vector value converging toward a retargetable goal.
pub trait Animator {
    /// Current value.
    fn value(&self) -> Vec2;

    /// Current goal.
    fn target(&self) -> Vec2;

    /// Redirect the animation toward `target`, continuing from the current value.
    fn set_target(&mut self, target: Vec2);

    /// Advance by `dt` seconds and return the new value.
    ///
    /// Negative or non-finite steps are treated as zero.
    fn tick(&mut self, dt: f64) -> Vec2;

    /// Returns `true` once the value has reached the target.
    fn is_settled(&self) -> bool;

    /// Jump straight to `value`, making it the target as well.
    fn snap_to(&mut self, value: Vec2);
}

fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(MAX_TICK)
    } else {
        0.0
    }
}

/// Spring animator integrated with semi-implicit Euler sub-steps.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringAnimator {
    value: Vec2,
    velocity: Vec2,
    target: Vec2,
    stiffness: f64,
    damping: f64,
    threshold: f64,
    settled: bool,
}

impl SpringAnimator {
    /// Stiffness of the default spring.
    pub const DEFAULT_STIFFNESS: f64 = 1500.0;
    /// Damping ratio of the default spring (critically damped).
    pub const DEFAULT_DAMPING_RATIO: f64 = 1.0;

    /// Longest integration sub-step, in seconds.
    const MAX_STEP: f64 = 1.0 / 240.0;

    /// Create a spring at rest at the origin.
    pub fn new() -> Self {
        Self::with_params(
            Self::DEFAULT_STIFFNESS,
            Self::DEFAULT_DAMPING_RATIO,
            DEFAULT_SETTLE_THRESHOLD,
        )
    }

    /// Create a spring with the given stiffness, damping ratio, and settle threshold.
    ///
    /// Non-positive stiffness falls back to the default; a negative damping
    /// ratio is treated as zero (undamped).
    pub fn with_params(stiffness: f64, damping_ratio: f64, threshold: f64) -> Self {
        let stiffness = if stiffness.is_finite() && stiffness > 0.0 {
            stiffness
        } else {
            Self::DEFAULT_STIFFNESS
        };
        let damping_ratio = if damping_ratio.is_finite() {
            damping_ratio.max(0.0)
        } else {
            Self::DEFAULT_DAMPING_RATIO
        };
        Self {
            value: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
            stiffness,
            damping: 2.0 * damping_ratio * stiffness.sqrt(),
            threshold: threshold.abs(),
            settled: true,
        }
    }

    /// Current velocity, in offset units per second.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
}

impl Default for SpringAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for SpringAnimator {
    fn value(&self) -> Vec2 {
        self.value
    }

    fn target(&self) -> Vec2 {
        self.target
    }

    fn set_target(&mut self, target: Vec2) {
        if target != self.target {
            self.target = target;
            self.settled = false;
        }
    }

    fn tick(&mut self, dt: f64) -> Vec2 {
        if self.settled {
            return self.value;
        }
        let mut remaining = sanitize_dt(dt);
        while remaining > 0.0 {
            let step = remaining.min(Self::MAX_STEP);
            let accel = (self.target - self.value) * self.stiffness - self.velocity * self.damping;
            self.velocity += accel * step;
            self.value += self.velocity * step;
            remaining -= step;
        }
        if (self.target - self.value).hypot() < self.threshold
            && self.velocity.hypot() < self.threshold
        {
            self.value = self.target;
            self.velocity = Vec2::ZERO;
            self.settled = true;
            tracing::trace!(x = self.value.x, y = self.value.y, "spring settled");
        }
        self.value
    }

    fn is_settled(&self) -> bool {
        self.settled
    }

    fn snap_to(&mut self, value: Vec2) {
        self.value = value;
        self.target = value;
        self.velocity = Vec2::ZERO;
        self.settled = true;
    }
}

/// Fixed-duration cubic ease-out.
///
/// Retargeting restarts the clock from the current value.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenAnimator {
    start: Vec2,
    value: Vec2,
    target: Vec2,
    duration: f64,
    elapsed: f64,
}

impl TweenAnimator {
    /// Create a tween at rest at the origin that takes `duration` seconds per move.
    pub fn new(duration: f64) -> Self {
        Self {
            start: Vec2::ZERO,
            value: Vec2::ZERO,
            target: Vec2::ZERO,
            duration: if duration.is_finite() {
                duration.max(0.0)
            } else {
                0.0
            },
            elapsed: 0.0,
        }
    }

    /// Seconds per move.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }
}

impl Animator for TweenAnimator {
    fn value(&self) -> Vec2 {
        self.value
    }

    fn target(&self) -> Vec2 {
        self.target
    }

    fn set_target(&mut self, target: Vec2) {
        if target != self.target {
            self.start = self.value;
            self.target = target;
            self.elapsed = 0.0;
        }
    }

    fn tick(&mut self, dt: f64) -> Vec2 {
        if self.is_settled() {
            return self.value;
        }
        self.elapsed += sanitize_dt(dt);
        let t = self.progress();
        let inv = 1.0 - t;
        let eased = 1.0 - inv * inv * inv;
        self.value = if t >= 1.0 {
            self.target
        } else {
            self.start + (self.target - self.start) * eased
        };
        self.value
    }

    fn is_settled(&self) -> bool {
        self.value == self.target
    }

    fn snap_to(&mut self, value: Vec2) {
        self.start = value;
        self.value = value;
        self.target = value;
        self.elapsed = 0.0;
    }
}

/// Exponential approach: each tick covers `rate · dt` of the remaining distance.
#[derive(Clone, Debug, PartialEq)]
pub struct LerpAnimator {
    value: Vec2,
    target: Vec2,
    rate: f64,
    threshold: f64,
}

impl LerpAnimator {
    /// Approach rate of the default lerp, per second.
    pub const DEFAULT_RATE: f64 = 12.0;

    /// Create a lerp at rest at the origin approaching at `rate` per second.
    ///
    /// A non-positive rate would never settle and falls back to the default.
    pub fn new(rate: f64) -> Self {
        Self {
            value: Vec2::ZERO,
            target: Vec2::ZERO,
            rate: if rate.is_finite() && rate > 0.0 {
                rate
            } else {
                Self::DEFAULT_RATE
            },
            threshold: DEFAULT_SETTLE_THRESHOLD,
        }
    }

    /// Approach rate, per second.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Replace the settle threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.abs();
        self
    }
}

impl Animator for LerpAnimator {
    fn value(&self) -> Vec2 {
        self.value
    }

    fn target(&self) -> Vec2 {
        self.target
    }

    fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    fn tick(&mut self, dt: f64) -> Vec2 {
        if self.is_settled() {
            return self.value;
        }
        let alpha = (self.rate * sanitize_dt(dt)).min(1.0);
        self.value += (self.target - self.value) * alpha;
        if (self.target - self.value).hypot() < self.threshold {
            self.value = self.target;
        }
        self.value
    }

    fn is_settled(&self) -> bool {
        self.value == self.target
    }

    fn snap_to(&mut self, value: Vec2) {
        self.value = value;
        self.target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn run_until_settled(animator: &mut impl Animator, max_frames: usize) -> usize {
        for frame in 0..max_frames {
            if animator.is_settled() {
                return frame;
            }
            animator.tick(FRAME);
        }
        max_frames
    }

    #[test]
    fn spring_starts_settled_at_origin() {
        let spring = SpringAnimator::new();
        assert!(spring.is_settled());
        assert_eq!(spring.value(), Vec2::ZERO);
    }

    #[test]
    fn spring_converges_and_snaps_to_target() {
        let mut spring = SpringAnimator::new();
        let target = Vec2::new(12.0, -8.0);
        spring.set_target(target);
        assert!(!spring.is_settled());

        let frames = run_until_settled(&mut spring, 600);
        assert!(frames < 600, "spring did not settle");
        assert_eq!(spring.value(), target);
        assert_eq!(spring.velocity(), Vec2::ZERO);
    }

    #[test]
    fn critically_damped_spring_does_not_overshoot() {
        let mut spring = SpringAnimator::new();
        spring.set_target(Vec2::new(100.0, 0.0));
        for _ in 0..120 {
            let v = spring.tick(FRAME);
            assert!(v.x <= 100.0 + 1e-9, "overshoot to {}", v.x);
        }
    }

    #[test]
    fn spring_retarget_is_continuous() {
        let mut spring = SpringAnimator::new();
        spring.set_target(Vec2::new(50.0, 50.0));
        spring.tick(FRAME);
        spring.tick(FRAME);
        let before = spring.value();
        let velocity = spring.velocity();

        spring.set_target(Vec2::new(-50.0, 0.0));
        assert_eq!(spring.value(), before);
        assert_eq!(spring.velocity(), velocity);

        run_until_settled(&mut spring, 600);
        assert_eq!(spring.value(), Vec2::new(-50.0, 0.0));
    }

    #[test]
    fn bad_dt_is_ignored() {
        let mut spring = SpringAnimator::new();
        spring.set_target(Vec2::new(10.0, 0.0));
        assert_eq!(spring.tick(f64::NAN), Vec2::ZERO);
        assert_eq!(spring.tick(-1.0), Vec2::ZERO);
        assert!(spring.tick(f64::INFINITY).x.is_finite());
    }

    #[test]
    fn snap_to_settles_immediately() {
        let mut spring = SpringAnimator::new();
        spring.set_target(Vec2::new(3.0, 4.0));
        spring.tick(FRAME);
        spring.snap_to(Vec2::new(1.0, 1.0));
        assert!(spring.is_settled());
        assert_eq!(spring.target(), Vec2::new(1.0, 1.0));
        assert_eq!(spring.tick(FRAME), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn tween_reaches_target_after_duration() {
        let mut tween = TweenAnimator::new(0.25);
        tween.set_target(Vec2::new(8.0, 4.0));
        tween.tick(0.1);
        assert!(!tween.is_settled());
        let mid = tween.value();
        assert!(mid.x > 0.0 && mid.x < 8.0);
        tween.tick(0.2);
        assert!(tween.is_settled());
        assert_eq!(tween.value(), Vec2::new(8.0, 4.0));
    }

    #[test]
    fn tween_retarget_starts_from_current_value() {
        let mut tween = TweenAnimator::new(0.2);
        tween.set_target(Vec2::new(10.0, 0.0));
        tween.tick(0.1);
        let here = tween.value();

        tween.set_target(Vec2::ZERO);
        assert_eq!(tween.value(), here);
        tween.tick(0.01);
        assert!(tween.value().x < here.x);
    }

    #[test]
    fn zero_duration_tween_jumps() {
        let mut tween = TweenAnimator::new(0.0);
        tween.set_target(Vec2::new(2.0, 2.0));
        assert_eq!(tween.tick(0.0), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn lerp_approaches_monotonically() {
        let mut lerp = LerpAnimator::new(12.0).with_threshold(0.01);
        lerp.set_target(Vec2::new(10.0, 0.0));
        let mut last = 0.0;
        for _ in 0..30 {
            let x = lerp.tick(FRAME).x;
            assert!(x >= last, "lerp moved backwards");
            last = x;
        }
        let frames = run_until_settled(&mut lerp, 600);
        assert!(frames < 600, "lerp did not settle");
        assert_eq!(lerp.value(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn stalled_lerp_rate_falls_back_and_settles() {
        for rate in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let mut lerp = LerpAnimator::new(rate);
            assert_eq!(lerp.rate(), LerpAnimator::DEFAULT_RATE);
            lerp.set_target(Vec2::new(0.0, 20.0));
            let frames = run_until_settled(&mut lerp, 600);
            assert!(frames < 600, "lerp with rate {rate} did not settle");
        }
    }
}
