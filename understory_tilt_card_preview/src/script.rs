// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted gesture and frame loop.

use kurbo::{Point, Rect, Size};
use peniko::Color;
use understory_tilt_card::{Animator, CardConfig, PointerEvent, TiltCard};
use understory_tilt_card_svg::{SvgOptions, to_svg_with};

use crate::config::FrameSection;

/// Samples along the drag path.
const DRAG_STEPS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub(crate) fn background(self) -> Color {
        match self {
            Self::Light => Color::from_rgba8(0xff, 0xfb, 0xfe, 0xff),
            Self::Dark => Color::from_rgba8(0x1c, 0x1b, 0x1f, 0xff),
        }
    }

    /// Card defaults for this theme.
    pub(crate) fn card_config(self) -> CardConfig {
        CardConfig::default().with_surface_color(self.background())
    }
}

/// A pointer event delivered at `at` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Step {
    pub(crate) at: f64,
    pub(crate) event: PointerEvent,
}

/// Press near the upper right of `surface`, drag to the lower left, release.
pub(crate) fn gesture(surface: Rect) -> Vec<Step> {
    let (w, h) = (surface.width(), surface.height());
    let from = Point::new(surface.x1 - 0.15 * w, surface.y0 + 0.2 * h);
    let to = Point::new(surface.x0 + 0.15 * w, surface.y1 - 0.2 * h);

    let press_at = 0.1;
    let drag_time = 0.8;
    let mut steps = vec![Step {
        at: press_at,
        event: PointerEvent::Down(from),
    }];
    for i in 1..=DRAG_STEPS {
        let t = f64::from(i) / f64::from(DRAG_STEPS);
        steps.push(Step {
            at: press_at + t * drag_time,
            event: PointerEvent::Move(from.lerp(to, t)),
        });
    }
    let release_at = press_at + drag_time + 0.2;
    steps.push(Step {
        at: release_at,
        event: PointerEvent::Up(to),
    });
    steps
}

/// A rendered frame.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub(crate) name: String,
    pub(crate) svg: String,
}

/// Run the scripted gesture through `card` and render every frame.
pub(crate) fn record<A: Animator>(
    card: &mut TiltCard<A>,
    theme: Theme,
    frames: &FrameSection,
) -> Vec<Frame> {
    let layout = card.layout(Size::new(
        f64::from(frames.width),
        f64::from(frames.height),
    ));
    if layout.is_degenerate() {
        tracing::warn!(
            width = frames.width,
            height = frames.height,
            "document too small for a card"
        );
    }
    let script = gesture(layout.surface);
    let options = SvgOptions::default().with_background(theme.background());

    let fps = if frames.fps.is_finite() && frames.fps > 0.0 {
        frames.fps
    } else {
        tracing::warn!(fps = frames.fps, "invalid frame rate, using 60");
        60.0
    };
    let dt = 1.0 / fps;
    let count = frame_count(frames.duration, fps);

    let mut pending = script.iter().peekable();
    let mut out = Vec::with_capacity(count);
    for n in 0..count {
        let now = n as f64 * dt;
        while let Some(step) = pending.next_if(|step| step.at <= now) {
            let handled = card.pointer_event(step.event);
            tracing::debug!(frame = n, event = ?step.event, handled, "pointer event");
        }
        card.tick(dt);
        let rotation = card.rotation();
        tracing::trace!(
            frame = n,
            x = rotation.x_degrees,
            y = rotation.y_degrees,
            "frame"
        );
        out.push(Frame {
            name: format!("{}_{n:03}.svg", theme.name()),
            svg: to_svg_with(&card.render(), frames.width, frames.height, &options),
        });
    }
    out
}

fn frame_count(duration: f64, fps: f64) -> usize {
    if !(duration.is_finite() && duration > 0.0) {
        return 1;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "duration and fps are positive and finite"
    )]
    let count = (duration * fps).ceil() as usize;
    count.max(1)
}
