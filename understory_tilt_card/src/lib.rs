// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tilt_card --heading-base-level=0

//! Understory Tilt Card: a headless 3D tilt card.
//!
//! A tilt card is two stacked layers sharing one box:
//!
//! - a **glow** ([`GlowLayer`]): a rounded rectangle filled with a sweep
//!   gradient and a tinted, blurred shadow, and
//! - a **tilt surface** ([`TiltSurface`]): a rounded, clipped foreground that
//!   rotates around its X and Y axes while the pointer is held on it, and
//!   springs back flat on release.
//!
//! The crate does no drawing itself. Rendering produces a [`Scene`], a
//! short display list that a backend replays (`understory_tilt_card_svg`
//! is one such backend).
//!
//! # Pipeline
//!
//! 1. [`TiltCard::layout`] computes the card box ([`CardLayout`]) and tells
//!    the surface where its center is.
//! 2. [`TiltCard::pointer_event`] feeds [`PointerEvent`]s to the gesture
//!    state machine ([`TiltState`]), which produces a raw pointer offset:
//!    the pointer's displacement from the surface center divided by the
//!    slow-down factor.
//! 3. An [`Animator`] (a critically damped spring by default) chases that
//!    offset; [`TiltCard::tick`] advances it.
//! 4. The animated offset maps to [`RotationAngles`] (`x = -2·dy`,
//!    `y = 0.5·dx`, each clamped to the max angle), which
//!    [`TiltCard::render`] records as a [`Tilt`] on the surface layer.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_tilt_card::{CardConfig, PointerEvent, TiltCard, TiltPhase};
//!
//! let mut card = TiltCard::new(CardConfig::default());
//! let layout = card.layout(Size::new(400.0, 800.0));
//! let center = layout.surface.center();
//!
//! // Press 60 px right of center: with the default slow-down of 30 the
//! // offset is (2, 0), so the surface settles at a 1 degree Y rotation.
//! assert!(card.pointer_event(PointerEvent::Down(center + (60.0, 0.0))));
//! assert_eq!(card.phase(), TiltPhase::Pressed);
//! while card.tick(1.0 / 60.0) {}
//! assert!((card.rotation().y_degrees - 1.0).abs() < 1e-9);
//!
//! // Glow first, surface on top.
//! assert_eq!(card.render().layers().count(), 2);
//!
//! card.pointer_event(PointerEvent::Up(Point::ZERO));
//! while card.tick(1.0 / 60.0) {}
//! assert!(card.rotation().is_flat());
//! ```
//!
//! # Configuration
//!
//! [`CardConfig`] carries every tunable. The defaults are slow-down 30,
//! aspect ratio 1.75, 16 px corners, 16 px glow blur, and a 20° max angle.
//! [`CardConfig::validate`] reports bad values as a [`ConfigError`]; the
//! card itself always runs on [`CardConfig::sanitized`] values.
//!
//! # Logging
//!
//! Gesture transitions and layout changes are reported through `tracing`
//! at `debug`, sanitized configuration at `warn`, and spring settling at
//! `trace`. Install any subscriber to see them.
//!
//! # `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Enable exactly one of the `std`
//! (default) or `libm` features so Kurbo has floating point math.

#![no_std]

extern crate alloc;

pub mod animate;
mod card;
mod config;
mod glow;
mod layout;
mod pointer;
pub mod rotation;
pub mod scene;
mod surface;
pub mod tilt;

pub use animate::{Animator, LerpAnimator, SpringAnimator, TweenAnimator};
pub use card::TiltCard;
pub use config::{
    CardConfig, ConfigError, DEFAULT_ASPECT_RATIO, DEFAULT_CAMERA_DISTANCE, DEFAULT_CARD_PADDING,
    DEFAULT_CORNER_RADIUS, DEFAULT_GLOW_COLOR, DEFAULT_GLOW_RADIUS, DEFAULT_GRADIENT_COLORS,
    DEFAULT_MAX_ANGLE, DEFAULT_SLOW_DOWN_FACTOR, DEFAULT_SURFACE_COLOR, DEFAULT_SURFACE_INSET,
    MIN_SLOW_DOWN_FACTOR,
};
pub use glow::{GLOW_Z_INDEX, GlowLayer};
pub use layout::CardLayout;
pub use pointer::PointerEvent;
pub use rotation::{RotationAngles, RotationScale, Tilt, clamp_angle};
pub use scene::{CardOp, Fill, Layer, Scene, Shadow};
pub use surface::{SURFACE_Z_INDEX, TiltSurface};
pub use tilt::{DragStartMode, GestureParams, TiltPhase, TiltState, adjust_offset};
