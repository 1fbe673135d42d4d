// Copyright 2026 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input delivered by the host.

use kurbo::Point;

/// A pointer sample in card-local coordinates.
///
/// The host is expected to have already recognized the gesture primitives:
/// presses, moves while held, releases, and cancellations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// The pointer went down.
    Down(Point),
    /// The pointer moved while held.
    Move(Point),
    /// The pointer was released.
    Up(Point),
    /// The host took the gesture away (for example, a parent started scrolling).
    Cancel,
}

impl PointerEvent {
    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::Down(p) | Self::Move(p) | Self::Up(p) => Some(p),
            Self::Cancel => None,
        }
    }
}
