// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer press tracking for a single control.
//!
//! Hosts that deliver raw pointer streams (down/move/up) rather than an
//! already-recognized press use [`PressTracker`] to decide whether a release
//! should activate the control.
//!
//! ## Rules
//!
//! 1. A release activates only if a press is active for that pointer.
//! 2. The release must land inside the control.
//! 3. If a slop is configured, the pointer must never have travelled farther
//!    than the slop from where it went down; once exceeded, the press is
//!    cancelled for good even if the pointer comes back.
//! 4. A cancelled press (pointer cancel, slop exceeded) never activates.
//!
//! ```
//! use kurbo::Point;
//! use understory_activation::press::{PressOutcome, PressTracker};
//!
//! let mut tracker = PressTracker::new();
//! tracker.on_down(None, Point::new(10.0, 10.0));
//! assert!(tracker.is_pressed_in());
//!
//! assert_eq!(tracker.on_up(None, true, Point::new(12.0, 11.0)), PressOutcome::Release);
//! assert!(!tracker.is_pressed_in());
//! ```
//!
//! Each pointer is tracked independently, so multi-touch presses on one
//! control do not interfere with each other.

use alloc::collections::BTreeMap;
use core::num::NonZeroU64;
use kurbo::Point;

/// Pointer identifier for tracking multiple concurrent presses.
pub type PointerId = NonZeroU64;

const PRIMARY_POINTER: PointerId = NonZeroU64::MIN;

/// Default distance, in logical pixels, a pointer may travel before its press is cancelled.
pub const DEFAULT_SLOP: f64 = 10.0;

/// State for an active pointer press.
#[derive(Clone, Debug, PartialEq)]
pub struct Press {
    /// Pointer position when the press began.
    pub down_position: Point,
    /// Set once the pointer left the slop region.
    pub slop_exceeded: bool,
}

/// What a pointer release means for the control.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// The press completed; activate.
    Release,
    /// A press existed but does not count (outside, slop exceeded).
    Cancelled,
    /// There was no active press for this pointer.
    NoPress,
}

/// Tracks pointer presses on one control.
#[derive(Clone, Debug)]
pub struct PressTracker {
    presses: BTreeMap<PointerId, Press>,
    /// Distance threshold before a press is cancelled, or `None` for unlimited.
    pub slop: Option<f64>,
}

impl PressTracker {
    /// Tracker with [`DEFAULT_SLOP`].
    pub fn new() -> Self {
        Self::with_slop(Some(DEFAULT_SLOP))
    }

    /// Tracker with a custom slop.
    pub fn with_slop(slop: Option<f64>) -> Self {
        Self {
            presses: BTreeMap::new(),
            slop,
        }
    }

    /// Record a pointer down inside the control. `None` means the primary pointer.
    pub fn on_down(&mut self, pointer_id: Option<PointerId>, position: Point) {
        self.presses.insert(
            pointer_id.unwrap_or(PRIMARY_POINTER),
            Press {
                down_position: position,
                slop_exceeded: false,
            },
        );
    }

    /// Record pointer movement.
    ///
    /// Returns `true` if this move newly pushed the press past the slop.
    pub fn on_move(&mut self, pointer_id: Option<PointerId>, position: Point) -> bool {
        let Some(press) = self.presses.get_mut(&pointer_id.unwrap_or(PRIMARY_POINTER)) else {
            return false;
        };
        if press.slop_exceeded {
            return false;
        }
        let exceeded = self
            .slop
            .is_some_and(|slop| press.down_position.distance(position) > slop);
        press.slop_exceeded = exceeded;
        exceeded
    }

    /// Process a pointer release. `inside` is whether the release landed on the control.
    pub fn on_up(
        &mut self,
        pointer_id: Option<PointerId>,
        inside: bool,
        position: Point,
    ) -> PressOutcome {
        let Some(press) = self.presses.remove(&pointer_id.unwrap_or(PRIMARY_POINTER)) else {
            return PressOutcome::NoPress;
        };
        let within_slop = self
            .slop
            .is_none_or(|slop| press.down_position.distance(position) <= slop);
        if inside && !press.slop_exceeded && within_slop {
            PressOutcome::Release
        } else {
            PressOutcome::Cancelled
        }
    }

    /// Cancel the press for a pointer. Returns `true` if one was active.
    pub fn cancel(&mut self, pointer_id: Option<PointerId>) -> bool {
        self.presses
            .remove(&pointer_id.unwrap_or(PRIMARY_POINTER))
            .is_some()
    }

    /// Whether any pointer is currently pressing the control and still counts.
    ///
    /// Hosts use this for "pressed in" visual feedback.
    pub fn is_pressed_in(&self) -> bool {
        self.presses.values().any(|p| !p.slop_exceeded)
    }

    /// The active press for a pointer, if any.
    pub fn press(&self, pointer_id: Option<PointerId>) -> Option<&Press> {
        self.presses.get(&pointer_id.unwrap_or(PRIMARY_POINTER))
    }

    /// Drop all active presses.
    pub fn clear(&mut self) {
        self.presses.clear();
    }
}

impl Default for PressTracker {
    fn default() -> Self {
        Self::new()
    }
}
