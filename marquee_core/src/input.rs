// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer, touch and wheel handling.
//!
//! ```text
//!            pointer down              pointer up
//!   Idle ───────────────────► Dragging ─────────► Snapping
//!    ▲ ▲                         ▲                  │ │
//!    │ └─────── settled ─────────┼──────────────────┘ │
//!    │                           └── pointer down ────┘
//!    └── wheel (from Idle or Snapping)
//! ```
//!
//! Handlers only write [`ScrollState::target`]; the frame loop eases
//! `current` toward it.

use crate::scroll::ScrollState;

/// Drag sensitivity per unit of `scroll_speed`, world units per pixel.
pub const DRAG_SENSITIVITY: f64 = 0.025;

/// Wheel step per unit of `scroll_speed`, in world units.
pub const WHEEL_STEP: f64 = 0.2;

/// Interaction state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InputState {
    /// No interaction in flight.
    #[default]
    Idle,
    /// A pointer is down.
    Dragging {
        /// Pointer X at press, in pixels.
        start_x: f64,
        /// `current` at press.
        origin: f64,
        /// Render index centered at press.
        start_index: i64,
    },
    /// Released; easing onto a snapped slot.
    Snapping,
}

/// Where a released drag or settled wheel snaps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snap {
    /// Render index of the destination slot (any sign).
    pub render_index: i64,
    /// Logical item at that slot, in `[0, item_count)`.
    pub logical_index: usize,
}

/// Chooses the render index a drag of `delta` world units from
/// `start_index` lands on.
///
/// Drags further than a quarter stride move one slot in the drag direction;
/// shorter ones snap back.
#[must_use]
pub fn snap_index(start_index: i64, delta: f64, stride: f64) -> i64 {
    if stride > 0.0 && delta.abs() > stride / 4.0 {
        start_index + if delta > 0.0 { 1 } else { -1 }
    } else {
        start_index
    }
}

/// Maps a render index to its logical item.
///
/// Returns `None` when there are no items.
#[must_use]
pub fn logical_index(render_index: i64, item_count: usize) -> Option<usize> {
    let n = i64::try_from(item_count).ok().filter(|&n| n > 0)?;
    usize::try_from(render_index.rem_euclid(n)).ok()
}

/// Render index of the slot nearest `offset`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "scroll offsets are rebased and stay far below i64 range"
)]
pub fn nearest_index(offset: f64, stride: f64) -> i64 {
    if stride > 0.0 && offset.is_finite() {
        (offset / stride).round() as i64
    } else {
        0
    }
}

/// The interaction state machine.
#[derive(Clone, Debug)]
pub struct InputController {
    state: InputState,
    scroll_speed: f64,
}

impl InputController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(scroll_speed: f64) -> Self {
        Self {
            state: InputState::Idle,
            scroll_speed,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> InputState {
        self.state
    }

    /// Whether a pointer is down.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InputState::Dragging { .. })
    }

    /// Pointer or touch press at `x` pixels. Always (re)enters dragging from
    /// the then-current offset.
    pub fn pointer_down(&mut self, x: f64, scroll: &ScrollState, stride: f64) {
        self.state = InputState::Dragging {
            start_x: x,
            origin: scroll.current,
            start_index: nearest_index(scroll.current, stride),
        };
    }

    /// Pointer or touch move. Ignored unless dragging.
    pub fn pointer_move(&mut self, x: f64, scroll: &mut ScrollState) {
        if let InputState::Dragging {
            start_x, origin, ..
        } = self.state
        {
            scroll.target = origin + (start_x - x) * self.scroll_speed * DRAG_SENSITIVITY;
        }
    }

    /// Pointer or touch release.
    ///
    /// Returns the snap destination, or `None` if no drag was in flight or
    /// there is nothing to snap to.
    pub fn pointer_up(
        &mut self,
        scroll: &mut ScrollState,
        stride: f64,
        item_count: usize,
    ) -> Option<Snap> {
        let InputState::Dragging {
            origin,
            start_index,
            ..
        } = self.state
        else {
            return None;
        };
        self.state = InputState::Snapping;
        let render_index = snap_index(start_index, scroll.target - origin, stride);
        let logical_index = logical_index(render_index, item_count)?;
        scroll.target = render_index as f64 * stride;
        Some(Snap {
            render_index,
            logical_index,
        })
    }

    /// Wheel event. Returns whether it was applied (wheel is ignored while
    /// dragging); the caller then re-arms the settle timer.
    pub fn wheel(&mut self, delta_y: f64, scroll: &mut ScrollState) -> bool {
        if self.is_dragging() || delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let step = self.scroll_speed * WHEEL_STEP;
        scroll.target += if delta_y > 0.0 { step } else { -step };
        self.state = InputState::Idle;
        true
    }

    /// Wheel quiet period elapsed: snap `target` to the nearest slot.
    pub fn settle_wheel(
        &mut self,
        scroll: &mut ScrollState,
        stride: f64,
        item_count: usize,
    ) -> Option<Snap> {
        if self.is_dragging() {
            return None;
        }
        let render_index = nearest_index(scroll.target, stride);
        let logical_index = logical_index(render_index, item_count)?;
        scroll.target = render_index as f64 * stride;
        self.state = InputState::Snapping;
        Some(Snap {
            render_index,
            logical_index,
        })
    }

    /// Called once per frame after the scroll advanced.
    pub fn on_frame(&mut self, scroll: &ScrollState) {
        if self.state == InputState::Snapping && scroll.is_settled() {
            self.state = InputState::Idle;
        }
    }

    /// Follows a scroll rebase of `delta` world units and
    /// `delta / stride` slots.
    pub fn rebase(&mut self, delta: f64, slots: i64) {
        if let InputState::Dragging {
            origin,
            start_index,
            start_x,
        } = self.state
        {
            self.state = InputState::Dragging {
                start_x,
                origin: origin + delta,
                start_index: start_index + slots,
            };
        }
    }

    /// Rescales the drag origin after a stride change.
    pub fn rescale(&mut self, ratio: f64) {
        if let InputState::Dragging {
            origin,
            start_index,
            start_x,
        } = self.state
        {
            self.state = InputState::Dragging {
                start_x,
                origin: origin * ratio,
                start_index,
            };
        }
    }

    /// Returns to idle, dropping any drag.
    pub fn reset(&mut self) {
        self.state = InputState::Idle;
    }
}
