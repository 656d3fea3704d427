// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Center-index resolution and wrap-rebase.
//!
//! The strip holds `copies` duplicated sets of the gallery. The render index
//! nearest the viewport center is `round(current / stride)`. Left alone it
//! grows without bound under autoplay, so the tracking loop keeps it inside
//! the middle region `[n/2, slots - n/2)` by shifting the scroll offset by
//! whole set-widths (`n × stride`). A whole set-width shift leaves the
//! logical item at every screen position unchanged.

use crate::input::{logical_index, nearest_index};

/// Widest viewport (width over height) the strip is sized for.
pub const MAX_ASPECT: f64 = 6.0;

/// Minimum number of cards in the strip.
///
/// Cards are sized from the viewport height, so at [`MAX_ASPECT`] the
/// viewport is about twelve strides wide. The strip has to span that plus a
/// centered card on either side for the per-card wrap to leave no hole, and
/// keeps some slack beyond it.
pub const MIN_SLOTS: usize = 24;

/// Number of duplicated sets for `item_count` items.
#[must_use]
pub fn slot_copies(item_count: usize) -> usize {
    if item_count == 0 {
        0
    } else {
        MIN_SLOTS.div_ceil(item_count).max(2)
    }
}

/// Logical index of the item nearest the viewport center.
///
/// Returns `None` when there are no items; otherwise a value in
/// `[0, item_count)` for every finite or non-finite `current`.
#[must_use]
pub fn resolve_center_index(current: f64, stride: f64, item_count: usize) -> Option<usize> {
    logical_index(nearest_index(current, stride), item_count)
}

/// Number of slots to shift the strip by so that `render_index` lands in the
/// safe middle region. Always a multiple of `item_count`; zero when already
/// inside or when there is nothing to shift.
#[must_use]
pub fn rebase_slots(render_index: i64, item_count: usize, slots: usize) -> i64 {
    let (Ok(n), Ok(total)) = (i64::try_from(item_count), i64::try_from(slots)) else {
        return 0;
    };
    if n == 0 || total < 2 * n {
        return 0;
    }
    let lo = n / 2;
    let hi = total - n / 2;
    if render_index < lo {
        let sets = (lo - render_index + n - 1) / n;
        sets * n
    } else if render_index >= hi {
        let sets = (render_index - hi + n) / n;
        -sets * n
    } else {
        0
    }
}

/// Tracks the last logical index reported to the host and the emphasis
/// flag shown during the dwell that follows a change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexTracker {
    last_notified: Option<usize>,
    emphasized: bool,
}

impl IndexTracker {
    /// Creates a tracker that has not notified anything yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the resolved index. Returns `true` if it differs from the
    /// last notified one, in which case the emphasis flag is set and the
    /// caller notifies the host and (re)arms the dwell.
    pub fn observe(&mut self, index: usize) -> bool {
        if self.last_notified == Some(index) {
            return false;
        }
        self.last_notified = Some(index);
        self.emphasized = true;
        true
    }

    /// Ends the dwell.
    pub fn end_dwell(&mut self) {
        self.emphasized = false;
    }

    /// Last index reported to the host.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.last_notified
    }

    /// Whether the centered card is emphasized.
    #[must_use]
    pub fn is_emphasized(&self) -> bool {
        self.emphasized
    }
}
