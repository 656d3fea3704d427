// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame ticks delivered by a backend tick source.
//!
//! The carousel has no predicted-present or pipeline-depth machinery: hosts
//! only pace frames. A backend (the browser's `requestAnimationFrame` loop or
//! a native redraw loop) produces one [`FrameTick`] per frame opportunity and
//! hands it to [`Carousel::tick`](crate::engine::Carousel::tick).

use crate::time::HostTime;

/// A frame opportunity delivered by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Current host time when the tick was generated.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

impl FrameTick {
    /// Creates a tick for the given time and frame counter.
    #[inline]
    #[must_use]
    pub const fn new(now: HostTime, frame_index: u64) -> Self {
        Self { now, frame_index }
    }
}
