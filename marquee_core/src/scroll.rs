// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased scroll position.

/// Direction the strip moved during the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Content moving left (scroll offset increasing).
    #[default]
    Forward,
    /// Content moving right (scroll offset decreasing).
    Backward,
}

/// Scroll offset of the strip, in world units.
///
/// Input and autoplay write [`target`](Self::target); once per frame
/// [`advance`](Self::advance) moves [`current`](Self::current) a fixed
/// fraction of the remaining distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    /// Displayed offset.
    pub current: f64,
    /// Offset being eased toward.
    pub target: f64,
    /// `current` as of the previous frame.
    pub last: f64,
    /// Fraction of the remaining distance covered per frame, in `(0, 1]`.
    pub ease: f64,
}

impl ScrollState {
    /// Creates a state at rest at offset zero.
    #[must_use]
    pub const fn new(ease: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            last: 0.0,
            ease,
        }
    }

    /// Advances `current` one frame toward `target` and reports the frame's
    /// direction of travel.
    pub fn advance(&mut self) -> Direction {
        self.current += (self.target - self.current) * self.ease;
        if self.current >= self.last {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Per-frame velocity (`current - last`).
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.current - self.last
    }

    /// Records the end of a frame.
    pub fn commit_frame(&mut self) {
        self.last = self.current;
    }

    /// Whether `current` has effectively reached `target`.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        (self.target - self.current).abs() < 1e-3
    }

    /// Shifts all three offsets by `delta` without changing the motion.
    pub fn rebase(&mut self, delta: f64) {
        self.current += delta;
        self.target += delta;
        self.last += delta;
    }

    /// Scales all three offsets, used when the slot stride changes on resize.
    pub fn rescale(&mut self, ratio: f64) {
        self.current *= ratio;
        self.target *= ratio;
        self.last *= ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_toward_target() {
        let mut s = ScrollState::new(0.25);
        s.target = 8.0;
        assert_eq!(s.advance(), Direction::Forward);
        assert_eq!(s.current, 2.0);
        assert_eq!(s.speed(), 2.0);
        s.commit_frame();
        assert_eq!(s.advance(), Direction::Forward);
        assert_eq!(s.current, 3.5);
    }

    #[test]
    fn reports_backward_motion() {
        let mut s = ScrollState::new(0.5);
        s.target = -4.0;
        assert_eq!(s.advance(), Direction::Backward);
        assert!(s.speed() < 0.0);
    }

    #[test]
    fn rebase_preserves_motion() {
        let mut s = ScrollState::new(0.1);
        s.current = 5.0;
        s.target = 9.0;
        s.last = 4.5;
        let speed = s.speed();
        s.rebase(-100.0);
        assert_eq!(s.speed(), speed);
        assert_eq!(s.target - s.current, 4.0);
    }

    #[test]
    fn settles() {
        let mut s = ScrollState::new(1.0);
        s.target = 3.0;
        assert!(!s.is_settled());
        s.advance();
        assert!(s.is_settled());
    }
}
