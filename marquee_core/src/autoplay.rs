// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed auto-advance.
//!
//! When the autoplay timer fires and the carousel is idle, a linear
//! [`Tween`] moves `target` to the next slot. The tween is sampled once per
//! frame and writes `target`; `current` still eases toward it as usual.

use crate::time::{Duration, HostTime};

/// A linear interpolation of the scroll target over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Value at `start`.
    pub from: f64,
    /// Value at `start + duration`.
    pub to: f64,
    /// Start time.
    pub start: HostTime,
    /// Length.
    pub duration: Duration,
}

impl Tween {
    /// Creates a tween.
    #[must_use]
    pub const fn new(from: f64, to: f64, start: HostTime, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: HostTime) -> f64 {
        if self.duration == Duration::ZERO {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Interpolated value at `now`.
    #[must_use]
    pub fn sample(&self, now: HostTime) -> f64 {
        self.from + (self.to - self.from) * self.progress(now)
    }

    /// Whether the tween has reached its end at `now`.
    #[must_use]
    pub fn is_done(&self, now: HostTime) -> bool {
        self.progress(now) >= 1.0
    }

    /// Shifts both endpoints by `delta`.
    pub fn rebase(&mut self, delta: f64) {
        self.from += delta;
        self.to += delta;
    }

    /// Scales both endpoints.
    pub fn rescale(&mut self, ratio: f64) {
        self.from *= ratio;
        self.to *= ratio;
    }
}

/// Autoplay state: whether it is enabled, and the tween in flight.
#[derive(Clone, Debug, Default)]
pub struct Autoplay {
    enabled: bool,
    tween: Option<Tween>,
}

impl Autoplay {
    /// Creates autoplay state.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            tween: None,
        }
    }

    /// Whether autoplay is configured on.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The tween in flight, if any.
    #[must_use]
    pub fn tween(&self) -> Option<&Tween> {
        self.tween.as_ref()
    }

    /// Starts a tween of `target` from `from` to `to`.
    pub fn begin(&mut self, from: f64, to: f64, now: HostTime, duration: Duration) {
        self.tween = Some(Tween::new(from, to, now, duration));
    }

    /// Drops the tween in flight (user input took over).
    pub fn cancel(&mut self) {
        self.tween = None;
    }

    /// Samples the tween at `now`, finishing it when done.
    ///
    /// Returns the value `target` should take this frame.
    pub fn sample(&mut self, now: HostTime) -> Option<f64> {
        let tween = self.tween?;
        let value = tween.sample(now);
        if tween.is_done(now) {
            self.tween = None;
        }
        Some(value)
    }

    /// Follows a scroll rebase.
    pub fn rebase(&mut self, delta: f64) {
        if let Some(t) = &mut self.tween {
            t.rebase(delta);
        }
    }

    /// Follows a stride change.
    pub fn rescale(&mut self, ratio: f64) {
        if let Some(t) = &mut self.tween {
            t.rescale(ratio);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_sampling() {
        let t = Tween::new(0.0, 10.0, HostTime(1_000), Duration::from_millis(800));
        assert_eq!(t.sample(HostTime(0)), 0.0, "before start clamps");
        assert!((t.sample(HostTime(1_000 + 400_000)) - 5.0).abs() < 1e-12);
        assert_eq!(t.sample(HostTime(10_000_000)), 10.0);
        assert!(t.is_done(HostTime(801_000)));
        assert!(!t.is_done(HostTime(800_999)));
    }

    #[test]
    fn zero_duration_jumps() {
        let t = Tween::new(1.0, 2.0, HostTime(0), Duration::ZERO);
        assert_eq!(t.sample(HostTime(0)), 2.0);
    }

    #[test]
    fn sample_finishes_the_tween() {
        let mut a = Autoplay::new(true);
        a.begin(0.0, 6.0, HostTime(0), Duration::from_millis(800));
        assert!(a.sample(HostTime(400_000)).is_some());
        assert!(a.tween().is_some());
        assert_eq!(a.sample(HostTime(900_000)), Some(6.0));
        assert!(a.tween().is_none());
        assert_eq!(a.sample(HostTime(1_000_000)), None);
    }

    #[test]
    fn rebase_moves_endpoints() {
        let mut a = Autoplay::new(true);
        a.begin(60.0, 66.0, HostTime(0), Duration::from_millis(800));
        a.rebase(-60.0);
        let t = a.tween().unwrap();
        assert_eq!((t.from, t.to), (0.0, 6.0));
    }
}
