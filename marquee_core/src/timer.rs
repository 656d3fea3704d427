// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed one-shot and repeating timers polled from the frame loop.
//!
//! Every deferred activity of the carousel (autoplay, center tracking, wheel
//! settle, dwell) is an entry in a [`TimerSet`]. Each [`TimerKey`] has at
//! most one pending entry, so re-arming a key replaces the previous deadline
//! instead of stacking a second timer.

use crate::time::{Duration, HostTime};

/// Identifies one deferred activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKey {
    /// Periodic autoplay advance.
    Autoplay,
    /// Periodic center tracking and wrap-rebase.
    Tracking,
    /// Wheel quiet-period snap.
    WheelSettle,
    /// End of the emphasis pause after a center change.
    Dwell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    key: TimerKey,
    deadline: HostTime,
    period: Option<Duration>,
}

/// A set of pending timers with at most one entry per key.
#[derive(Clone, Debug, Default)]
pub struct TimerSet {
    entries: Vec<Entry>,
}

impl TimerSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `key` to fire once at `now + delay`, replacing any pending entry.
    pub fn schedule_once(&mut self, key: TimerKey, now: HostTime, delay: Duration) {
        self.insert(Entry {
            key,
            deadline: now + delay,
            period: None,
        });
    }

    /// Arms `key` to fire every `period`, first at `now + period`, replacing
    /// any pending entry.
    pub fn schedule_repeating(&mut self, key: TimerKey, now: HostTime, period: Duration) {
        self.insert(Entry {
            key,
            deadline: now + period,
            period: Some(period),
        });
    }

    /// Disarms `key`. Returns whether it was pending.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        before != self.entries.len()
    }

    /// Disarms everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether `key` is armed.
    #[must_use]
    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Number of armed timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Returns the keys whose deadline is at or before `now`, in deadline
    /// order.
    ///
    /// One-shot entries are removed. Repeating entries fire at most once per
    /// poll and are rescheduled one period later; an entry that has fallen
    /// more than a period behind (a backgrounded tab, say) restarts from
    /// `now` rather than firing a burst.
    pub fn poll(&mut self, now: HostTime) -> Vec<TimerKey> {
        let mut due: Vec<Entry> = self
            .entries
            .iter()
            .copied()
            .filter(|e| e.deadline <= now)
            .collect();
        due.sort_by_key(|e| (e.deadline, e.key));

        self.entries.retain(|e| e.deadline > now || e.period.is_some());
        for e in &mut self.entries {
            if e.deadline > now {
                continue;
            }
            if let Some(period) = e.period {
                let next = e.deadline + period;
                e.deadline = if next <= now { now + period } else { next };
            }
        }
        due.into_iter().map(|e| e.key).collect()
    }

    fn insert(&mut self, entry: Entry) {
        self.entries.retain(|e| e.key != entry.key);
        self.entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> HostTime {
        HostTime(v * 1000)
    }

    #[test]
    fn one_shot_fires_once() {
        let mut timers = TimerSet::new();
        timers.schedule_once(TimerKey::WheelSettle, ms(0), Duration::from_millis(200));
        assert!(timers.poll(ms(199)).is_empty());
        assert_eq!(timers.poll(ms(200)), vec![TimerKey::WheelSettle]);
        assert!(timers.poll(ms(400)).is_empty());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn rearming_replaces_instead_of_stacking() {
        let mut timers = TimerSet::new();
        timers.schedule_once(TimerKey::Dwell, ms(0), Duration::from_millis(2_000));
        timers.schedule_once(TimerKey::Dwell, ms(1_500), Duration::from_millis(2_000));
        assert_eq!(timers.pending(), 1);
        assert!(timers.poll(ms(2_000)).is_empty(), "first deadline is gone");
        assert_eq!(timers.poll(ms(3_500)), vec![TimerKey::Dwell]);
    }

    #[test]
    fn repeating_reschedules() {
        let mut timers = TimerSet::new();
        timers.schedule_repeating(TimerKey::Tracking, ms(0), Duration::from_millis(100));
        assert_eq!(timers.poll(ms(100)), vec![TimerKey::Tracking]);
        assert!(timers.poll(ms(150)).is_empty());
        assert_eq!(timers.poll(ms(210)), vec![TimerKey::Tracking]);
        assert!(timers.is_pending(TimerKey::Tracking));
    }

    #[test]
    fn repeating_does_not_burst_after_a_stall() {
        let mut timers = TimerSet::new();
        timers.schedule_repeating(TimerKey::Tracking, ms(0), Duration::from_millis(100));
        assert_eq!(timers.poll(ms(10_000)), vec![TimerKey::Tracking]);
        assert!(timers.poll(ms(10_050)).is_empty());
        assert_eq!(timers.poll(ms(10_100)), vec![TimerKey::Tracking]);
    }

    #[test]
    fn due_keys_come_out_in_deadline_order() {
        let mut timers = TimerSet::new();
        timers.schedule_once(TimerKey::Dwell, ms(0), Duration::from_millis(50));
        timers.schedule_repeating(TimerKey::Tracking, ms(0), Duration::from_millis(20));
        assert_eq!(
            timers.poll(ms(60)),
            vec![TimerKey::Tracking, TimerKey::Dwell]
        );
    }

    #[test]
    fn cancel_and_clear() {
        let mut timers = TimerSet::new();
        timers.schedule_repeating(TimerKey::Autoplay, ms(0), Duration::from_millis(5_000));
        timers.schedule_once(TimerKey::Dwell, ms(0), Duration::from_millis(2_000));
        assert!(timers.cancel(TimerKey::Autoplay));
        assert!(!timers.cancel(TimerKey::Autoplay));
        assert_eq!(timers.pending(), 1);
        timers.clear();
        assert_eq!(timers.pending(), 0);
    }
}
