//! Clock ticker
//!
//! Samples the wall clock once per period and forwards changed digits to the
//! flip animator. The animator is compared against the value each cell shows
//! or is already flipping towards, so repeated identical samples never
//! restart a flip.

use crate::display_time::DisplayTime;
use flipclock_animation::{CellId, FlipAnimator, FlipTimer};
use flipclock_core::{TimerId, TimerQueue, WallClock};
use std::time::Duration;

/// Default sampling period
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Periodic wall-clock sampler
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    timer: Option<TimerId>,
    last: Option<DisplayTime>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            timer: None,
            last: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Last successfully sampled display time
    pub fn last(&self) -> Option<&DisplayTime> {
        self.last.as_ref()
    }

    /// Start the repeating tick. Does nothing if already running.
    pub fn start<T: Clone>(&mut self, queue: &mut TimerQueue<T>, payload: T) {
        if self.timer.is_none() {
            self.timer = Some(queue.schedule_repeating(self.period, payload));
        }
    }

    /// Cancel the repeating tick
    pub fn stop<T: Clone>(&mut self, queue: &mut TimerQueue<T>) {
        if let Some(id) = self.timer.take() {
            queue.cancel(id);
        }
    }

    /// Sample the clock once. Returns whether any displayed field changed.
    ///
    /// Cells that have never shown a value are committed directly; later
    /// changes go through a flip. An unreadable clock leaves the last good
    /// sample on screen.
    pub fn tick<T: From<FlipTimer> + Clone>(
        &mut self,
        clock: &dyn WallClock,
        animator: &mut FlipAnimator,
        queue: &mut TimerQueue<T>,
    ) -> bool {
        let Some(now) = clock.now() else {
            tracing::trace!("wall clock unavailable, keeping last sample");
            return false;
        };
        let sample = DisplayTime::from_datetime(&now);

        let mut changed = false;
        let hour = sample.hour_text();
        let fields = [
            (CellId::Hour, hour.as_str()),
            (CellId::Minute, sample.minute.as_str()),
        ];
        for (cell, text) in fields {
            if animator.target(cell).is_empty() {
                animator.set_committed(cell, text, queue);
                changed = true;
            } else {
                changed |= animator.flip(cell, text, queue);
            }
        }

        if self.last.as_ref() != Some(&sample) {
            changed = true;
            self.last = Some(sample);
        }
        changed
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipclock_core::ManualClock;

    #[test]
    fn test_first_sample_commits_directly() {
        let clock = ManualClock::at_time(9, 5, 0);
        let mut animator = FlipAnimator::default();
        let mut queue: TimerQueue<FlipTimer> = TimerQueue::new();
        let mut ticker = Ticker::default();

        assert!(ticker.tick(&clock, &mut animator, &mut queue));
        assert_eq!(animator.committed(CellId::Hour), "9");
        assert_eq!(animator.committed(CellId::Minute), "05");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_identical_samples_are_idempotent() {
        let clock = ManualClock::at_time(9, 5, 0);
        let mut animator = FlipAnimator::default();
        let mut queue: TimerQueue<FlipTimer> = TimerQueue::new();
        let mut ticker = Ticker::default();
        ticker.tick(&clock, &mut animator, &mut queue);

        clock.set_time(9, 6, 0);
        ticker.tick(&clock, &mut animator, &mut queue);
        let generation = animator.generation(CellId::Minute);
        let pending = queue.len();

        assert!(!ticker.tick(&clock, &mut animator, &mut queue));
        assert_eq!(animator.generation(CellId::Minute), generation);
        assert_eq!(queue.len(), pending);
    }

    #[test]
    fn test_unavailable_clock_keeps_last_sample() {
        let clock = ManualClock::at_time(21, 30, 0);
        let mut animator = FlipAnimator::default();
        let mut queue: TimerQueue<FlipTimer> = TimerQueue::new();
        let mut ticker = Ticker::default();
        ticker.tick(&clock, &mut animator, &mut queue);

        clock.set_unavailable();
        assert!(!ticker.tick(&clock, &mut animator, &mut queue));
        assert_eq!(ticker.last().map(|t| t.hour12), Some(9));
        assert_eq!(animator.committed(CellId::Minute), "30");
    }

    #[test]
    fn test_start_stop() {
        let mut queue: TimerQueue<()> = TimerQueue::new();
        let mut ticker = Ticker::default();
        ticker.start(&mut queue, ());
        ticker.start(&mut queue, ());
        assert_eq!(queue.len(), 1);
        ticker.stop(&mut queue);
        assert!(!ticker.is_running());
        assert!(queue.is_empty());
    }
}
