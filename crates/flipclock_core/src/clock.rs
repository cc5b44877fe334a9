//! Wall-clock sources
//!
//! The ticker samples local wall-clock time through [`WallClock`]. A source
//! may be unavailable (`None`); callers keep their last good reading.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// A source of local wall-clock time
pub trait WallClock: Send + Sync {
    /// Current local date and time, or `None` if the source is unavailable
    fn now(&self) -> Option<NaiveDateTime>;
}

/// The host's local system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> Option<NaiveDateTime> {
        Some(Local::now().naive_local())
    }
}

/// A settable clock for tests and scripted scenarios.
///
/// Clones share the same reading.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    reading: Arc<Mutex<Option<NaiveDateTime>>>,
}

impl ManualClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            reading: Arc::new(Mutex::new(Some(at))),
        }
    }

    /// A clock reading `hour:minute:second` on an arbitrary fixed date
    pub fn at_time(hour: u32, minute: u32, second: u32) -> Self {
        let clock = Self::default();
        clock.set_time(hour, minute, second);
        clock
    }

    /// Set the full reading
    pub fn set(&self, at: NaiveDateTime) {
        *self.lock() = Some(at);
    }

    /// Change the time of day, keeping the current date.
    ///
    /// Out-of-range components are ignored with a warning.
    pub fn set_time(&self, hour: u32, minute: u32, second: u32) {
        let mut reading = self.lock();
        let date = reading.map(|dt| dt.date()).unwrap_or_else(default_date);
        match date.and_hms_opt(hour, minute, second) {
            Some(at) => *reading = Some(at),
            None => tracing::warn!("ignoring invalid time {hour}:{minute}:{second}"),
        }
    }

    /// Move the reading forward
    pub fn advance(&self, by: Duration) {
        let Ok(delta) = TimeDelta::from_std(by) else {
            tracing::warn!("clock advance of {:?} out of range", by);
            return;
        };
        let mut reading = self.lock();
        if let Some(at) = reading.as_mut() {
            if let Some(next) = at.checked_add_signed(delta) {
                *at = next;
            }
        }
    }

    /// Make the clock unreadable
    pub fn set_unavailable(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<NaiveDateTime>> {
        self.reading.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WallClock for ManualClock {
    fn now(&self) -> Option<NaiveDateTime> {
        *self.lock()
    }
}

fn default_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::at_time(9, 5, 0);
        let other = clock.clone();

        other.advance(Duration::from_secs(60));
        let now = clock.now().unwrap();
        assert_eq!((now.hour(), now.minute()), (9, 6));
    }

    #[test]
    fn test_set_time_keeps_date() {
        let clock = ManualClock::at_time(23, 59, 59);
        clock.advance(Duration::from_secs(1));
        let midnight = clock.now().unwrap();
        assert_eq!(midnight.hour(), 0);

        clock.set_time(12, 0, 0);
        assert_eq!(clock.now().unwrap().date(), midnight.date());
    }

    #[test]
    fn test_invalid_time_is_ignored() {
        let clock = ManualClock::at_time(8, 0, 0);
        clock.set_time(24, 0, 0);
        assert_eq!(clock.now().unwrap().hour(), 8);
    }

    #[test]
    fn test_unavailable() {
        let clock = ManualClock::at_time(8, 0, 0);
        clock.set_unavailable();
        assert!(clock.now().is_none());
        // Advancing an unavailable clock is a no-op
        clock.advance(Duration::from_secs(5));
        assert!(clock.now().is_none());
    }

    #[test]
    fn test_system_clock_reads() {
        assert!(SystemClock.now().is_some());
    }
}
