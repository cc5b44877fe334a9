//! Timer queue
//!
//! A virtual, monotonic, single-threaded queue of delayed callbacks. Timers
//! carry a payload instead of a closure; the owner pops due payloads and
//! dispatches them, so handlers can freely borrow the owner mutably and
//! schedule further timers.
//!
//! Ordering: due timers fire by due time, then by insertion order. A handler
//! that schedules a timer falling due within the current horizon sees it fire
//! in the same pass. Next-frame requests fire on the following
//! [`TimerQueue::advance_to`] pass, never in the pass that requested them.

use slotmap::{new_key_type, SlotMap};
use std::time::Duration;

new_key_type! {
    /// Handle to a scheduled timer. Handles of fired or cancelled timers are inert.
    pub struct TimerId;
}

/// Smallest period accepted for repeating timers
const MIN_PERIOD: Duration = Duration::from_millis(1);

struct TimerEntry<T> {
    due: Duration,
    seq: u64,
    /// First frame this entry may fire in
    frame: u64,
    period: Option<Duration>,
    payload: T,
}

/// The timer queue owned by a widget instance
pub struct TimerQueue<T> {
    entries: SlotMap<TimerId, TimerEntry<T>>,
    now: Duration,
    horizon: Duration,
    frame: u64,
    next_seq: u64,
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            now: Duration::ZERO,
            horizon: Duration::ZERO,
            frame: 0,
            next_seq: 0,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a one-shot timer `delay` from now
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        self.insert(self.now + delay, self.frame, None, payload)
    }

    /// Schedule a repeating timer, first firing one `period` from now
    pub fn schedule_repeating(&mut self, period: Duration, payload: T) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.insert(self.now + period, self.frame, Some(period), payload)
    }

    /// Request a callback on the next frame
    pub fn request_frame(&mut self, payload: T) -> TimerId {
        self.insert(self.now, self.frame + 1, None, payload)
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Cancel every pending timer
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether `id` is still pending
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.values().map(|e| e.due).min()
    }

    /// Open a new frame that fires everything due up to `until`.
    ///
    /// A horizon earlier than the current time is clamped; virtual time never
    /// runs backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.horizon = until.max(self.now);
        self.frame += 1;
    }

    /// Pop the next due payload in the current frame.
    ///
    /// The queue clock moves to the timer's due time before returning it.
    /// Returns `None` once nothing else is due; the clock then rests at the
    /// frame horizon.
    pub fn pop_due(&mut self) -> Option<(TimerId, T)> {
        let horizon = self.horizon;
        let frame = self.frame;
        let next = self
            .entries
            .iter()
            .filter(|(_, e)| e.due <= horizon && e.frame <= frame)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(id, _)| id);

        let Some(id) = next else {
            self.now = horizon;
            return None;
        };

        let due = self.entries[id].due;
        self.now = self.now.max(due);

        let period = self.entries[id].period;
        match period {
            Some(period) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[id];
                entry.due += period;
                entry.seq = seq;
                Some((id, entry.payload.clone()))
            }
            None => self.entries.remove(id).map(|e| (id, e.payload)),
        }
    }

    fn insert(&mut self, due: Duration, frame: u64, period: Option<Duration>, payload: T) -> TimerId {
        let seq = self.bump_seq();
        self.entries.insert(TimerEntry {
            due,
            seq,
            frame,
            period,
            payload,
        })
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl<T: Clone> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
