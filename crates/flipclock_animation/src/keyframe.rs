//! Keyframe tracks
//!
//! A track maps elapsed time to a value. Tracks hold no playback state, so
//! the same track can be sampled for any number of widgets from their own
//! virtual clocks.

use crate::easing::Easing;
use std::time::Duration;

/// A single keyframe
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Time position (0.0 to 1.0)
    pub time: f32,
    /// Value at this keyframe
    pub value: f32,
    /// Easing used when transitioning TO this keyframe
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(time: f32, value: f32, easing: Easing) -> Self {
        Self {
            time: time.clamp(0.0, 1.0),
            value,
            easing,
        }
    }
}

/// A single-value keyframe track
#[derive(Clone, Debug)]
pub struct KeyframeTrack {
    duration: Duration,
    keyframes: Vec<Keyframe>,
    looping: bool,
}

impl KeyframeTrack {
    pub fn new(duration: Duration, mut keyframes: Vec<Keyframe>) -> Self {
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            duration,
            keyframes,
            looping: false,
        }
    }

    /// Repeat the track forever
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether a one-shot track has run to completion
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        !self.looping && elapsed >= self.duration
    }

    /// Normalized position within the (current iteration of the) track
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let total = self.duration.as_nanos();
        if total == 0 {
            return 1.0;
        }
        let elapsed = elapsed.as_nanos();
        if self.looping {
            (elapsed % total) as f32 / total as f32
        } else {
            (elapsed.min(total) as f32 / total as f32).clamp(0.0, 1.0)
        }
    }

    /// Sample the track value after `elapsed`
    pub fn sample(&self, elapsed: Duration) -> f32 {
        let Some(first) = self.keyframes.first() else {
            return 0.0;
        };
        let progress = self.progress(elapsed);

        let mut prev = first;
        let mut next = first;
        for kf in &self.keyframes {
            if kf.time <= progress {
                prev = kf;
            }
            if kf.time >= progress {
                next = kf;
                break;
            }
            next = kf;
        }

        let span = next.time - prev.time;
        if span.abs() < f32::EPSILON {
            return if progress >= next.time { next.value } else { prev.value };
        }

        let local = (progress - prev.time) / span;
        prev.value + (next.value - prev.value) * next.easing.apply(local)
    }
}
