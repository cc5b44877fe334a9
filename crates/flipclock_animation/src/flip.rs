//! Digit flip animator
//!
//! Each display cell holds a committed value. A flip snapshots the outgoing
//! face and the incoming value, arms on request, starts rotating on the next
//! frame and commits the incoming value once the flip duration has elapsed.
//!
//! Every request bumps the cell's generation. Start and commit timers carry
//! the generation they were scheduled for and are ignored when it no longer
//! matches, so a superseded flip can never overwrite a newer target. The
//! superseded flip's timers are also cancelled outright.

use crate::easing::Easing;
use flipclock_core::timer::{TimerId, TimerQueue};
use rustc_hash::FxHashMap;
use std::time::Duration;

/// Default flip duration
pub const DEFAULT_FLIP_DURATION: Duration = Duration::from_millis(400);

/// Display cells driven by the animator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellId {
    Hour,
    Minute,
}

impl CellId {
    pub const ALL: [CellId; 2] = [CellId::Hour, CellId::Minute];

    pub fn name(&self) -> &'static str {
        match self {
            CellId::Hour => "hour",
            CellId::Minute => "minute",
        }
    }
}

/// Timer payloads scheduled by the animator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipTimer {
    /// Next-frame callback that starts the rotation
    Start { cell: CellId, generation: u64 },
    /// Delayed commit of the incoming value
    Commit { cell: CellId, generation: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FlipPhase {
    /// Both faces exist, rotation not started yet
    Armed,
    Rotating { since: Duration },
}

#[derive(Clone, Debug)]
struct Flip {
    front: String,
    back: String,
    phase: FlipPhase,
    start_timer: TimerId,
    commit_timer: TimerId,
}

#[derive(Clone, Debug, Default)]
struct Cell {
    committed: String,
    generation: u64,
    flip: Option<Flip>,
}

impl Cell {
    /// The value this cell is showing or heading towards
    fn target(&self) -> &str {
        match &self.flip {
            Some(flip) => &flip.back,
            None => &self.committed,
        }
    }

    fn cancel_flip<T: Clone>(&mut self, queue: &mut TimerQueue<T>) -> Option<Flip> {
        let flip = self.flip.take()?;
        queue.cancel(flip.start_timer);
        queue.cancel(flip.commit_timer);
        Some(flip)
    }
}

/// What a cell looks like at a point in time
#[derive(Clone, Debug, PartialEq)]
pub enum CellView {
    /// Plain committed text
    Static { text: String },
    /// Two-sided rotation in progress. Angles are X rotations in degrees.
    Flipping {
        front: String,
        back: String,
        front_angle: f32,
        back_angle: f32,
        progress: f32,
    },
}

impl CellView {
    /// Text the cell settles on
    pub fn text(&self) -> &str {
        match self {
            CellView::Static { text } => text,
            CellView::Flipping { back, .. } => back,
        }
    }

    pub fn is_flipping(&self) -> bool {
        matches!(self, CellView::Flipping { .. })
    }
}

/// Owner of all display cells and their in-flight flips
pub struct FlipAnimator {
    cells: FxHashMap<CellId, Cell>,
    duration: Duration,
    easing: Easing,
}

impl FlipAnimator {
    pub fn new(duration: Duration) -> Self {
        Self {
            cells: FxHashMap::default(),
            duration,
            easing: Easing::EMPHASIZED,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Currently committed text of a cell
    pub fn committed(&self, cell: CellId) -> &str {
        self.cells.get(&cell).map(|c| c.committed.as_str()).unwrap_or("")
    }

    /// Text the cell shows or is flipping towards
    pub fn target(&self, cell: CellId) -> &str {
        self.cells.get(&cell).map(Cell::target).unwrap_or("")
    }

    /// Generation of the latest flip request for a cell
    pub fn generation(&self, cell: CellId) -> u64 {
        self.cells.get(&cell).map(|c| c.generation).unwrap_or(0)
    }

    pub fn is_flipping(&self, cell: CellId) -> bool {
        self.cells.get(&cell).is_some_and(|c| c.flip.is_some())
    }

    /// Replace a cell's value without animating, dropping any in-flight flip
    pub fn set_committed<T: From<FlipTimer> + Clone>(
        &mut self,
        cell: CellId,
        value: &str,
        queue: &mut TimerQueue<T>,
    ) {
        let state = self.cells.entry(cell).or_default();
        state.cancel_flip(queue);
        state.generation += 1;
        state.committed = value.to_string();
    }

    /// Request a flip of `cell` to `value`.
    ///
    /// Returns false (and does nothing) when the cell already shows or is
    /// already flipping towards `value`. A request for a cell that is
    /// mid-flip supersedes the running flip: the outgoing face becomes the
    /// value that flip was heading to.
    pub fn flip<T: From<FlipTimer> + Clone>(
        &mut self,
        cell: CellId,
        value: &str,
        queue: &mut TimerQueue<T>,
    ) -> bool {
        let duration = self.duration;
        let state = self.cells.entry(cell).or_default();
        if state.target() == value {
            return false;
        }

        let front = state.target().to_string();
        if let Some(previous) = state.cancel_flip(queue) {
            tracing::debug!(
                "{} flip to {:?} superseded by {:?}",
                cell.name(),
                previous.back,
                value
            );
        }

        state.generation += 1;
        let generation = state.generation;
        let start_timer = queue.request_frame(FlipTimer::Start { cell, generation }.into());
        let commit_timer = queue.schedule(duration, FlipTimer::Commit { cell, generation }.into());

        tracing::debug!("{} flip {:?} -> {:?} (gen {})", cell.name(), front, value, generation);
        state.flip = Some(Flip {
            front,
            back: value.to_string(),
            phase: FlipPhase::Armed,
            start_timer,
            commit_timer,
        });
        true
    }

    /// Handle a fired animator timer. Returns true if a cell changed.
    pub fn on_timer(&mut self, timer: FlipTimer, now: Duration) -> bool {
        let (cell, generation) = match timer {
            FlipTimer::Start { cell, generation } | FlipTimer::Commit { cell, generation } => {
                (cell, generation)
            }
        };
        let Some(state) = self.cells.get_mut(&cell) else {
            return false;
        };
        if state.generation != generation {
            tracing::trace!(
                "stale {:?} for {} (gen {}, current {})",
                timer,
                cell.name(),
                generation,
                state.generation
            );
            return false;
        }

        match timer {
            FlipTimer::Start { .. } => match state.flip.as_mut() {
                Some(flip) if flip.phase == FlipPhase::Armed => {
                    flip.phase = FlipPhase::Rotating { since: now };
                    true
                }
                _ => false,
            },
            FlipTimer::Commit { .. } => {
                let Some(flip) = state.flip.take() else {
                    return false;
                };
                tracing::debug!("{} committed {:?}", cell.name(), flip.back);
                state.committed = flip.back;
                true
            }
        }
    }

    /// Commit every in-flight target immediately and cancel its timers
    pub fn settle<T: Clone>(&mut self, queue: &mut TimerQueue<T>) {
        for state in self.cells.values_mut() {
            if let Some(flip) = state.cancel_flip(queue) {
                state.generation += 1;
                state.committed = flip.back;
            }
        }
    }

    /// Render a cell at virtual time `now`
    pub fn view(&self, cell: CellId, now: Duration) -> CellView {
        let Some(state) = self.cells.get(&cell) else {
            return CellView::Static {
                text: String::new(),
            };
        };
        let Some(flip) = &state.flip else {
            return CellView::Static {
                text: state.committed.clone(),
            };
        };

        let progress = match flip.phase {
            FlipPhase::Armed => 0.0,
            FlipPhase::Rotating { since } => {
                let total = self.duration.as_secs_f32();
                if total <= 0.0 {
                    1.0
                } else {
                    (now.saturating_sub(since).as_secs_f32() / total).clamp(0.0, 1.0)
                }
            }
        };
        let eased = self.easing.apply(progress);

        CellView::Flipping {
            front: flip.front.clone(),
            back: flip.back.clone(),
            front_angle: -180.0 * eased,
            back_angle: 180.0 * (1.0 - eased),
            progress,
        }
    }
}

impl Default for FlipAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_FLIP_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn pump(anim: &mut FlipAnimator, queue: &mut TimerQueue<FlipTimer>, until: Duration) {
        queue.advance_to(until);
        while let Some((_, timer)) = queue.pop_due() {
            anim.on_timer(timer, queue.now());
        }
    }

    fn setup(initial: &str) -> (FlipAnimator, TimerQueue<FlipTimer>) {
        let mut anim = FlipAnimator::default();
        let mut queue = TimerQueue::new();
        anim.set_committed(CellId::Minute, initial, &mut queue);
        (anim, queue)
    }

    #[test]
    fn test_same_value_is_noop() {
        let (mut anim, mut queue) = setup("05");
        assert!(!anim.flip(CellId::Minute, "05", &mut queue));
        assert!(queue.is_empty());
        assert!(!anim.is_flipping(CellId::Minute));
    }

    #[test]
    fn test_repeat_request_for_target_does_not_restart() {
        let (mut anim, mut queue) = setup("05");
        assert!(anim.flip(CellId::Minute, "06", &mut queue));
        let generation = anim.generation(CellId::Minute);

        assert!(!anim.flip(CellId::Minute, "06", &mut queue));
        assert_eq!(anim.generation(CellId::Minute), generation);
    }

    #[test]
    fn test_two_phase_flip() {
        let (mut anim, mut queue) = setup("05");
        anim.flip(CellId::Minute, "06", &mut queue);

        // Start phase: both faces, no rotation yet
        match anim.view(CellId::Minute, queue.now()) {
            CellView::Flipping {
                front,
                back,
                front_angle,
                back_angle,
                progress,
            } => {
                assert_eq!((front.as_str(), back.as_str()), ("05", "06"));
                assert_eq!((front_angle, back_angle, progress), (0.0, 180.0, 0.0));
            }
            other => panic!("expected flip, got {other:?}"),
        }

        pump(&mut anim, &mut queue, ms(200));
        match anim.view(CellId::Minute, queue.now()) {
            CellView::Flipping {
                front_angle,
                back_angle,
                progress,
                ..
            } => {
                assert!((progress - 0.5).abs() < 1e-6);
                assert!(front_angle < -90.0);
                assert!(back_angle < 90.0);
            }
            other => panic!("expected flip, got {other:?}"),
        }
        assert_eq!(anim.committed(CellId::Minute), "05");

        pump(&mut anim, &mut queue, ms(400));
        assert_eq!(
            anim.view(CellId::Minute, queue.now()),
            CellView::Static {
                text: "06".to_string()
            }
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_latest_request_wins() {
        let (mut anim, mut queue) = setup("05");
        anim.flip(CellId::Minute, "06", &mut queue);
        pump(&mut anim, &mut queue, ms(100));
        anim.flip(CellId::Minute, "07", &mut queue);

        // The superseded commit would have fired at 400ms
        pump(&mut anim, &mut queue, ms(450));
        assert_eq!(anim.committed(CellId::Minute), "05");
        assert_eq!(anim.target(CellId::Minute), "07");

        pump(&mut anim, &mut queue, ms(1000));
        assert_eq!(anim.committed(CellId::Minute), "07");
        assert!(!anim.is_flipping(CellId::Minute));
    }

    #[test]
    fn test_superseding_flip_starts_from_previous_target() {
        let (mut anim, mut queue) = setup("05");
        anim.flip(CellId::Minute, "06", &mut queue);
        anim.flip(CellId::Minute, "07", &mut queue);

        match anim.view(CellId::Minute, queue.now()) {
            CellView::Flipping { front, back, .. } => {
                assert_eq!((front.as_str(), back.as_str()), ("06", "07"));
            }
            other => panic!("expected flip, got {other:?}"),
        }
    }

    #[test]
    fn test_stale_commit_is_ignored() {
        let (mut anim, mut queue) = setup("05");
        anim.flip(CellId::Minute, "06", &mut queue);
        let stale = anim.generation(CellId::Minute);
        anim.flip(CellId::Minute, "07", &mut queue);

        let stale_commit = FlipTimer::Commit {
            cell: CellId::Minute,
            generation: stale,
        };
        assert!(!anim.on_timer(stale_commit, ms(400)));
        assert_eq!(anim.committed(CellId::Minute), "05");
        assert_eq!(anim.target(CellId::Minute), "07");
    }

    #[test]
    fn test_cells_are_independent() {
        let mut anim = FlipAnimator::default();
        let mut queue = TimerQueue::new();
        anim.set_committed(CellId::Hour, "9", &mut queue);
        anim.set_committed(CellId::Minute, "59", &mut queue);

        anim.flip(CellId::Hour, "10", &mut queue);
        anim.flip(CellId::Minute, "00", &mut queue);
        pump(&mut anim, &mut queue, ms(400));

        assert_eq!(anim.committed(CellId::Hour), "10");
        assert_eq!(anim.committed(CellId::Minute), "00");
    }

    #[test]
    fn test_settle_commits_targets() {
        let (mut anim, mut queue) = setup("05");
        anim.flip(CellId::Minute, "06", &mut queue);
        anim.settle(&mut queue);

        assert_eq!(anim.committed(CellId::Minute), "06");
        assert!(queue.is_empty());
    }
}
