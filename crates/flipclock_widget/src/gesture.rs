//! Long-press gesture detector
//!
//! ```text
//! Idle --PressStart--> Pressing --HoldElapsed--> Activated
//!   ^                     |                          |
//!   +------PressEnd-------+     PressEnd/MenuClosed--+
//! ```
//!
//! Entering `Pressing` arms the hold timer; leaving it early cancels the
//! timer. Activation shows the ring, schedules the menu open and requests a
//! haptic pulse when the host has a sink. Releasing after activation hides the
//! ring but does not cancel the pending menu open; only a dismissal does.

use flipclock_core::{HapticSink, PointerEvent, StateMachine, TimerId, TimerQueue};
use std::sync::Arc;
use std::time::Duration;

/// Default hold threshold
pub const DEFAULT_HOLD: Duration = Duration::from_millis(1500);

/// Default delay between activation and the menu opening
pub const DEFAULT_MENU_DELAY: Duration = Duration::from_millis(300);

/// Default haptic pulse length
pub const DEFAULT_HAPTIC: Duration = Duration::from_millis(50);

/// Press phases
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PressPhase {
    #[default]
    Idle,
    Pressing,
    Activated,
}

/// Inputs to the press state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PressEvent {
    PressStart,
    PressEnd,
    HoldElapsed,
    MenuClosed,
}

/// Timer payloads scheduled by the detector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureTimer {
    Hold,
    OpenMenu,
}

/// What the owner should do after a gesture timer fired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureAction {
    /// Hold threshold reached, ring shown
    Activated,
    /// Time to open the settings menu
    OpenMenu,
}

/// Timing parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureTiming {
    pub hold: Duration,
    pub menu_delay: Duration,
    pub haptic: Duration,
}

impl Default for GestureTiming {
    fn default() -> Self {
        Self {
            hold: DEFAULT_HOLD,
            menu_delay: DEFAULT_MENU_DELAY,
            haptic: DEFAULT_HAPTIC,
        }
    }
}

/// Detects a primary-pointer hold on the widget surface
pub struct LongPressDetector {
    fsm: StateMachine<PressPhase, PressEvent>,
    timing: GestureTiming,
    hold_timer: Option<TimerId>,
    open_timer: Option<TimerId>,
    ring_since: Option<Duration>,
}

impl LongPressDetector {
    pub fn new(timing: GestureTiming) -> Self {
        let fsm = StateMachine::builder(PressPhase::Idle)
            .on(PressPhase::Idle, PressEvent::PressStart, PressPhase::Pressing)
            .on(PressPhase::Pressing, PressEvent::PressEnd, PressPhase::Idle)
            .on(PressPhase::Pressing, PressEvent::HoldElapsed, PressPhase::Activated)
            .on(PressPhase::Activated, PressEvent::PressEnd, PressPhase::Idle)
            .on(PressPhase::Activated, PressEvent::MenuClosed, PressPhase::Idle)
            .build();
        Self {
            fsm,
            timing,
            hold_timer: None,
            open_timer: None,
            ring_since: None,
        }
    }

    pub fn phase(&self) -> PressPhase {
        self.fsm.current_state()
    }

    /// Virtual time the activation ring was shown at, while it is visible
    pub fn ring_since(&self) -> Option<Duration> {
        self.ring_since
    }

    pub fn is_ring_active(&self) -> bool {
        self.ring_since.is_some()
    }

    /// Whether a hold timer is armed
    pub fn is_holding(&self) -> bool {
        self.hold_timer.is_some()
    }

    /// Whether an activation is waiting to open the menu
    pub fn is_menu_pending(&self) -> bool {
        self.open_timer.is_some()
    }

    /// Cancel a menu open scheduled by the last activation.
    ///
    /// Returns false if nothing was pending.
    pub fn cancel_pending_open<T: Clone>(&mut self, queue: &mut TimerQueue<T>) -> bool {
        let Some(id) = self.open_timer.take() else {
            return false;
        };
        queue.cancel(id);
        tracing::debug!("pending menu open cancelled");
        true
    }

    /// Feed a pointer event from the widget surface.
    ///
    /// Returns whether the press phase changed.
    pub fn on_pointer<T: From<GestureTimer> + Clone>(
        &mut self,
        event: PointerEvent,
        queue: &mut TimerQueue<T>,
    ) -> bool {
        if event.is_press_start() {
            self.press_start(queue)
        } else if event.is_press_end() {
            self.press_end(queue)
        } else {
            tracing::trace!("ignoring {:?} press", event.button);
            false
        }
    }

    fn press_start<T: From<GestureTimer> + Clone>(&mut self, queue: &mut TimerQueue<T>) -> bool {
        if self.fsm.send(PressEvent::PressStart).is_none() {
            return false;
        }
        self.hold_timer = Some(queue.schedule(self.timing.hold, GestureTimer::Hold.into()));
        tracing::debug!("press started");
        true
    }

    fn press_end<T: Clone>(&mut self, queue: &mut TimerQueue<T>) -> bool {
        let Some(transition) = self.fsm.send(PressEvent::PressEnd) else {
            return false;
        };
        if let Some(id) = self.hold_timer.take() {
            queue.cancel(id);
        }
        self.ring_since = None;
        tracing::debug!("press released from {:?}", transition.from_state);
        true
    }

    /// Handle a fired gesture timer
    pub fn on_timer<T: From<GestureTimer> + Clone>(
        &mut self,
        timer: GestureTimer,
        queue: &mut TimerQueue<T>,
        haptics: Option<&Arc<dyn HapticSink>>,
    ) -> Option<GestureAction> {
        match timer {
            GestureTimer::Hold => {
                self.hold_timer = None;
                self.fsm.send(PressEvent::HoldElapsed)?;
                self.ring_since = Some(queue.now());
                self.open_timer =
                    Some(queue.schedule(self.timing.menu_delay, GestureTimer::OpenMenu.into()));
                match haptics {
                    Some(sink) => sink.pulse(self.timing.haptic),
                    None => tracing::trace!("no haptic sink, skipping pulse"),
                }
                tracing::debug!("long press activated");
                Some(GestureAction::Activated)
            }
            GestureTimer::OpenMenu => {
                self.open_timer.take()?;
                Some(GestureAction::OpenMenu)
            }
        }
    }

    /// The menu was dismissed
    pub fn menu_closed(&mut self) {
        if self.fsm.send(PressEvent::MenuClosed).is_some() {
            self.ring_since = None;
        }
    }

    /// Drop any press in progress along with its timers
    pub fn reset<T: Clone>(&mut self, queue: &mut TimerQueue<T>) {
        if let Some(id) = self.hold_timer.take() {
            queue.cancel(id);
        }
        self.cancel_pending_open(queue);
        self.fsm.reset();
        self.ring_since = None;
    }
}

impl Default for LongPressDetector {
    fn default() -> Self {
        Self::new(GestureTiming::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipclock_core::PointerButton;
    use std::sync::Mutex;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn pump(
        detector: &mut LongPressDetector,
        queue: &mut TimerQueue<GestureTimer>,
        until: Duration,
        haptics: Option<&Arc<dyn HapticSink>>,
    ) -> Vec<GestureAction> {
        let mut actions = Vec::new();
        queue.advance_to(until);
        while let Some((_, timer)) = queue.pop_due() {
            actions.extend(detector.on_timer(timer, queue, haptics));
        }
        actions
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Duration>>);

    impl HapticSink for Recorder {
        fn pulse(&self, duration: Duration) {
            self.0.lock().unwrap().push(duration);
        }
    }

    #[test]
    fn test_release_before_threshold_cancels_hold() {
        let mut detector = LongPressDetector::default();
        let mut queue = TimerQueue::new();

        assert!(detector.on_pointer(PointerEvent::mouse_down(PointerButton::Primary), &mut queue));
        assert_eq!(detector.phase(), PressPhase::Pressing);
        pump(&mut detector, &mut queue, ms(1490), None);

        assert!(detector.on_pointer(PointerEvent::mouse_up(), &mut queue));
        assert_eq!(detector.phase(), PressPhase::Idle);
        assert!(queue.is_empty());
        assert!(pump(&mut detector, &mut queue, ms(5000), None).is_empty());
    }

    #[test]
    fn test_hold_activates_then_opens_menu() {
        let sink = Arc::new(Recorder::default());
        let haptics: Arc<dyn HapticSink> = sink.clone();
        let mut detector = LongPressDetector::default();
        let mut queue = TimerQueue::new();

        detector.on_pointer(PointerEvent::touch_start(), &mut queue);
        let actions = pump(&mut detector, &mut queue, ms(1500), Some(&haptics));
        assert_eq!(actions, vec![GestureAction::Activated]);
        assert_eq!(detector.phase(), PressPhase::Activated);
        assert_eq!(detector.ring_since(), Some(ms(1500)));
        assert_eq!(*sink.0.lock().unwrap(), vec![DEFAULT_HAPTIC]);

        let actions = pump(&mut detector, &mut queue, ms(1800), Some(&haptics));
        assert_eq!(actions, vec![GestureAction::OpenMenu]);
    }

    #[test]
    fn test_release_after_activation_keeps_menu_open_pending() {
        let mut detector = LongPressDetector::default();
        let mut queue = TimerQueue::new();

        detector.on_pointer(PointerEvent::mouse_down(PointerButton::Primary), &mut queue);
        pump(&mut detector, &mut queue, ms(1600), None);
        detector.on_pointer(PointerEvent::mouse_leave(), &mut queue);
        assert_eq!(detector.phase(), PressPhase::Idle);
        assert!(!detector.is_ring_active());

        let actions = pump(&mut detector, &mut queue, ms(1800), None);
        assert_eq!(actions, vec![GestureAction::OpenMenu]);
        assert!(!detector.is_menu_pending());
    }

    #[test]
    fn test_cancel_pending_open() {
        let mut detector = LongPressDetector::default();
        let mut queue = TimerQueue::new();

        detector.on_pointer(PointerEvent::touch_start(), &mut queue);
        pump(&mut detector, &mut queue, ms(1500), None);
        detector.on_pointer(PointerEvent::touch_end(), &mut queue);
        assert!(detector.is_menu_pending());

        assert!(detector.cancel_pending_open(&mut queue));
        assert!(!detector.cancel_pending_open(&mut queue));
        assert!(queue.is_empty());
        assert!(pump(&mut detector, &mut queue, ms(2000), None).is_empty());
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let mut detector = LongPressDetector::default();
        let mut queue: TimerQueue<GestureTimer> = TimerQueue::new();

        assert!(!detector.on_pointer(PointerEvent::mouse_down(PointerButton::Secondary), &mut queue));
        assert!(!detector.on_pointer(PointerEvent::mouse_down(PointerButton::Auxiliary), &mut queue));
        assert_eq!(detector.phase(), PressPhase::Idle);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_activation_is_not_reentered_without_idle() {
        let mut detector = LongPressDetector::default();
        let mut queue = TimerQueue::new();

        detector.on_pointer(PointerEvent::touch_start(), &mut queue);
        pump(&mut detector, &mut queue, ms(1500), None);
        // A second press while activated is not a new press
        assert!(!detector.on_pointer(PointerEvent::touch_start(), &mut queue));
        assert!(!detector.is_holding());

        detector.menu_closed();
        assert_eq!(detector.phase(), PressPhase::Idle);
    }
}
