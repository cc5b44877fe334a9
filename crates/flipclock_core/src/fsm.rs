//! State Machine Runtime
//!
//! Flat, typed state machines for widget interaction states.
//! Supports:
//! - Transition tables keyed by (state, event)
//! - Bounded transition history
//!
//! Side effects (timers, visual cues) stay with the owner of the machine: `send`
//! reports which transition was taken and the owner reacts to it.

use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt::Debug;

/// Default number of transitions retained in history
const DEFAULT_HISTORY: usize = 32;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
}

impl<S, E> Transition<S, E> {
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: SmallVec<[Transition<S, E>; 8]>,
    history_limit: usize,
}

impl<S: Copy + Eq + Debug, E: Copy + Eq + Debug> StateMachineBuilder<S, E> {
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
            history_limit: DEFAULT_HISTORY,
        }
    }

    /// Add a transition (from, event, to)
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Limit how many transitions are kept in history
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            initial_state: self.initial_state,
            current_state: self.initial_state,
            transitions: self.transitions,
            history: VecDeque::new(),
            history_limit: self.history_limit,
        }
    }
}

/// A state machine instance
pub struct StateMachine<S, E> {
    initial_state: S,
    current_state: S,
    transitions: SmallVec<[Transition<S, E>; 8]>,
    /// Most recent transitions, oldest first
    history: VecDeque<Transition<S, E>>,
    history_limit: usize,
}

impl<S: Copy + Eq + Debug, E: Copy + Eq + Debug> StateMachine<S, E> {
    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Transition<S, E>> {
        self.history.iter()
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: E) -> bool {
        self.find(event).is_some()
    }

    /// Send an event, returning the transition taken (if any)
    pub fn send(&mut self, event: E) -> Option<Transition<S, E>> {
        let transition = self.find(event)?;
        self.current_state = transition.to_state;

        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.pop_front();
            }
            self.history.push_back(transition);
        }

        tracing::trace!(
            "fsm: {:?} --{:?}--> {:?}",
            transition.from_state,
            event,
            transition.to_state
        );
        Some(transition)
    }

    /// Return to the initial state without recording a transition
    pub fn reset(&mut self) {
        self.current_state = self.initial_state;
    }

    fn find(&self, event: E) -> Option<Transition<S, E>> {
        let current = self.current_state;
        self.transitions
            .iter()
            .find(|t| t.from_state == current && t.event == event)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum State {
        Idle,
        Hovered,
        Pressed,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Event {
        Enter,
        Leave,
        Down,
        Up,
    }

    fn button() -> StateMachine<State, Event> {
        StateMachine::builder(State::Idle)
            .on(State::Idle, Event::Enter, State::Hovered)
            .on(State::Hovered, Event::Leave, State::Idle)
            .on(State::Hovered, Event::Down, State::Pressed)
            .on(State::Pressed, Event::Up, State::Hovered)
            .build()
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = button();
        assert_eq!(fsm.current_state(), State::Idle);

        fsm.send(Event::Enter);
        assert_eq!(fsm.current_state(), State::Hovered);

        fsm.send(Event::Down);
        assert!(fsm.is_in(State::Pressed));

        fsm.send(Event::Up);
        fsm.send(Event::Leave);
        assert_eq!(fsm.current_state(), State::Idle);
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = button();
        assert_eq!(fsm.send(Event::Down), None);
        assert_eq!(fsm.current_state(), State::Idle);
        assert!(!fsm.can_send(Event::Down));
        assert!(fsm.can_send(Event::Enter));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = StateMachine::builder(State::Idle)
            .on(State::Idle, Event::Enter, State::Hovered)
            .on(State::Hovered, Event::Leave, State::Idle)
            .history_limit(2)
            .build();

        fsm.send(Event::Enter);
        fsm.send(Event::Leave);
        fsm.send(Event::Enter);

        let history: Vec<_> = fsm.history().copied().collect();
        assert_eq!(
            history,
            vec![
                Transition::new(State::Hovered, Event::Leave, State::Idle),
                Transition::new(State::Idle, Event::Enter, State::Hovered),
            ]
        );
    }

    #[test]
    fn test_reset() {
        let mut fsm = button();
        fsm.send(Event::Enter);
        fsm.reset();
        assert!(fsm.is_in(State::Idle));
    }
}
