//! Flat state machines for widget interaction states
//!
//! Widgets keep their interaction state (open/closed, collapsed/overflowed,
//! hovered/dragging) in a [`StateMachine`] and derive DOM changes from the
//! state they land in, never from the event alone.

use smallvec::SmallVec;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an input event of a state machine
pub type EventId = u32;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub const fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: SmallVec<[Transition; 8]>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
        }
    }

    /// Add a transition (from, event, to)
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    current_state: StateId,
    transitions: SmallVec<[Transition; 8]>,
}

impl StateMachine {
    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Check if an event can trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.find(event).is_some()
    }

    /// Send an event, returning the (possibly unchanged) current state
    pub fn send(&mut self, event: EventId) -> StateId {
        if let Some(to) = self.find(event) {
            self.current_state = to;
        }
        self.current_state
    }

    fn find(&self, event: EventId) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|t| t.from_state == self.current_state && t.event == event)
            .map(|t| t.to_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOSED: StateId = 0;
    const OPEN: StateId = 1;

    const EV_OPEN: EventId = 1;
    const EV_CLOSE: EventId = 2;

    fn open_close() -> StateMachine {
        StateMachine::builder(CLOSED)
            .on(CLOSED, EV_OPEN, OPEN)
            .on(OPEN, EV_CLOSE, CLOSED)
            .build()
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = open_close();
        assert_eq!(fsm.current_state(), CLOSED);

        assert_eq!(fsm.send(EV_OPEN), OPEN);
        assert!(fsm.is_in(OPEN));

        assert_eq!(fsm.send(EV_CLOSE), CLOSED);
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = open_close();

        fsm.send(EV_CLOSE);
        assert_eq!(fsm.current_state(), CLOSED);
    }

    #[test]
    fn test_can_send() {
        let fsm = open_close();

        assert!(fsm.can_send(EV_OPEN));
        assert!(!fsm.can_send(EV_CLOSE));
    }
}
