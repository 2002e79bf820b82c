//! State Machine Runtime
//!
//! Typed flat state machines for widget interaction states. The state type
//! owns its transition table through [`StateTransitions`]; the machine adds
//! entry/exit actions and a bounded transition history.
//!
//! ```rust
//! use attest_core::fsm::{StateMachine, StateTransitions};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Hover {
//!     Idle,
//!     Hovered,
//! }
//!
//! #[derive(Clone, Copy, Debug)]
//! enum HoverEvent {
//!     Enter,
//!     Leave,
//! }
//!
//! impl StateTransitions for Hover {
//!     type Event = HoverEvent;
//!
//!     fn on_event(&self, event: HoverEvent) -> Option<Self> {
//!         match (self, event) {
//!             (Hover::Idle, HoverEvent::Enter) => Some(Hover::Hovered),
//!             (Hover::Hovered, HoverEvent::Leave) => Some(Hover::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut fsm = StateMachine::new(Hover::Idle);
//! fsm.send(HoverEvent::Enter);
//! assert!(fsm.is_in(Hover::Hovered));
//! ```

use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Maximum number of transitions kept in history
const HISTORY_LIMIT: usize = 64;

/// A state type that knows its own transitions
pub trait StateTransitions: Copy + Eq + Hash + Debug {
    type Event: Copy + Debug;

    /// The state reached by `event`, or `None` if the event is ignored here
    fn on_event(&self, event: Self::Event) -> Option<Self>;
}

/// An action executed on entering or leaving a state
pub type Action = Box<dyn FnMut() + Send>;

/// A state machine instance
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    entry_callbacks: FxHashMap<S, Vec<Action>>,
    exit_callbacks: FxHashMap<S, Vec<Action>>,
    /// History of state transitions (for debugging)
    history: Vec<(S, S::Event, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            entry_callbacks: FxHashMap::default(),
            exit_callbacks: FxHashMap::default(),
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: S::Event) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event, returning the (possibly unchanged) current state
    pub fn send(&mut self, event: S::Event) -> S {
        let from = self.current_state;
        let Some(to) = from.on_event(event) else {
            return from;
        };

        if let Some(callbacks) = self.exit_callbacks.get_mut(&from) {
            for callback in callbacks.iter_mut() {
                callback();
            }
        }

        self.current_state = to;
        tracing::trace!(?from, ?event, ?to, "fsm transition");

        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((from, event, to));

        if let Some(callbacks) = self.entry_callbacks.get_mut(&to) {
            for callback in callbacks.iter_mut() {
                callback();
            }
        }

        to
    }

    /// Force the machine into `state` without running actions
    pub fn reset(&mut self, state: S) {
        self.current_state = state;
        self.history.clear();
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, S::Event, S)] {
        &self.history
    }

    /// Register an entry callback for a state
    pub fn on_enter<F: FnMut() + Send + 'static>(&mut self, state: S, callback: F) {
        self.entry_callbacks
            .entry(state)
            .or_default()
            .push(Box::new(callback));
    }

    /// Register an exit callback for a state
    pub fn on_exit<F: FnMut() + Send + 'static>(&mut self, state: S, callback: F) {
        self.exit_callbacks
            .entry(state)
            .or_default()
            .push(Box::new(callback));
    }
}

impl<S: StateTransitions> Debug for StateMachine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current_state", &self.current_state)
            .field("history_len", &self.history.len())
            .finish()
    }
}
