//! States of an automaton.
//!
//! A state is plain data: an identity, a display name, a canvas position and
//! the two markers the simulation cares about. The position never influences
//! acceptance; it is carried so that documents round-trip what the editor drew.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of a state within one automaton.
pub type StateId = String;

/// Set of state ids, used for active-state sets and closures.
///
/// Ordered so that iteration and serialized output are deterministic.
pub type StateSet = BTreeSet<StateId>;

/// A single automaton state.
///
/// # Example
///
/// ```rust
/// use automaton_lab::core::State;
///
/// let state = State::new("q0", "q0", 120.0, 80.0).with_start(true);
///
/// assert!(state.is_start);
/// assert!(!state.is_accept);
/// assert_eq!(state.name, "q0");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct State {
    /// Unique id within the owning automaton
    pub id: StateId,
    /// Display name shown on the canvas
    pub name: String,
    /// Horizontal canvas position
    pub x: f64,
    /// Vertical canvas position
    pub y: f64,
    /// Whether the simulation begins here
    pub is_start: bool,
    /// Whether ending a run here accepts the input
    pub is_accept: bool,
}

impl State {
    /// Create a plain state that is neither start nor accepting.
    pub fn new(id: impl Into<StateId>, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x,
            y,
            is_start: false,
            is_accept: false,
        }
    }

    pub fn with_start(mut self, is_start: bool) -> Self {
        self.is_start = is_start;
        self
    }

    pub fn with_accept(mut self, is_accept: bool) -> Self {
        self.is_accept = is_accept;
        self
    }
}
