//! Builder for constructing automata.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::config::DEFAULT_AUTOMATON_NAME;
use crate::core::{generate_id, Automaton, State, StateId, Transition};

/// Horizontal spacing used when states are laid out automatically.
const LAYOUT_SPACING: f64 = 160.0;
const LAYOUT_ORIGIN: (f64, f64) = (120.0, 160.0);

/// Builder for constructing automata with a fluent API.
///
/// States declared with [`state`](Self::state) use their id as display name
/// and are laid out left to right. Transitions added with
/// [`add_transition`](Self::add_transition) get the ids `t0`, `t1`, ... in
/// declaration order.
///
/// # Example
///
/// ```rust
/// use automaton_lab::builder::AutomatonBuilder;
///
/// let automaton = AutomatonBuilder::new()
///     .name("ends in b")
///     .state("q0")
///     .state("q1")
///     .start("q0")
///     .accept("q1")
///     .add_transition("q0", "q0", ["a", "b"])
///     .add_transition("q0", "q1", ["b"])
///     .build()
///     .unwrap();
///
/// assert_eq!(automaton.states().len(), 2);
/// assert_eq!(automaton.transition("t1").unwrap().to, "q1");
/// ```
#[derive(Debug, Default)]
pub struct AutomatonBuilder {
    id: Option<String>,
    name: Option<String>,
    states: Vec<State>,
    start: Option<StateId>,
    accepting: Vec<StateId>,
    transitions: Vec<Transition>,
}

impl AutomatonBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the automaton id (optional, generated when absent).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the display name (optional).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare a state at the next automatic layout position.
    pub fn state(self, id: impl Into<StateId>) -> Self {
        let index = self.states.len() as f64;
        let x = LAYOUT_ORIGIN.0 + LAYOUT_SPACING * index;
        self.state_at(id, x, LAYOUT_ORIGIN.1)
    }

    /// Declare a state at an explicit position.
    pub fn state_at(mut self, id: impl Into<StateId>, x: f64, y: f64) -> Self {
        let id = id.into();
        self.states.push(State::new(id.clone(), id, x, y));
        self
    }

    /// Mark the start state. A later call replaces an earlier one.
    pub fn start(mut self, id: impl Into<StateId>) -> Self {
        self.start = Some(id.into());
        self
    }

    /// Mark an accepting state.
    pub fn accept(mut self, id: impl Into<StateId>) -> Self {
        self.accepting.push(id.into());
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a transition with the next sequential id.
    pub fn add_transition<I, S>(
        mut self,
        from: impl Into<StateId>,
        to: impl Into<StateId>,
        symbols: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = format!("t{}", self.transitions.len());
        self.transitions.push(Transition::new(id, from, to, symbols));
        self
    }

    /// Build the automaton.
    /// Returns an error if markers name undeclared states or the structure
    /// breaks an integrity rule.
    pub fn build(mut self) -> Result<Automaton, BuildError> {
        if let Some(start) = &self.start {
            let state = self
                .states
                .iter_mut()
                .find(|s| &s.id == start)
                .ok_or_else(|| BuildError::UnknownStartState(start.clone()))?;
            state.is_start = true;
        }

        for accept in &self.accepting {
            let state = self
                .states
                .iter_mut()
                .find(|s| &s.id == accept)
                .ok_or_else(|| BuildError::UnknownAcceptState(accept.clone()))?;
            state.is_accept = true;
        }

        let automaton = Automaton::from_parts(
            self.id.unwrap_or_else(generate_id),
            self.name.unwrap_or_else(|| DEFAULT_AUTOMATON_NAME.to_string()),
            self.states,
            self.transitions,
        )?;
        Ok(automaton)
    }
}
