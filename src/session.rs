//! Editing session: one automaton, one execution.
//!
//! A `Session` is the explicit owner of everything a single user works on.
//! Structural edits are only accepted while no run is active, because the
//! recorded history refers to states and transitions by id and replays
//! against the automaton as it was when the run started.

use crate::config::LabConfig;
use crate::core::{Automaton, ModelError, State, StateId, Transition, TransitionId};
use crate::engine::{ExecutionController, ExecutionState, ExecutionStatus, StepResult};
use thiserror::Error;
use tracing::info;

/// Errors raised by session edits.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("Automaton cannot be edited while a run is {0}; reset the run first")]
    RunInProgress(ExecutionStatus),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// An automaton together with its single execution.
///
/// # Example
///
/// ```rust
/// use automaton_lab::engine::ExecutionStatus;
/// use automaton_lab::session::{Session, SessionError};
///
/// let mut session = Session::default();
/// let q0 = session.add_state(100.0, 100.0).unwrap();
/// let q1 = session.add_state(250.0, 100.0).unwrap();
/// session.add_transition(&q0, &q1, vec!["a".into()]).unwrap();
/// session.toggle_accept_state(&q1).unwrap();
///
/// session.test_string("a");
/// assert!(matches!(session.add_state(0.0, 0.0), Err(SessionError::RunInProgress(_))));
///
/// session.step_forward();
/// assert_eq!(session.execution().status(), ExecutionStatus::Accepted);
///
/// session.reset_execution();
/// assert!(session.add_state(0.0, 0.0).is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    automaton: Automaton,
    controller: ExecutionController,
    config: LabConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LabConfig::default())
    }
}

impl Session {
    /// Start a session on a fresh, empty automaton.
    pub fn new(config: LabConfig) -> Self {
        let automaton = Automaton::new(config.default_automaton_name.clone());
        Self::with_automaton(automaton, config)
    }

    pub fn with_automaton(automaton: Automaton, config: LabConfig) -> Self {
        Self {
            automaton,
            controller: ExecutionController::new(),
            config,
        }
    }

    /// Rebuild a session from a captured automaton and execution.
    pub(crate) fn from_parts(
        automaton: Automaton,
        execution: ExecutionState,
        config: LabConfig,
    ) -> Self {
        Self {
            automaton,
            controller: ExecutionController::from_state(execution),
            config,
        }
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn execution(&self) -> &ExecutionState {
        self.controller.state()
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    /// True while any run exists, including one that already terminated.
    pub fn is_testing(&self) -> bool {
        self.execution().status() != ExecutionStatus::Idle
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        match self.execution().status() {
            ExecutionStatus::Idle => Ok(()),
            status => Err(SessionError::RunInProgress(status)),
        }
    }

    // Structural edits

    /// Add a state named after the current state count.
    pub fn add_state(&mut self, x: f64, y: f64) -> Result<StateId, SessionError> {
        self.ensure_editable()?;
        let name = self.config.state_name(self.automaton.states().len());
        Ok(self.automaton.add_state(name, x, y))
    }

    pub fn rename_state(&mut self, id: &str, name: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_editable()?;
        Ok(self.automaton.rename_state(id, name)?)
    }

    /// Reposition a state. Positions do not affect simulation, so this is
    /// allowed during a run.
    pub fn move_state(&mut self, id: &str, x: f64, y: f64) -> Result<(), SessionError> {
        Ok(self.automaton.move_state(id, x, y)?)
    }

    pub fn delete_state(&mut self, id: &str) -> Result<State, SessionError> {
        self.ensure_editable()?;
        Ok(self.automaton.delete_state(id)?)
    }

    pub fn set_start_state(&mut self, id: &str) -> Result<(), SessionError> {
        self.ensure_editable()?;
        Ok(self.automaton.set_start_state(id)?)
    }

    pub fn toggle_accept_state(&mut self, id: &str) -> Result<bool, SessionError> {
        self.ensure_editable()?;
        Ok(self.automaton.toggle_accept_state(id)?)
    }

    /// Add or merge a transition. A brand-new transition without symbols
    /// fires on the configured default symbol.
    pub fn add_transition(
        &mut self,
        from: &str,
        to: &str,
        mut symbols: Vec<String>,
    ) -> Result<TransitionId, SessionError> {
        self.ensure_editable()?;
        if symbols.is_empty() && self.automaton.transition_between(from, to).is_none() {
            symbols.push(self.config.default_symbol.clone());
        }
        Ok(self.automaton.add_transition(from, to, symbols)?)
    }

    pub fn set_transition_symbols(
        &mut self,
        id: &str,
        symbols: Vec<String>,
    ) -> Result<(), SessionError> {
        self.ensure_editable()?;
        Ok(self.automaton.set_transition_symbols(id, symbols)?)
    }

    pub fn delete_transition(&mut self, id: &str) -> Result<Transition, SessionError> {
        self.ensure_editable()?;
        Ok(self.automaton.delete_transition(id)?)
    }

    pub fn rename_automaton(&mut self, name: impl Into<String>) {
        self.automaton.rename(name);
    }

    /// Remove every state and transition and end any run.
    pub fn clear_canvas(&mut self) {
        self.controller.reset();
        self.automaton.clear();
    }

    /// Replace the automaton with an empty one and end any run.
    pub fn new_automaton(&mut self) {
        self.controller.reset();
        self.automaton = Automaton::new(self.config.default_automaton_name.clone());
    }

    /// Replace the automaton with a loaded one and end any run.
    pub fn load(&mut self, automaton: Automaton) {
        info!(
            automaton = automaton.id(),
            states = automaton.states().len(),
            transitions = automaton.transitions().len(),
            "loaded automaton into session"
        );
        self.controller.reset();
        self.automaton = automaton;
    }

    // Simulation

    pub fn test_string(&mut self, input: &str) -> &ExecutionState {
        self.controller.start(&self.automaton, input)
    }

    pub fn step_forward(&mut self) -> StepResult {
        self.controller.step_forward(&self.automaton)
    }

    pub fn step_backward(&mut self) -> StepResult {
        self.controller.step_backward()
    }

    pub fn run_to_end(&mut self) -> ExecutionStatus {
        self.controller.run_to_end(&self.automaton)
    }

    pub fn reset_execution(&mut self) {
        self.controller.reset();
    }
}
