//! Execution controller: the run state machine over an `ExecutionState`.

use super::closure::epsilon_closure;
use super::execution::{ExecutionState, ExecutionStatus};
use super::step::next_states;
use crate::core::{Automaton, StateSet, StepRecord};
use std::mem;
use tracing::debug;

/// Result of a single step call
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    /// One symbol was consumed
    Consumed {
        symbol: char,
        status: ExecutionStatus,
    },

    /// Nothing left to consume; status was re-derived from the active set
    Finalized(ExecutionStatus),

    /// The last step was undone
    Rewound { symbol: char },

    /// The call did not apply to the current position
    Ignored,
}

/// Drives one simulation run.
///
/// Every call completes synchronously and never fails. Calls that make no
/// sense for the current status return [`StepResult::Ignored`] so a UI can
/// invoke them freely. The automaton passed to each call must be the one the
/// run was started with.
///
/// # Example
///
/// ```rust
/// use automaton_lab::automaton;
/// use automaton_lab::engine::{ExecutionController, ExecutionStatus};
///
/// let automaton = automaton! {
///     states: [q0, q1],
///     start: q0,
///     accept: [q1],
///     transitions: [q0 -> q1: ["a"]],
/// }
/// .unwrap();
///
/// let mut controller = ExecutionController::new();
/// controller.start(&automaton, "a");
/// assert_eq!(controller.state().status(), ExecutionStatus::Running);
///
/// controller.step_forward(&automaton);
/// assert_eq!(controller.state().status(), ExecutionStatus::Accepted);
///
/// controller.step_backward();
/// assert_eq!(controller.state().status(), ExecutionStatus::Running);
/// assert_eq!(controller.state().remaining_input(), "a");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExecutionController {
    state: ExecutionState,
}

impl ExecutionController {
    /// Create an idle controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously captured state.
    pub fn from_state(state: ExecutionState) -> Self {
        Self { state }
    }

    /// Get the execution state (pure)
    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// Begin a run over `input`, discarding any previous run.
    ///
    /// Without a start state the run is rejected at once with the whole input
    /// left unread. The empty string is decided immediately from the start
    /// state's epsilon-closure with no history.
    pub fn start(&mut self, automaton: &Automaton, input: &str) -> &ExecutionState {
        let Some(start) = automaton.start_state() else {
            debug!(automaton = automaton.id(), "no start state, rejecting run");
            self.state = ExecutionState {
                remaining_input: input.to_string(),
                status: ExecutionStatus::Rejected,
                ..ExecutionState::default()
            };
            return &self.state;
        };

        let closure = epsilon_closure(automaton, &StateSet::from([start.id.clone()]));

        let status = if input.is_empty() {
            if automaton.any_accepting(&closure.states) {
                ExecutionStatus::Accepted
            } else {
                ExecutionStatus::Rejected
            }
        } else {
            ExecutionStatus::Running
        };

        debug!(
            automaton = automaton.id(),
            input_len = input.chars().count(),
            active = closure.states.len(),
            %status,
            "run started"
        );

        self.state = ExecutionState {
            current: closure.states,
            remaining_input: input.to_string(),
            status,
            ..ExecutionState::default()
        };
        &self.state
    }

    /// Consume the next input symbol.
    ///
    /// A dead configuration rejects immediately and leaves the rest of the
    /// input unread. Once the input is exhausted the status is decided by
    /// whether any active state accepts. When the run is terminal, or no
    /// input remains, nothing is consumed and the status is re-derived from
    /// the active set. Idle controllers ignore the call.
    pub fn step_forward(&mut self, automaton: &Automaton) -> StepResult {
        let state = &mut self.state;

        if state.status == ExecutionStatus::Idle {
            return StepResult::Ignored;
        }

        let symbol = match state.remaining_input.chars().next() {
            Some(symbol) if state.status == ExecutionStatus::Running => symbol,
            _ => {
                state.status = settle(automaton, &state.current);
                return StepResult::Finalized(state.status);
            }
        };

        let reach = next_states(automaton, &state.current, symbol.encode_utf8(&mut [0; 4]));
        let states_before = mem::replace(&mut state.current, reach.states);
        state.history.push(StepRecord {
            states_before,
            symbol,
            transitions_used: reach.transitions,
        });
        state.remaining_input.drain(..symbol.len_utf8());
        state.processed_input.push(symbol);
        state.step += 1;

        state.status = if state.current.is_empty() {
            ExecutionStatus::Rejected
        } else if state.remaining_input.is_empty() {
            settle(automaton, &state.current)
        } else {
            ExecutionStatus::Running
        };

        debug!(
            step = state.step,
            %symbol,
            active = state.current.len(),
            status = %state.status,
            "consumed symbol"
        );

        StepResult::Consumed {
            symbol,
            status: state.status,
        }
    }

    /// Undo the most recent forward step.
    ///
    /// The run always returns to `Running`, even from a terminal status.
    pub fn step_backward(&mut self) -> StepResult {
        let state = &mut self.state;

        if state.step == 0 {
            return StepResult::Ignored;
        }
        let Some(record) = state.history.pop() else {
            return StepResult::Ignored;
        };

        state.current = record.states_before;
        state.remaining_input.insert(0, record.symbol);
        state.processed_input.pop();
        state.step -= 1;
        state.status = ExecutionStatus::Running;

        debug!(step = state.step, symbol = %record.symbol, "rewound symbol");

        StepResult::Rewound {
            symbol: record.symbol,
        }
    }

    /// Step forward until the run leaves `Running`, returning the final status.
    pub fn run_to_end(&mut self, automaton: &Automaton) -> ExecutionStatus {
        while self.state.status == ExecutionStatus::Running {
            self.step_forward(automaton);
        }
        self.state.status
    }

    /// Return to idle, discarding the active set, history and input.
    pub fn reset(&mut self) {
        self.state = ExecutionState::default();
    }
}

fn settle(automaton: &Automaton, current: &StateSet) -> ExecutionStatus {
    if automaton.any_accepting(current) {
        ExecutionStatus::Accepted
    } else {
        ExecutionStatus::Rejected
    }
}

/// Run `input` to completion on a fresh controller.
///
/// ```rust
/// use automaton_lab::automaton;
/// use automaton_lab::engine::accepts;
///
/// let automaton = automaton! {
///     states: [q0],
///     start: q0,
///     accept: [q0],
///     transitions: [q0 -> q0: ["a"]],
/// }
/// .unwrap();
///
/// assert!(accepts(&automaton, "aaa"));
/// assert!(!accepts(&automaton, "aab"));
/// ```
pub fn accepts(automaton: &Automaton, input: &str) -> bool {
    let mut controller = ExecutionController::new();
    controller.start(automaton, input);
    controller.run_to_end(automaton) == ExecutionStatus::Accepted
}
