//! Integrity violations and the error that carries them.

use thiserror::Error;

/// A single broken integrity rule.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("State id '{id}' is used more than once")]
    DuplicateStateId { id: String },

    #[error("Transition id '{id}' is used more than once")]
    DuplicateTransitionId { id: String },

    #[error("Transition '{transition}' starts at unknown state '{state}'")]
    UnknownSource { transition: String, state: String },

    #[error("Transition '{transition}' ends at unknown state '{state}'")]
    UnknownDestination { transition: String, state: String },

    #[error("More than one start state: {ids:?}")]
    MultipleStartStates { ids: Vec<String> },

    #[error("Transition '{transition}' has no symbols")]
    EmptySymbols { transition: String },
}

/// Every violation found in one structure, in rule order.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("automaton has {} integrity violation(s): {}", .violations.len(), summarize(.violations))]
pub struct IntegrityError {
    pub violations: Vec<Violation>,
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
