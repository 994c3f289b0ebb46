//! Build errors for automaton and transition builders.

use crate::validation::IntegrityError;
use thiserror::Error;

/// Errors that can occur when building automata and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition symbols not specified. Call .on(symbol) or .on_epsilon()")]
    MissingSymbols,

    #[error("Start state '{0}' was never declared. Call .state(id) first")]
    UnknownStartState(String),

    #[error("Accept state '{0}' was never declared. Call .state(id) first")]
    UnknownAcceptState(String),

    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}
