//! Errors raised by automaton edits.

use crate::validation::IntegrityError;
use thiserror::Error;

/// Errors that can occur when editing an automaton in place.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("No state with id '{0}'")]
    UnknownState(String),

    #[error("No transition with id '{0}'")]
    UnknownTransition(String),

    #[error("A transition needs at least one symbol")]
    EmptySymbols,

    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}
