//! Automaton data model.
//!
//! This module contains the pure data layer of the lab:
//! - `State` and `Transition` values
//! - `Automaton`, the collection that keeps their referential integrity
//! - `StepHistory`, the append-only log behind backward stepping
//!
//! Nothing here simulates anything. The engine reads these types and
//! never mutates them.

mod automaton;
mod error;
mod history;
mod state;
mod transition;

pub use automaton::Automaton;
pub(crate) use automaton::{generate_id, RawAutomaton};
pub use error::ModelError;
pub use history::{StepHistory, StepRecord};
pub use state::{State, StateId, StateSet};
pub use transition::{parse_symbols, Transition, TransitionId, EPSILON};
