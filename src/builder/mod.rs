//! Builder API for ergonomic automaton construction.
//!
//! This module provides fluent builders and a macro for creating automata
//! with minimal boilerplate. Every builder ends in the same integrity checks
//! that guard imports, so a built automaton is always consistent.

pub mod automaton;
pub mod error;
pub mod macros;
pub mod transition;

pub use automaton::AutomatonBuilder;
pub use error::BuildError;
pub use transition::TransitionBuilder;
