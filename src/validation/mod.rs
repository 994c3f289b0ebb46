//! Referential-integrity validation for automaton structures.
//!
//! This module uses Stillwater's `Validation` type to accumulate ALL
//! violations instead of stopping at the first one, so an imported file
//! with three dangling transitions reports all three.
//!
//! # Example
//!
//! ```rust
//! use automaton_lab::core::{State, Transition};
//! use automaton_lab::validation::{check_structure, Violation};
//!
//! let states = vec![State::new("q0", "q0", 0.0, 0.0)];
//! let transitions = vec![Transition::new("t0", "q0", "q1", ["a"])];
//!
//! let err = check_structure(&states, &transitions).unwrap_err();
//! assert_eq!(
//!     err.violations,
//!     vec![Violation::UnknownDestination { transition: "t0".into(), state: "q1".into() }]
//! );
//! ```

pub mod rules;
pub mod violations;

pub use rules::{check_structure, validate_structure};
pub use violations::{IntegrityError, Violation};
