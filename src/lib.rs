//! Automaton Lab: an epsilon-NFA simulator with step-through execution
//!
//! The lab keeps a strict split between the pure automaton model and the
//! engine that simulates it. The model is a plain collection of states and
//! transitions with guaranteed referential integrity; the engine computes
//! epsilon-closures, applies input symbols one at a time and records every
//! step so a run can be walked backward as easily as forward.
//!
//! # Core Concepts
//!
//! - **Automaton**: states and transitions, validated on every import
//! - **Epsilon-closure**: the states reachable without consuming input
//! - **Execution**: the active-state set, the input split into processed and
//!   remaining parts, a status and the step history
//! - **Session**: one automaton plus one execution, with edits locked while
//!   a run is active
//!
//! # Example
//!
//! ```rust
//! use automaton_lab::automaton;
//! use automaton_lab::core::EPSILON;
//! use automaton_lab::engine::{ExecutionController, ExecutionStatus, StepResult};
//!
//! // a(b|ε)
//! let automaton = automaton! {
//!     states: [q0, q1, q2],
//!     start: q0,
//!     accept: [q2],
//!     transitions: [
//!         q0 -> q1: ["a"],
//!         q1 -> q2: ["b", EPSILON],
//!     ],
//! }
//! .unwrap();
//!
//! let mut controller = ExecutionController::new();
//! controller.start(&automaton, "ab");
//!
//! let result = controller.step_forward(&automaton);
//! assert_eq!(result, StepResult::Consumed { symbol: 'a', status: ExecutionStatus::Running });
//! assert!(controller.state().is_active("q1"));
//! assert!(controller.state().is_active("q2"));
//!
//! controller.step_forward(&automaton);
//! assert_eq!(controller.state().status(), ExecutionStatus::Accepted);
//!
//! controller.step_backward();
//! controller.step_backward();
//! assert_eq!(controller.state().remaining_input(), "ab");
//! ```

pub mod api;
pub mod builder;
pub mod config;
pub mod core;
pub mod document;
pub mod engine;
pub mod playback;
pub mod session;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use builder::{AutomatonBuilder, BuildError};
pub use config::LabConfig;
pub use crate::core::{Automaton, State, Transition, EPSILON};
pub use engine::{accepts, ExecutionController, ExecutionState, ExecutionStatus, StepResult};
pub use session::Session;
