//! Simulation engine for epsilon-NFAs.
//!
//! Components, leaf to root:
//! - **Closure**: states reachable through epsilon transitions
//! - **Step**: one input symbol applied to an active-state set
//! - **Controller**: a run over an input string with forward and backward
//!   stepping driven by an append-only history
//!
//! Everything here is synchronous and total: no call fails, and the worst
//! outcome of a run is a `Rejected` status.

mod closure;
mod controller;
mod execution;
mod step;

pub use closure::{epsilon_closure, Reach};
pub use controller::{accepts, ExecutionController, StepResult};
pub use execution::{ExecutionState, ExecutionStatus};
pub use step::next_states;
