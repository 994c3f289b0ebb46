//! The value a presentation layer re-reads after every controller call.

use crate::core::{StateSet, StepHistory, TransitionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a simulation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// No run in progress
    #[default]
    Idle,
    /// Symbols remain and the active set is not dead
    Running,
    /// Input exhausted on an accepting configuration
    Accepted,
    /// No start state, dead configuration, or input exhausted without accepting
    Rejected,
}

impl ExecutionStatus {
    /// `Accepted` or `Rejected`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of a simulation session.
///
/// Created idle, reinitialized by
/// [`ExecutionController::start`](super::ExecutionController::start) and
/// updated in place by each step. `history` is the sole source of truth for
/// stepping backward.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExecutionState {
    #[serde(rename = "currentStateIds")]
    pub(crate) current: StateSet,
    pub(crate) remaining_input: String,
    pub(crate) processed_input: String,
    pub(crate) step: usize,
    pub(crate) status: ExecutionStatus,
    pub(crate) history: StepHistory,
}

impl ExecutionState {
    /// The active-state set.
    pub fn current(&self) -> &StateSet {
        &self.current
    }

    pub fn remaining_input(&self) -> &str {
        &self.remaining_input
    }

    pub fn processed_input(&self) -> &str {
        &self.processed_input
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    pub fn is_active(&self, state_id: &str) -> bool {
        self.current.contains(state_id)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Transitions used by the most recent step, for highlighting.
    pub fn last_transitions(&self) -> &[TransitionId] {
        self.history
            .last()
            .map(|r| r.transitions_used.as_slice())
            .unwrap_or(&[])
    }
}
