//! Step history tracking.
//!
//! Every forward step of a run appends one record; every backward step pops
//! one. The history is the only thing consulted when undoing, so a record
//! keeps the full active set as it was before its symbol was read.

use super::state::StateSet;
use super::transition::TransitionId;
use serde::{Deserialize, Serialize};

/// Record of a single forward step.
///
/// # Example
///
/// ```rust
/// use automaton_lab::core::{StateSet, StepRecord};
///
/// let record = StepRecord {
///     states_before: StateSet::from(["q0".to_string()]),
///     symbol: 'a',
///     transitions_used: vec!["t0".to_string()],
/// };
/// assert_eq!(record.symbol, 'a');
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StepRecord {
    /// Active states before the symbol was consumed
    #[serde(rename = "stateIds")]
    pub states_before: StateSet,
    /// The consumed symbol
    pub symbol: char,
    /// Transitions exercised to reach the next active set, in firing order
    #[serde(rename = "transitionIds")]
    pub transitions_used: Vec<TransitionId>,
}

/// Ordered, append-only log of step records with truncation from the end.
///
/// # Example
///
/// ```rust
/// use automaton_lab::core::{StateSet, StepHistory, StepRecord};
///
/// let mut history = StepHistory::new();
/// history.push(StepRecord {
///     states_before: StateSet::from(["q0".to_string()]),
///     symbol: 'a',
///     transitions_used: vec![],
/// });
/// history.push(StepRecord {
///     states_before: StateSet::from(["q1".to_string()]),
///     symbol: 'b',
///     transitions_used: vec![],
/// });
///
/// assert_eq!(history.consumed(), "ab");
/// assert_eq!(history.pop().map(|r| r.symbol), Some('b'));
/// assert_eq!(history.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepHistory {
    records: Vec<StepRecord>,
}

impl StepHistory {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    /// Remove and return the most recent record.
    pub fn pop(&mut self) -> Option<StepRecord> {
        self.records.pop()
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// The symbols consumed so far, in order.
    pub fn consumed(&self) -> String {
        self.records.iter().map(|r| r.symbol).collect()
    }
}
