//! Whole-session checkpoints.
//!
//! A checkpoint captures the automaton, the execution (history included) and
//! the configuration, so a paused walk-through can be resumed exactly where
//! it stopped, backward steps and all.

use super::error::DocumentError;
use crate::config::LabConfig;
use crate::core::{generate_id, Automaton};
use crate::engine::{ExecutionState, ExecutionStatus};
use crate::session::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a [`Session`].
///
/// # Example
///
/// ```rust
/// use automaton_lab::automaton;
/// use automaton_lab::document::SessionCheckpoint;
/// use automaton_lab::session::Session;
///
/// let automaton = automaton! {
///     states: [q0],
///     start: q0,
///     accept: [q0],
///     transitions: [q0 -> q0: ["a"]],
/// }
/// .unwrap();
/// let mut session = Session::with_automaton(automaton, Default::default());
/// session.test_string("aaa");
/// session.step_forward();
///
/// let json = SessionCheckpoint::capture(&session).to_json().unwrap();
/// let mut resumed = SessionCheckpoint::from_json(&json).unwrap().restore().unwrap();
///
/// assert_eq!(resumed.execution().step(), 1);
/// resumed.step_backward();
/// assert_eq!(resumed.execution().remaining_input(), "aaa");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub automaton: Automaton,

    pub execution: ExecutionState,

    pub config: LabConfig,
}

impl SessionCheckpoint {
    /// Capture the current session.
    pub fn capture(session: &Session) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: generate_id(),
            timestamp: Utc::now(),
            automaton: session.automaton().clone(),
            execution: session.execution().clone(),
            config: session.config().clone(),
        }
    }

    /// Serialize checkpoint to JSON format (human-readable)
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DocumentError::SerializationFailed(e.to_string()))
    }

    /// Deserialize checkpoint from JSON format
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| DocumentError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Serialize checkpoint to binary format (compact)
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        bincode::serialize(self).map_err(|e| DocumentError::SerializationFailed(e.to_string()))
    }

    /// Deserialize checkpoint from binary format
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| DocumentError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Write the checkpoint as JSON, atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        super::write_atomic(path, self.to_json()?.as_bytes())?;
        info!(checkpoint = %self.id, path = %path.display(), "saved session checkpoint");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Rebuild the session after checking the execution fits the automaton.
    pub fn restore(self) -> Result<Session, DocumentError> {
        self.check_version()?;
        self.config
            .validate()
            .map_err(|e| DocumentError::ValidationFailed(e.to_string()))?;

        let problems = execution_problems(&self.automaton, &self.execution);
        if !problems.is_empty() {
            warn!(checkpoint = %self.id, problems = problems.len(), "rejected checkpoint");
            return Err(DocumentError::ValidationFailed(problems.join("; ")));
        }

        info!(
            checkpoint = %self.id,
            status = %self.execution.status(),
            step = self.execution.step(),
            "restored session checkpoint"
        );
        Ok(Session::from_parts(self.automaton, self.execution, self.config))
    }

    fn check_version(&self) -> Result<(), DocumentError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(DocumentError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

fn execution_problems(automaton: &Automaton, execution: &ExecutionState) -> Vec<String> {
    let mut problems = Vec::new();
    let history = execution.history();

    if execution.step() != history.len() {
        problems.push(format!(
            "step {} does not match {} history record(s)",
            execution.step(),
            history.len()
        ));
    }
    if execution.processed_input() != history.consumed() {
        problems.push("processed input does not match history".to_string());
    }
    problems.extend(status_problem(automaton, execution));

    let snapshots = history
        .records()
        .iter()
        .map(|record| &record.states_before)
        .chain(std::iter::once(execution.current()));
    let unknown_states: BTreeSet<&str> = snapshots
        .flatten()
        .map(String::as_str)
        .filter(|id| automaton.state(id).is_none())
        .collect();
    problems.extend(unknown_states.iter().map(|id| format!("unknown state '{id}'")));

    let unknown_transitions: BTreeSet<&str> = history
        .records()
        .iter()
        .flat_map(|r| &r.transitions_used)
        .map(String::as_str)
        .filter(|id| automaton.transition(id).is_none())
        .collect();
    problems.extend(
        unknown_transitions
            .iter()
            .map(|id| format!("unknown transition '{id}'")),
    );

    problems
}

/// The status must be one the controller could have reached from this data.
fn status_problem(automaton: &Automaton, execution: &ExecutionState) -> Option<String> {
    let status = execution.status();
    let live = !execution.current().is_empty();
    let input_left = !execution.remaining_input().is_empty();
    // A run over an automaton without a start state never leaves step 0.
    let unstarted = execution.step() == 0 && automaton.start_state().is_none();

    let consistent = match status {
        ExecutionStatus::Idle => execution.history().is_empty() && !live && !input_left,
        ExecutionStatus::Running => live || unstarted,
        ExecutionStatus::Accepted => !input_left && automaton.any_accepting(execution.current()),
        ExecutionStatus::Rejected => !input_left || !live || unstarted,
    };

    (!consistent).then(|| {
        format!(
            "status {status} contradicts execution at step {} with {} active state(s) and '{}' unread",
            execution.step(),
            execution.current().len(),
            execution.remaining_input()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton;
    use crate::core::EPSILON;

    fn running_session() -> Session {
        let automaton = automaton! {
            name: "ends in b",
            states: [q0, q1, q2],
            start: q0,
            accept: [q2],
            transitions: [
                q0 -> q0: ["a", "b"],
                q0 -> q1: [EPSILON],
                q1 -> q2: ["b"],
            ],
        }
        .unwrap();
        let mut session = Session::with_automaton(automaton, LabConfig::default());
        session.test_string("abab");
        session.step_forward();
        session.step_forward();
        session
    }

    #[test]
    fn capture_records_current_format() {
        let checkpoint = SessionCheckpoint::capture(&running_session());
        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.execution.step(), 2);
        assert!(!checkpoint.id.is_empty());
    }

    #[test]
    fn json_restore_resumes_forward_and_backward() {
        let session = running_session();
        let json = SessionCheckpoint::capture(&session).to_json().unwrap();

        let mut restored = SessionCheckpoint::from_json(&json).unwrap().restore().unwrap();
        assert_eq!(restored.execution(), session.execution());

        assert_eq!(restored.run_to_end(), ExecutionStatus::Accepted);
        restored.step_backward();
        restored.step_backward();
        restored.step_backward();
        restored.step_backward();
        assert_eq!(restored.execution().step(), 0);
        assert_eq!(restored.execution().remaining_input(), "abab");
    }

    #[test]
    fn binary_restore_matches_json_restore() {
        let checkpoint = SessionCheckpoint::capture(&running_session());
        let bytes = checkpoint.to_bytes().unwrap();
        let restored = SessionCheckpoint::from_bytes(&bytes).unwrap().restore().unwrap();
        assert_eq!(restored.execution(), &checkpoint.execution);
        assert_eq!(restored.automaton(), &checkpoint.automaton);
    }

    #[test]
    fn execution_json_uses_editor_field_names() {
        let json = SessionCheckpoint::capture(&running_session()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let execution = &value["execution"];

        assert_eq!(execution["status"], "running");
        assert_eq!(execution["remainingInput"], "ab");
        assert_eq!(execution["processedInput"], "ab");
        assert!(execution["currentStateIds"].is_array());
        assert_eq!(execution["history"][0]["symbol"], "a");
        assert!(execution["history"][0]["transitionIds"].is_array());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = SessionCheckpoint::capture(&running_session());
        checkpoint.version = 99;
        let json = checkpoint.to_json().unwrap();

        let result = SessionCheckpoint::from_json(&json);
        assert!(matches!(
            result,
            Err(DocumentError::UnsupportedVersion {
                found: 99,
                supported: 1
            })
        ));
    }

    #[test]
    fn execution_referring_to_missing_states_is_rejected() {
        let mut checkpoint = SessionCheckpoint::capture(&running_session());
        checkpoint.automaton.delete_transition("t2").unwrap();
        checkpoint.automaton.delete_state("q2").unwrap();
        checkpoint.execution.current.insert("q2".into());

        match checkpoint.restore() {
            Err(DocumentError::ValidationFailed(message)) => {
                assert!(message.contains("unknown state 'q2'"));
            }
            other => panic!("Expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn history_mismatch_is_rejected() {
        let mut checkpoint = SessionCheckpoint::capture(&running_session());
        checkpoint.execution.step = 5;
        checkpoint.execution.processed_input.push('z');

        match checkpoint.restore() {
            Err(DocumentError::ValidationFailed(message)) => {
                assert!(message.contains("step 5"));
                assert!(message.contains("processed input"));
            }
            other => panic!("Expected validation failure, got {other:?}"),
        }
    }

    fn assert_contradiction(checkpoint: SessionCheckpoint, status: &str) {
        match checkpoint.restore() {
            Err(DocumentError::ValidationFailed(message)) => {
                assert!(message.contains(&format!("status {status} contradicts")), "{message}");
            }
            other => panic!("Expected status contradiction, got {other:?}"),
        }
    }

    #[test]
    fn terminal_status_with_live_unread_input_is_rejected() {
        let automaton = automaton! {
            states: [q0, q1],
            start: q0,
            accept: [q1],
            transitions: [q0 -> q0: ["a"], q0 -> q1: ["b"]],
        }
        .unwrap();
        let mut session = Session::with_automaton(automaton, LabConfig::default());
        session.test_string("aa");

        let mut accepted = SessionCheckpoint::capture(&session);
        accepted.execution.status = ExecutionStatus::Accepted;
        assert_contradiction(accepted, "accepted");

        let mut rejected = SessionCheckpoint::capture(&session);
        rejected.execution.status = ExecutionStatus::Rejected;
        assert_contradiction(rejected, "rejected");
    }

    #[test]
    fn accepted_status_needs_accepting_state() {
        let mut session = running_session();
        session.run_to_end();
        let mut checkpoint = SessionCheckpoint::capture(&session);
        checkpoint.execution.current.remove("q2");

        assert_contradiction(checkpoint, "accepted");
    }

    #[test]
    fn idle_execution_with_leftover_input_is_rejected() {
        let mut checkpoint = SessionCheckpoint::capture(&Session::default());
        checkpoint.execution.remaining_input = "zzz".into();

        assert_contradiction(checkpoint, "idle");
    }

    #[test]
    fn running_status_with_dead_set_is_rejected() {
        let mut checkpoint = SessionCheckpoint::capture(&running_session());
        checkpoint.execution.current.clear();

        assert_contradiction(checkpoint, "running");
    }

    #[test]
    fn genuine_rejections_still_restore() {
        let mut dead = running_session();
        dead.test_string("acb");
        assert_eq!(dead.run_to_end(), ExecutionStatus::Rejected);
        assert_eq!(dead.execution().remaining_input(), "b");
        assert!(SessionCheckpoint::capture(&dead).restore().is_ok());

        let mut no_start = Session::default();
        no_start.test_string("ab");
        assert_eq!(no_start.execution().status(), ExecutionStatus::Rejected);
        assert!(SessionCheckpoint::capture(&no_start).restore().is_ok());
    }

    #[test]
    fn unknown_state_is_reported_once() {
        let json = SessionCheckpoint::capture(&running_session()).to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for pointer in [
            "/execution/history/0/stateIds",
            "/execution/history/1/stateIds",
            "/execution/currentStateIds",
        ] {
            let snapshot = value.pointer_mut(pointer).unwrap();
            snapshot.as_array_mut().unwrap().push("ghost".into());
        }

        let checkpoint = SessionCheckpoint::from_json(&value.to_string()).unwrap();
        match checkpoint.restore() {
            Err(DocumentError::ValidationFailed(message)) => {
                assert_eq!(message.matches("unknown state 'ghost'").count(), 1);
            }
            other => panic!("Expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn unknown_checkpoint_fields_are_rejected() {
        let json = SessionCheckpoint::capture(&running_session()).to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["execution"]["speed"] = 3.into();

        assert!(matches!(
            SessionCheckpoint::from_json(&value.to_string()),
            Err(DocumentError::DeserializationFailed(_))
        ));

        value["execution"].as_object_mut().unwrap().remove("speed");
        value["notes"] = "extra".into();
        assert!(matches!(
            SessionCheckpoint::from_json(&value.to_string()),
            Err(DocumentError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn idle_session_round_trips() {
        let session = Session::default();
        let json = SessionCheckpoint::capture(&session).to_json().unwrap();
        let restored = SessionCheckpoint::from_json(&json).unwrap().restore().unwrap();
        assert!(!restored.is_testing());
        assert_eq!(restored.automaton().name(), session.automaton().name());
    }

    #[test]
    fn save_and_load_checkpoint_file() {
        let path = std::env::temp_dir().join(format!("checkpoint-{}.json", uuid::Uuid::new_v4()));
        let checkpoint = SessionCheckpoint::capture(&running_session());

        checkpoint.save(&path).unwrap();
        let loaded = SessionCheckpoint::load(&path).unwrap();

        assert_eq!(loaded.id, checkpoint.id);
        assert_eq!(loaded.timestamp, checkpoint.timestamp);
        std::fs::remove_file(&path).unwrap();
    }
}
