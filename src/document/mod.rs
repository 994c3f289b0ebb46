//! Import and export of automata and whole sessions.
//!
//! Documents use the editor's JSON shape:
//!
//! ```json
//! {
//!   "id": "…",
//!   "name": "…",
//!   "states": [{ "id": "…", "name": "q0", "x": 0, "y": 0, "isStart": true, "isAccept": false }],
//!   "transitions": [{ "id": "…", "fromStateId": "…", "toStateId": "…", "symbols": ["a"] }]
//! }
//! ```
//!
//! Import is all-or-nothing. Unknown fields, missing fields and wrong types
//! fail parsing; dangling endpoints, duplicate ids, extra start states and
//! empty symbol lists fail validation with every violation listed.

use crate::core::{Automaton, RawAutomaton};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod checkpoint;
pub mod error;

pub use checkpoint::{SessionCheckpoint, CHECKPOINT_VERSION};
pub use error::DocumentError;

/// Export as pretty-printed JSON.
pub fn to_json(automaton: &Automaton) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(automaton)
        .map_err(|e| DocumentError::SerializationFailed(e.to_string()))
}

/// Import from JSON, validating structure before anything is built.
///
/// # Example
///
/// ```rust
/// use automaton_lab::document::{from_json, DocumentError};
///
/// let json = r#"{
///     "id": "a1",
///     "name": "dangling",
///     "states": [{"id":"q0","name":"q0","x":0,"y":0,"isStart":true,"isAccept":false}],
///     "transitions": [{"id":"t0","fromStateId":"q0","toStateId":"q1","symbols":["a"]}]
/// }"#;
///
/// assert!(matches!(from_json(json), Err(DocumentError::Integrity(_))));
/// ```
pub fn from_json(json: &str) -> Result<Automaton, DocumentError> {
    let raw: RawAutomaton = serde_json::from_str(json).map_err(|e| {
        warn!(error = %e, "rejected malformed automaton document");
        DocumentError::DeserializationFailed(e.to_string())
    })?;
    build(raw)
}

/// Export in the compact binary form.
pub fn to_bytes(automaton: &Automaton) -> Result<Vec<u8>, DocumentError> {
    bincode::serialize(automaton).map_err(|e| DocumentError::SerializationFailed(e.to_string()))
}

/// Import from the compact binary form.
pub fn from_bytes(bytes: &[u8]) -> Result<Automaton, DocumentError> {
    let raw: RawAutomaton = bincode::deserialize(bytes).map_err(|e| {
        warn!(error = %e, "rejected malformed binary automaton");
        DocumentError::DeserializationFailed(e.to_string())
    })?;
    build(raw)
}

fn build(raw: RawAutomaton) -> Result<Automaton, DocumentError> {
    Automaton::try_from(raw).map_err(|err| {
        warn!(violations = err.violations.len(), "rejected inconsistent automaton");
        DocumentError::Integrity(err)
    })
}

/// File name the editor suggests when saving: whitespace runs become `_`.
pub fn export_file_name(automaton: &Automaton) -> String {
    let stem = automaton.name().split_whitespace().collect::<Vec<_>>().join("_");
    format!("{stem}.json")
}

/// Write `automaton` as JSON into `dir`, atomically, returning the path.
pub fn save_to_dir(automaton: &Automaton, dir: impl AsRef<Path>) -> Result<PathBuf, DocumentError> {
    let path = dir.as_ref().join(export_file_name(automaton));
    write_atomic(&path, to_json(automaton)?.as_bytes())?;
    info!(path = %path.display(), "saved automaton");
    Ok(path)
}

/// Read and validate a JSON automaton file.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Automaton, DocumentError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let automaton = from_json(&json)?;
    info!(path = %path.display(), automaton = automaton.id(), "loaded automaton");
    Ok(automaton)
}

/// Write to a temporary sibling, then rename over the target.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), DocumentError> {
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    fs::write(&temp, contents)?;
    fs::rename(&temp, path)?;
    Ok(())
}
