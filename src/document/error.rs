//! Document and checkpoint error types.

use crate::validation::IntegrityError;
use thiserror::Error;

/// Errors that can occur while importing, exporting or restoring
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Input was not a well-formed automaton document
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Document parsed but describes an inconsistent automaton
    #[error("Invalid automaton: {0}")]
    Integrity(#[from] IntegrityError),

    /// Checkpoint execution does not fit its automaton
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
