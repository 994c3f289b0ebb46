//! Request handlers for the saved-automaton resource.
//!
//! Handlers are effects over an [`ApiEnv`]: building one is pure, and
//! nothing touches the store until the effect is run. A transport binds
//! them to routes:
//!
//! | route                       | handler              | success |
//! |-----------------------------|----------------------|---------|
//! | `GET /automata`             | [`list_automata`]    | 200     |
//! | `GET /automata/{id}`        | [`get_automaton`]    | 200     |
//! | `POST /automata`            | [`create_automaton`] | 201     |
//! | `PUT /automata/{id}`        | [`update_automaton`] | 200     |
//! | `DELETE /automata/{id}`     | [`delete_automaton`] | 204     |
//!
//! Failures map to status codes through [`ApiError::status_code`].

use crate::core::Automaton;
use crate::store::{AutomatonDraft, AutomatonStore, StoreError};
use crate::validation::Violation;
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::*;
use thiserror::Error;
use tracing::warn;

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_NO_CONTENT: u16 = 204;

/// Errors surfaced to API clients.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("Automaton not found: {id}")]
    NotFound { id: String },

    #[error("Invalid automaton: {message}")]
    InvalidBody {
        message: String,
        violations: Vec<Violation>,
    },
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound { .. } => 404,
            ApiError::InvalidBody { .. } => 400,
        }
    }

    /// Reject a request body that could not be parsed.
    pub fn malformed(error: &serde_json::Error) -> Self {
        ApiError::InvalidBody {
            message: error.to_string(),
            violations: Vec::new(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { id } => ApiError::NotFound { id },
            StoreError::Invalid(err) => ApiError::InvalidBody {
                message: err.to_string(),
                violations: err.violations,
            },
        }
    }
}

/// Environment the handlers run against.
#[derive(Clone)]
pub struct ApiEnv {
    pub store: Arc<dyn AutomatonStore>,
}

impl ApiEnv {
    pub fn new(store: impl AutomatonStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Parse a JSON request body into a draft.
pub fn parse_draft(body: &str) -> Result<AutomatonDraft, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "rejected malformed request body");
        ApiError::malformed(&e)
    })
}

pub fn list_automata() -> impl Effect<Output = Vec<Automaton>, Error = ApiError, Env = ApiEnv> {
    from_fn(|env: &ApiEnv| Ok::<_, ApiError>(env.store.list()))
}

pub fn get_automaton(
    id: impl Into<String>,
) -> impl Effect<Output = Automaton, Error = ApiError, Env = ApiEnv> {
    let id = id.into();
    from_fn(move |env: &ApiEnv| env.store.get(&id).map_err(ApiError::from))
}

pub fn create_automaton(
    draft: AutomatonDraft,
) -> impl Effect<Output = Automaton, Error = ApiError, Env = ApiEnv> {
    from_fn(move |env: &ApiEnv| env.store.create(draft.clone()).map_err(ApiError::from))
}

pub fn update_automaton(
    id: impl Into<String>,
    draft: AutomatonDraft,
) -> impl Effect<Output = Automaton, Error = ApiError, Env = ApiEnv> {
    let id = id.into();
    from_fn(move |env: &ApiEnv| env.store.update(&id, draft.clone()).map_err(ApiError::from))
}

pub fn delete_automaton(
    id: impl Into<String>,
) -> impl Effect<Output = (), Error = ApiError, Env = ApiEnv> {
    let id = id.into();
    from_fn(move |env: &ApiEnv| env.store.delete(&id).map_err(ApiError::from))
}
