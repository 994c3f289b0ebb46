//! Persistence of saved automata.
//!
//! The store is a seam: the lab only needs `list/get/create/update/delete`
//! by id, and [`MemoryStore`] is the in-process implementation used by the
//! handlers in [`crate::api`] and by tests.

use crate::core::{generate_id, Automaton, State, Transition};
use crate::validation::IntegrityError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use tracing::info;

/// Errors returned by an [`AutomatonStore`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("Automaton not found: {id}")]
    NotFound { id: String },

    #[error(transparent)]
    Invalid(#[from] IntegrityError),
}

/// An automaton body without an id, as submitted for create or update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutomatonDraft {
    pub name: String,
    pub states: Vec<State>,
    pub transitions: Vec<Transition>,
}

impl AutomatonDraft {
    /// Validate the draft and give it an id.
    pub fn into_automaton(self, id: impl Into<String>) -> Result<Automaton, IntegrityError> {
        Automaton::from_parts(id, self.name, self.states, self.transitions)
    }
}

impl From<&Automaton> for AutomatonDraft {
    fn from(automaton: &Automaton) -> Self {
        Self {
            name: automaton.name().to_string(),
            states: automaton.states().to_vec(),
            transitions: automaton.transitions().to_vec(),
        }
    }
}

/// Storage for saved automata, keyed by id.
pub trait AutomatonStore: Send + Sync {
    fn list(&self) -> Vec<Automaton>;

    fn get(&self, id: &str) -> Result<Automaton, StoreError>;

    /// Store a new automaton under a freshly generated id.
    fn create(&self, draft: AutomatonDraft) -> Result<Automaton, StoreError>;

    /// Replace an existing automaton, keeping its id.
    fn update(&self, id: &str, draft: AutomatonDraft) -> Result<Automaton, StoreError>;

    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// In-memory [`AutomatonStore`].
///
/// # Example
///
/// ```rust
/// use automaton_lab::store::{AutomatonDraft, AutomatonStore, MemoryStore, StoreError};
///
/// let store = MemoryStore::new();
/// let draft = AutomatonDraft { name: "empty".into(), states: vec![], transitions: vec![] };
///
/// let saved = store.create(draft).unwrap();
/// assert_eq!(store.get(saved.id()).unwrap(), saved);
///
/// store.delete(saved.id()).unwrap();
/// assert!(matches!(store.get(saved.id()), Err(StoreError::NotFound { .. })));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    automata: RwLock<HashMap<String, Automaton>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already validated automata.
    pub fn with_automata(automata: impl IntoIterator<Item = Automaton>) -> Self {
        let automata = automata
            .into_iter()
            .map(|automaton| (automaton.id().to_string(), automaton))
            .collect();
        Self {
            automata: RwLock::new(automata),
        }
    }

    pub fn len(&self) -> usize {
        self.automata.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn not_found(id: &str) -> StoreError {
    StoreError::NotFound { id: id.to_string() }
}

impl AutomatonStore for MemoryStore {
    /// Sorted by name, then id.
    fn list(&self) -> Vec<Automaton> {
        let automata = self.automata.read().unwrap_or_else(PoisonError::into_inner);
        let mut listed: Vec<Automaton> = automata.values().cloned().collect();
        listed.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
        listed
    }

    fn get(&self, id: &str) -> Result<Automaton, StoreError> {
        let automata = self.automata.read().unwrap_or_else(PoisonError::into_inner);
        automata.get(id).cloned().ok_or_else(|| not_found(id))
    }

    fn create(&self, draft: AutomatonDraft) -> Result<Automaton, StoreError> {
        let automaton = draft.into_automaton(generate_id())?;
        let mut automata = self.automata.write().unwrap_or_else(PoisonError::into_inner);
        automata.insert(automaton.id().to_string(), automaton.clone());
        info!(id = automaton.id(), name = automaton.name(), "created automaton");
        Ok(automaton)
    }

    fn update(&self, id: &str, draft: AutomatonDraft) -> Result<Automaton, StoreError> {
        let mut automata = self.automata.write().unwrap_or_else(PoisonError::into_inner);
        let slot = automata.get_mut(id).ok_or_else(|| not_found(id))?;
        let automaton = draft.into_automaton(id)?;
        *slot = automaton.clone();
        info!(id, name = automaton.name(), "updated automaton");
        Ok(automaton)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut automata = self.automata.write().unwrap_or_else(PoisonError::into_inner);
        automata.remove(id).ok_or_else(|| not_found(id))?;
        info!(id, "deleted automaton");
        Ok(())
    }
}
