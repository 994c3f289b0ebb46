//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{generate_id, StateId, Transition, TransitionId, EPSILON};

/// Builder for constructing transitions with a fluent API.
#[derive(Debug, Default)]
pub struct TransitionBuilder {
    id: Option<TransitionId>,
    from: Option<StateId>,
    to: Option<StateId>,
    symbols: Vec<String>,
}

impl TransitionBuilder {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transition id (optional, generated when absent).
    pub fn id(mut self, id: impl Into<TransitionId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<StateId>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<StateId>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Add a symbol the transition fires on. Repeats are ignored.
    pub fn on(mut self, symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        if !self.symbols.contains(&symbol) {
            self.symbols.push(symbol);
        }
        self
    }

    /// Mark the transition as an epsilon move.
    pub fn on_epsilon(self) -> Self {
        self.on(EPSILON)
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        if self.symbols.is_empty() {
            return Err(BuildError::MissingSymbols);
        }

        Ok(Transition {
            id: self.id.unwrap_or_else(generate_id),
            from,
            to,
            symbols: self.symbols,
        })
    }
}
