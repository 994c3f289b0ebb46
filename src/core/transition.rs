//! Labelled edges between states.

use super::state::StateId;
use serde::{Deserialize, Serialize};

/// Identifier of a transition within one automaton.
pub type TransitionId = String;

/// Symbol marking an empty-string transition.
pub const EPSILON: &str = "ε";

/// A transition from one state to another, firing on any of its symbols.
///
/// `symbols` is stored as written, but the simulation treats it as a set.
/// A transition whose symbols include [`EPSILON`] can be taken without
/// reading input.
///
/// # Example
///
/// ```rust
/// use automaton_lab::core::{Transition, EPSILON};
///
/// let t = Transition::new("t0", "q0", "q1", ["a", EPSILON]);
///
/// assert!(t.fires_on("a"));
/// assert!(!t.fires_on("A"));
/// assert!(t.is_epsilon());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transition {
    pub id: TransitionId,
    #[serde(rename = "fromStateId")]
    pub from: StateId,
    #[serde(rename = "toStateId")]
    pub to: StateId,
    pub symbols: Vec<String>,
}

impl Transition {
    pub fn new<I, S>(
        id: impl Into<TransitionId>,
        from: impl Into<StateId>,
        to: impl Into<StateId>,
        symbols: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Literal, case-sensitive membership test.
    pub fn fires_on(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    pub fn is_epsilon(&self) -> bool {
        self.fires_on(EPSILON)
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Union `symbols` into this transition, keeping first-seen order.
    pub(crate) fn merge_symbols<I>(&mut self, symbols: I)
    where
        I: IntoIterator<Item = String>,
    {
        for symbol in symbols {
            if !self.fires_on(&symbol) {
                self.symbols.push(symbol);
            }
        }
    }
}

/// Split an editor symbol field such as `"a, b, ε"` into symbols.
///
/// Entries are comma separated and trimmed; empty entries are dropped.
///
/// ```rust
/// use automaton_lab::core::parse_symbols;
///
/// assert_eq!(parse_symbols(" a,b ,, ε"), vec!["a", "b", "ε"]);
/// assert!(parse_symbols(" , ").is_empty());
/// ```
pub fn parse_symbols(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
