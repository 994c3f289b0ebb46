//! Single-symbol moves over an active-state set.

use super::closure::{epsilon_closure, Reach};
use crate::core::{Automaton, StateSet};

/// Advance `current` by one input symbol.
///
/// Every transition leaving an active state that carries `symbol` fires.
/// Destinations are collected once each, then closed under epsilon moves.
/// `transitions` lists the symbol transitions in firing order followed by
/// the epsilon transitions of the closure. An empty result set is a dead
/// configuration.
///
/// # Example
///
/// ```rust
/// use automaton_lab::automaton;
/// use automaton_lab::core::StateSet;
/// use automaton_lab::engine::next_states;
///
/// let automaton = automaton! {
///     states: [q0, q1, q2],
///     start: q0,
///     transitions: [
///         q0 -> q1: ["a"],
///         q0 -> q2: ["a"],
///     ],
/// }
/// .unwrap();
///
/// let reach = next_states(&automaton, &StateSet::from(["q0".to_string()]), "a");
/// assert_eq!(reach.states.len(), 2);
///
/// let dead = next_states(&automaton, &reach.states, "a");
/// assert!(dead.states.is_empty());
/// ```
pub fn next_states(automaton: &Automaton, current: &StateSet, symbol: &str) -> Reach {
    let mut moved = StateSet::new();
    let mut transitions = Vec::new();

    for state_id in current {
        for t in automaton
            .transitions_from(state_id)
            .filter(|t| t.fires_on(symbol))
        {
            moved.insert(t.to.clone());
            transitions.push(t.id.clone());
        }
    }

    let closure = epsilon_closure(automaton, &moved);
    transitions.extend(closure.transitions);

    Reach {
        states: closure.states,
        transitions,
    }
}
