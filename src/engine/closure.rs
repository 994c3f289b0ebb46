//! Epsilon-closure resolution.

use crate::core::{Automaton, StateSet, TransitionId};
use std::collections::HashSet;

/// States reached by a move, together with the transitions that reached them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reach {
    pub states: StateSet,
    pub transitions: Vec<TransitionId>,
}

/// Compute the epsilon-closure of `seeds`.
///
/// The result holds `seeds` plus every state reachable from them through
/// epsilon transitions only. `transitions` lists each epsilon transition
/// followed during the expansion, once per call, in traversal order. Each
/// state is expanded at most once.
///
/// # Example
///
/// ```rust
/// use automaton_lab::automaton;
/// use automaton_lab::core::{StateSet, EPSILON};
/// use automaton_lab::engine::epsilon_closure;
///
/// let automaton = automaton! {
///     states: [q0, q1, q2],
///     start: q0,
///     transitions: [
///         q0 -> q1: [EPSILON],
///         q1 -> q2: [EPSILON],
///     ],
/// }
/// .unwrap();
///
/// let closure = epsilon_closure(&automaton, &StateSet::from(["q0".to_string()]));
/// assert_eq!(closure.states.len(), 3);
/// assert_eq!(closure.transitions.len(), 2);
/// ```
pub fn epsilon_closure(automaton: &Automaton, seeds: &StateSet) -> Reach {
    let mut states = seeds.clone();
    let mut transitions = Vec::new();
    let mut recorded = HashSet::new();
    let mut stack: Vec<&str> = seeds.iter().map(String::as_str).collect();

    while let Some(current) = stack.pop() {
        for t in automaton.transitions_from(current).filter(|t| t.is_epsilon()) {
            if states.insert(t.to.clone()) {
                stack.push(t.to.as_str());
            }
            if recorded.insert(t.id.as_str()) {
                transitions.push(t.id.clone());
            }
        }
    }

    Reach {
        states,
        transitions,
    }
}
