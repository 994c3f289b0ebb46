//! The automaton: states and transitions kept referentially consistent.

use super::error::ModelError;
use super::state::{State, StateId, StateSet};
use super::transition::{Transition, TransitionId};
use crate::validation::{self, IntegrityError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A finite automaton as drawn in the editor.
///
/// Every value of this type satisfies the integrity rules in
/// [`crate::validation`]: unique ids, transition endpoints that name existing
/// states, at most one start state and no empty symbol list. Construction
/// from untrusted parts goes through [`Automaton::from_parts`], and
/// deserialization runs the same checks.
///
/// # Example
///
/// ```rust
/// use automaton_lab::core::Automaton;
///
/// let mut automaton = Automaton::new("even zeros");
/// let q0 = automaton.add_state("q0", 100.0, 100.0);
/// let q1 = automaton.add_state("q1", 250.0, 100.0);
/// automaton.add_transition(&q0, &q1, vec!["0".to_string()]).unwrap();
/// automaton.add_transition(&q1, &q0, vec!["0".to_string()]).unwrap();
/// automaton.toggle_accept_state(&q0).unwrap();
///
/// assert_eq!(automaton.start_state().map(|s| s.id.as_str()), Some(q0.as_str()));
/// assert_eq!(automaton.transitions().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAutomaton")]
pub struct Automaton {
    id: String,
    name: String,
    states: Vec<State>,
    transitions: Vec<Transition>,
}

/// Unchecked wire shape of an automaton.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawAutomaton {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) states: Vec<State>,
    pub(crate) transitions: Vec<Transition>,
}

impl TryFrom<RawAutomaton> for Automaton {
    type Error = IntegrityError;

    fn try_from(raw: RawAutomaton) -> Result<Self, Self::Error> {
        Automaton::from_parts(raw.id, raw.name, raw.states, raw.transitions)
    }
}

pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl Automaton {
    /// Create an empty automaton with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Assemble an automaton from parts, checking every integrity rule.
    ///
    /// All violations are reported together; nothing is built unless the
    /// parts are consistent.
    pub fn from_parts(
        id: impl Into<String>,
        name: impl Into<String>,
        states: Vec<State>,
        transitions: Vec<Transition>,
    ) -> Result<Self, IntegrityError> {
        validation::check_structure(&states, &transitions)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            states,
            transitions,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }

    pub fn transition(&self, id: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.id == id)
    }

    pub fn start_state(&self) -> Option<&State> {
        self.states.iter().find(|s| s.is_start)
    }

    /// Transitions leaving `state_id`, in insertion order.
    pub fn transitions_from<'a>(
        &'a self,
        state_id: &'a str,
    ) -> impl Iterator<Item = &'a Transition> + 'a {
        self.transitions.iter().filter(move |t| t.from == state_id)
    }

    /// The transition for the ordered pair `from -> to`, if one exists.
    pub fn transition_between(&self, from: &str, to: &str) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.from == from && t.to == to)
    }

    /// True if any id in `ids` names an accepting state. Unknown ids are ignored.
    pub fn any_accepting(&self, ids: &StateSet) -> bool {
        ids.iter()
            .any(|id| self.state(id).is_some_and(|s| s.is_accept))
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Add a state with a fresh id. The first state of an empty automaton
    /// becomes the start state.
    pub fn add_state(&mut self, name: impl Into<String>, x: f64, y: f64) -> StateId {
        let state = State::new(generate_id(), name, x, y).with_start(self.states.is_empty());
        let id = state.id.clone();
        self.states.push(state);
        id
    }

    pub fn rename_state(&mut self, id: &str, name: impl Into<String>) -> Result<(), ModelError> {
        self.state_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn move_state(&mut self, id: &str, x: f64, y: f64) -> Result<(), ModelError> {
        let state = self.state_mut(id)?;
        state.x = x;
        state.y = y;
        Ok(())
    }

    /// Delete a state together with every transition touching it.
    pub fn delete_state(&mut self, id: &str) -> Result<State, ModelError> {
        let index = self
            .states
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ModelError::UnknownState(id.to_string()))?;
        let removed = self.states.remove(index);
        self.transitions.retain(|t| t.from != id && t.to != id);
        Ok(removed)
    }

    /// Make `id` the only start state.
    pub fn set_start_state(&mut self, id: &str) -> Result<(), ModelError> {
        self.state_mut(id)?;
        for state in &mut self.states {
            state.is_start = state.id == id;
        }
        Ok(())
    }

    /// Flip the accept marker, returning its new value.
    pub fn toggle_accept_state(&mut self, id: &str) -> Result<bool, ModelError> {
        let state = self.state_mut(id)?;
        state.is_accept = !state.is_accept;
        Ok(state.is_accept)
    }

    /// Add a transition, or merge `symbols` into the existing transition for
    /// the same ordered pair.
    ///
    /// Returns the id of the transition that now carries the symbols.
    /// Creating a new transition with no symbols fails with
    /// [`ModelError::EmptySymbols`].
    pub fn add_transition(
        &mut self,
        from: &str,
        to: &str,
        symbols: Vec<String>,
    ) -> Result<TransitionId, ModelError> {
        for endpoint in [from, to] {
            if self.state(endpoint).is_none() {
                return Err(ModelError::UnknownState(endpoint.to_string()));
            }
        }

        if let Some(existing) = self
            .transitions
            .iter_mut()
            .find(|t| t.from == from && t.to == to)
        {
            existing.merge_symbols(symbols);
            return Ok(existing.id.clone());
        }

        if symbols.is_empty() {
            return Err(ModelError::EmptySymbols);
        }

        let mut transition = Transition::new(generate_id(), from, to, Vec::<String>::new());
        transition.merge_symbols(symbols);
        let id = transition.id.clone();
        self.transitions.push(transition);
        Ok(id)
    }

    /// Replace a transition's symbols. An empty list is rejected and the
    /// previous symbols are kept.
    pub fn set_transition_symbols(
        &mut self,
        id: &str,
        symbols: Vec<String>,
    ) -> Result<(), ModelError> {
        let transition = self
            .transitions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ModelError::UnknownTransition(id.to_string()))?;
        if symbols.is_empty() {
            return Err(ModelError::EmptySymbols);
        }
        transition.symbols.clear();
        transition.merge_symbols(symbols);
        Ok(())
    }

    pub fn delete_transition(&mut self, id: &str) -> Result<Transition, ModelError> {
        let index = self
            .transitions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ModelError::UnknownTransition(id.to_string()))?;
        Ok(self.transitions.remove(index))
    }

    /// Drop every state and transition, keeping id and name.
    pub fn clear(&mut self) {
        self.states.clear();
        self.transitions.clear();
    }

    fn state_mut(&mut self, id: &str) -> Result<&mut State, ModelError> {
        self.states
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ModelError::UnknownState(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EPSILON;
    use crate::validation::Violation;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn two_states() -> (Automaton, StateId, StateId) {
        let mut automaton = Automaton::new("test");
        let q0 = automaton.add_state("q0", 0.0, 0.0);
        let q1 = automaton.add_state("q1", 100.0, 0.0);
        (automaton, q0, q1)
    }

    #[test]
    fn first_state_becomes_start() {
        let (automaton, q0, q1) = two_states();
        assert!(automaton.state(&q0).unwrap().is_start);
        assert!(!automaton.state(&q1).unwrap().is_start);
    }

    #[test]
    fn set_start_clears_previous_start() {
        let (mut automaton, q0, q1) = two_states();
        automaton.set_start_state(&q1).unwrap();

        assert!(!automaton.state(&q0).unwrap().is_start);
        assert_eq!(automaton.start_state().unwrap().id, q1);
        assert_eq!(automaton.states().iter().filter(|s| s.is_start).count(), 1);
    }

    #[test]
    fn set_start_on_unknown_state_changes_nothing() {
        let (mut automaton, q0, _) = two_states();
        let result = automaton.set_start_state("missing");

        assert_eq!(result, Err(ModelError::UnknownState("missing".into())));
        assert_eq!(automaton.start_state().unwrap().id, q0);
    }

    #[test]
    fn toggle_accept_flips_marker() {
        let (mut automaton, q0, _) = two_states();
        assert_eq!(automaton.toggle_accept_state(&q0), Ok(true));
        assert_eq!(automaton.toggle_accept_state(&q0), Ok(false));
    }

    #[test]
    fn add_transition_merges_into_existing_pair() {
        let (mut automaton, q0, q1) = two_states();
        let first = automaton
            .add_transition(&q0, &q1, symbols(&["a", "b"]))
            .unwrap();
        let second = automaton
            .add_transition(&q0, &q1, symbols(&["b", "c"]))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(automaton.transitions().len(), 1);
        assert_eq!(automaton.transitions()[0].symbols, symbols(&["a", "b", "c"]));
    }

    #[test]
    fn reverse_pair_is_a_separate_transition() {
        let (mut automaton, q0, q1) = two_states();
        automaton.add_transition(&q0, &q1, symbols(&["a"])).unwrap();
        automaton.add_transition(&q1, &q0, symbols(&["a"])).unwrap();
        assert_eq!(automaton.transitions().len(), 2);
    }

    #[test]
    fn add_transition_requires_existing_endpoints() {
        let (mut automaton, q0, _) = two_states();
        let result = automaton.add_transition(&q0, "ghost", symbols(&["a"]));
        assert_eq!(result, Err(ModelError::UnknownState("ghost".into())));
        assert!(automaton.transitions().is_empty());
    }

    #[test]
    fn new_transition_needs_symbols() {
        let (mut automaton, q0, q1) = two_states();
        let result = automaton.add_transition(&q0, &q1, Vec::new());
        assert_eq!(result, Err(ModelError::EmptySymbols));
    }

    #[test]
    fn empty_symbol_edit_keeps_previous_value() {
        let (mut automaton, q0, q1) = two_states();
        let id = automaton.add_transition(&q0, &q1, symbols(&["a"])).unwrap();

        assert_eq!(
            automaton.set_transition_symbols(&id, Vec::new()),
            Err(ModelError::EmptySymbols)
        );
        assert_eq!(automaton.transition(&id).unwrap().symbols, symbols(&["a"]));

        automaton
            .set_transition_symbols(&id, symbols(&["x", EPSILON, "x"]))
            .unwrap();
        assert_eq!(
            automaton.transition(&id).unwrap().symbols,
            symbols(&["x", EPSILON])
        );
    }

    #[test]
    fn delete_state_cascades_to_transitions() {
        let (mut automaton, q0, q1) = two_states();
        let q2 = automaton.add_state("q2", 200.0, 0.0);
        automaton.add_transition(&q0, &q1, symbols(&["a"])).unwrap();
        automaton.add_transition(&q1, &q2, symbols(&["b"])).unwrap();
        automaton.add_transition(&q1, &q1, symbols(&["c"])).unwrap();
        automaton.add_transition(&q0, &q2, symbols(&["d"])).unwrap();

        automaton.delete_state(&q1).unwrap();

        assert_eq!(automaton.states().len(), 2);
        assert_eq!(automaton.transitions().len(), 1);
        assert!(automaton
            .transitions()
            .iter()
            .all(|t| t.from != q1 && t.to != q1));
    }

    #[test]
    fn delete_unknown_transition_fails() {
        let (mut automaton, _, _) = two_states();
        assert_eq!(
            automaton.delete_transition("nope"),
            Err(ModelError::UnknownTransition("nope".into()))
        );
    }

    #[test]
    fn clear_keeps_identity() {
        let (mut automaton, q0, q1) = two_states();
        automaton.add_transition(&q0, &q1, symbols(&["a"])).unwrap();
        let id = automaton.id().to_string();

        automaton.clear();

        assert!(automaton.is_empty());
        assert!(automaton.transitions().is_empty());
        assert_eq!(automaton.id(), id);
    }

    #[test]
    fn from_parts_rejects_dangling_transition() {
        let states = vec![State::new("q0", "q0", 0.0, 0.0).with_start(true)];
        let transitions = vec![Transition::new("t0", "q0", "q9", ["a"])];

        let err = Automaton::from_parts("a1", "broken", states, transitions).unwrap_err();
        assert!(err.violations.contains(&Violation::UnknownDestination {
            transition: "t0".into(),
            state: "q9".into(),
        }));
    }

    #[test]
    fn deserialization_runs_integrity_checks() {
        let json = r#"{
            "id": "a1",
            "name": "two starts",
            "states": [
                {"id":"q0","name":"q0","x":0,"y":0,"isStart":true,"isAccept":false},
                {"id":"q1","name":"q1","x":0,"y":0,"isStart":true,"isAccept":false}
            ],
            "transitions": []
        }"#;
        let result: Result<Automaton, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn automaton_serialization_round_trips() {
        let (mut automaton, q0, q1) = two_states();
        automaton.add_transition(&q0, &q1, symbols(&["a", EPSILON])).unwrap();

        let json = serde_json::to_string(&automaton).unwrap();
        let back: Automaton = serde_json::from_str(&json).unwrap();
        assert_eq!(back, automaton);
    }
}
