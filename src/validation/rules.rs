//! Integrity rules for automaton structures using Validation.

use crate::core::{State, Transition};
use crate::validation::violations::{IntegrityError, Violation};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single rule over a single element.
pub type Check = Validation<(), NonEmptyVec<Violation>>;

fn pass() -> Check {
    Validation::success(())
}

fn flag(violation: Violation) -> Check {
    Validation::fail(violation)
}

/// One check per state: its id must not repeat an earlier id.
pub fn unique_state_ids(states: &[State]) -> Vec<Check> {
    let mut seen = HashSet::new();
    states
        .iter()
        .map(|s| {
            if seen.insert(s.id.as_str()) {
                pass()
            } else {
                flag(Violation::DuplicateStateId { id: s.id.clone() })
            }
        })
        .collect()
}

/// One check per transition: its id must not repeat an earlier id.
pub fn unique_transition_ids(transitions: &[Transition]) -> Vec<Check> {
    let mut seen = HashSet::new();
    transitions
        .iter()
        .map(|t| {
            if seen.insert(t.id.as_str()) {
                pass()
            } else {
                flag(Violation::DuplicateTransitionId { id: t.id.clone() })
            }
        })
        .collect()
}

/// Two checks per transition: source and destination must be declared states.
pub fn endpoints_exist(states: &[State], transitions: &[Transition]) -> Vec<Check> {
    let known: HashSet<&str> = states.iter().map(|s| s.id.as_str()).collect();
    let mut checks = Vec::with_capacity(transitions.len() * 2);

    for t in transitions {
        checks.push(if known.contains(t.from.as_str()) {
            pass()
        } else {
            flag(Violation::UnknownSource {
                transition: t.id.clone(),
                state: t.from.clone(),
            })
        });
        checks.push(if known.contains(t.to.as_str()) {
            pass()
        } else {
            flag(Violation::UnknownDestination {
                transition: t.id.clone(),
                state: t.to.clone(),
            })
        });
    }

    checks
}

/// At most one state may carry the start marker.
pub fn single_start_state(states: &[State]) -> Check {
    let starts: Vec<String> = states
        .iter()
        .filter(|s| s.is_start)
        .map(|s| s.id.clone())
        .collect();

    if starts.len() > 1 {
        flag(Violation::MultipleStartStates { ids: starts })
    } else {
        pass()
    }
}

/// One check per transition: it must fire on at least one symbol.
pub fn symbols_present(transitions: &[Transition]) -> Vec<Check> {
    transitions
        .iter()
        .map(|t| {
            if t.symbols.is_empty() {
                flag(Violation::EmptySymbols {
                    transition: t.id.clone(),
                })
            } else {
                pass()
            }
        })
        .collect()
}

/// Run every rule, accumulating ALL violations.
/// Returns Validation::Success(()) if the structure is consistent.
pub fn validate_structure(
    states: &[State],
    transitions: &[Transition],
) -> Validation<(), NonEmptyVec<Violation>> {
    let mut checks = vec![single_start_state(states)];
    checks.extend(unique_state_ids(states));
    checks.extend(unique_transition_ids(transitions));
    checks.extend(endpoints_exist(states, transitions));
    checks.extend(symbols_present(transitions));

    Validation::all_vec(checks).map(|_| ())
}

/// [`validate_structure`] as a `Result`, for callers that only need to
/// stop on failure.
pub fn check_structure(states: &[State], transitions: &[Transition]) -> Result<(), IntegrityError> {
    match validate_structure(states, transitions) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(IntegrityError {
            violations: errors.iter().cloned().collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(id: &str) -> State {
        State::new(id, id, 0.0, 0.0)
    }

    #[test]
    fn consistent_structure_passes() {
        let states = vec![state("q0").with_start(true), state("q1").with_accept(true)];
        let transitions = vec![Transition::new("t0", "q0", "q1", ["a"])];

        assert!(validate_structure(&states, &transitions).is_success());
        assert!(check_structure(&states, &transitions).is_ok());
    }

    #[test]
    fn empty_structure_passes() {
        assert!(check_structure(&[], &[]).is_ok());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let states = vec![
            state("q0").with_start(true),
            state("q0"),
            state("q1").with_start(true),
        ];
        let transitions = vec![
            Transition::new("t0", "qx", "q1", ["a"]),
            Transition::new("t0", "q0", "qy", Vec::<String>::new()),
        ];

        let err = check_structure(&states, &transitions).unwrap_err();

        assert_eq!(err.violations.len(), 6);
        assert!(err
            .violations
            .iter()
            .any(|v| matches!(v, Violation::MultipleStartStates { ids } if ids.len() == 2)));
        assert!(err
            .violations
            .contains(&Violation::DuplicateStateId { id: "q0".into() }));
        assert!(err
            .violations
            .contains(&Violation::DuplicateTransitionId { id: "t0".into() }));
        assert!(err.violations.contains(&Violation::UnknownSource {
            transition: "t0".into(),
            state: "qx".into(),
        }));
        assert!(err.violations.contains(&Violation::UnknownDestination {
            transition: "t0".into(),
            state: "qy".into(),
        }));
        assert!(err
            .violations
            .contains(&Violation::EmptySymbols { transition: "t0".into() }));
    }

    #[test]
    fn failure_lists_every_dangling_endpoint() {
        let states = vec![state("q0")];
        let transitions = vec![
            Transition::new("t0", "q0", "q1", ["a"]),
            Transition::new("t1", "q2", "q0", ["b"]),
        ];

        match validate_structure(&states, &transitions) {
            Validation::Failure(errors) => assert_eq!(errors.len(), 2),
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn integrity_error_message_lists_violations() {
        let err = IntegrityError {
            violations: vec![Violation::EmptySymbols {
                transition: "t3".into(),
            }],
        };
        let message = err.to_string();
        assert!(message.contains("1 integrity violation"));
        assert!(message.contains("'t3'"));
    }
}
