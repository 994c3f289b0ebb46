//! Step Through
//!
//! This example walks an epsilon-NFA through an input string one symbol at a
//! time, then rewinds it, printing the active states after every call.
//!
//! Key concepts:
//! - Epsilon-closure of the start state before any input is read
//! - Forward steps recorded in history
//! - Backward steps replaying that history in reverse
//! - Checkpointing a paused run and resuming it
//!
//! Run with: RUST_LOG=automaton_lab=debug cargo run --example step_through

use automaton_lab::automaton;
use automaton_lab::core::EPSILON;
use automaton_lab::document::SessionCheckpoint;
use automaton_lab::engine::{ExecutionState, StepResult};
use automaton_lab::session::Session;
use tracing_subscriber::EnvFilter;

fn print_state(label: &str, state: &ExecutionState) {
    let active: Vec<&str> = state.current().iter().map(String::as_str).collect();
    println!(
        "  {label:<10} step {} | read '{}' | left '{}' | active {{{}}} | {}",
        state.step(),
        state.processed_input(),
        state.remaining_input(),
        active.join(", "),
        state.status()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Step Through ===\n");

    // Strings over {a, b} ending in "ab"
    let automaton = automaton! {
        name: "ends in ab",
        states: [q0, q1, q2, q3],
        start: q0,
        accept: [q3],
        transitions: [
            q0 -> q0: ["a", "b"],
            q0 -> q1: [EPSILON],
            q1 -> q2: ["a"],
            q2 -> q3: ["b"],
        ],
    }?;

    let mut session = Session::with_automaton(automaton, Default::default());
    print_state("start", session.test_string("bab"));

    loop {
        match session.step_forward() {
            StepResult::Consumed { symbol, .. } => {
                print_state(&format!("read {symbol}"), session.execution());
                println!("             via {:?}", session.execution().last_transitions());
            }
            _ => break,
        }
    }
    println!("\nResult: {}\n", session.execution().status());

    println!("Rewinding two steps:");
    for _ in 0..2 {
        if let StepResult::Rewound { symbol } = session.step_backward() {
            print_state(&format!("undo {symbol}"), session.execution());
        }
    }

    println!("\nCheckpointing the paused run:");
    let json = SessionCheckpoint::capture(&session).to_json()?;
    let mut resumed = SessionCheckpoint::from_json(&json)?.restore()?;
    println!("  checkpoint is {} bytes of JSON", json.len());

    let status = resumed.run_to_end();
    print_state("resumed", resumed.execution());
    println!("\nResumed run finished: {status}");

    Ok(())
}
