//! Auto-play
//!
//! This example drives a run with the timer-based auto-player and stops a
//! second run part-way through.
//!
//! Run with: RUST_LOG=automaton_lab=debug cargo run --example autoplay

use automaton_lab::automaton;
use automaton_lab::config::LabConfig;
use automaton_lab::playback::AutoPlayer;
use automaton_lab::session::Session;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Auto-play ===\n");

    // Even number of 0s
    let automaton = automaton! {
        name: "even zeros",
        states: [even, odd],
        start: even,
        accept: [even],
        transitions: [
            even -> odd: ["0"],
            odd -> even: ["0"],
            even -> even: ["1"],
            odd -> odd: ["1"],
        ],
    }?;

    let config = LabConfig::from_json_str(r#"{ "autoplayDelayMs": 200 }"#)?;
    let mut session = Session::with_automaton(automaton, config);

    println!("Playing '0110' at {:?} per step", session.config().autoplay_delay());
    session.test_string("0110");
    let (mut player, _handle) = AutoPlayer::for_session(&session);
    let outcome = player.play(&mut session).await;
    println!("  outcome: {outcome:?}\n");

    println!("Playing '0101010' and stopping after 500ms");
    session.test_string("0101010");
    let (mut player, handle) = AutoPlayer::for_session(&session);
    let stopper = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        handle.stop();
    };
    let (outcome, ()) = tokio::join!(player.play(&mut session), stopper);
    println!("  outcome: {outcome:?}");
    println!(
        "  paused with '{}' read and '{}' left",
        session.execution().processed_input(),
        session.execution().remaining_input()
    );

    Ok(())
}
