//! Timer-driven auto-play.
//!
//! Auto-play repeatedly steps a session forward after a fixed delay. It is a
//! cooperative loop: each iteration owns exactly one pending sleep, and a
//! stop signal drops that sleep before it can fire. A stopped player never
//! steps again.

use crate::engine::ExecutionStatus;
use crate::session::Session;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// How an auto-play loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The run left `Running`; carries the status it reached
    Finished(ExecutionStatus),

    /// Stopped by the handle; carries the step count at that moment
    Stopped { step: usize },
}

/// Stops an [`AutoPlayer`]. Dropping the handle stops it as well.
#[derive(Debug)]
pub struct PlaybackHandle {
    stop: watch::Sender<bool>,
}

impl PlaybackHandle {
    pub fn stop(&self) {
        self.stop.send_replace(true);
    }
}

/// Steps a session forward once per delay while its run is `Running`.
///
/// # Example
///
/// ```rust
/// use automaton_lab::automaton;
/// use automaton_lab::config::LabConfig;
/// use automaton_lab::engine::ExecutionStatus;
/// use automaton_lab::playback::{AutoPlayer, PlaybackOutcome};
/// use automaton_lab::session::Session;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let automaton = automaton! {
///     states: [q0],
///     start: q0,
///     accept: [q0],
///     transitions: [q0 -> q0: ["a"]],
/// }
/// .unwrap();
/// let mut session = Session::with_automaton(automaton, LabConfig::default());
/// session.test_string("aa");
///
/// let (mut player, _handle) = AutoPlayer::new(Duration::from_millis(1));
/// let outcome = player.play(&mut session).await;
///
/// assert_eq!(outcome, PlaybackOutcome::Finished(ExecutionStatus::Accepted));
/// # }
/// ```
#[derive(Debug)]
pub struct AutoPlayer {
    delay: Duration,
    stop: watch::Receiver<bool>,
}

impl AutoPlayer {
    pub fn new(delay: Duration) -> (Self, PlaybackHandle) {
        let (tx, rx) = watch::channel(false);
        (Self { delay, stop: rx }, PlaybackHandle { stop: tx })
    }

    /// Create a player using the session's configured delay.
    pub fn for_session(session: &Session) -> (Self, PlaybackHandle) {
        Self::new(session.config().autoplay_delay())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Drive `session` until its run finishes or the handle stops playback.
    pub async fn play(&mut self, session: &mut Session) -> PlaybackOutcome {
        loop {
            if *self.stop.borrow() {
                return self.stopped(session);
            }

            let status = session.execution().status();
            if status != ExecutionStatus::Running {
                debug!(%status, step = session.execution().step(), "auto-play finished");
                return PlaybackOutcome::Finished(status);
            }

            tokio::select! {
                biased;

                changed = self.stop.changed() => {
                    if changed.is_err() {
                        return self.stopped(session);
                    }
                }
                _ = tokio::time::sleep(self.delay) => {
                    let result = session.step_forward();
                    debug!(?result, "auto-play tick");
                }
            }
        }
    }

    fn stopped(&self, session: &Session) -> PlaybackOutcome {
        let step = session.execution().step();
        debug!(step, "auto-play stopped");
        PlaybackOutcome::Stopped { step }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton;
    use tokio::time::{sleep, Instant};

    fn looping_session(input: &str) -> Session {
        let automaton = automaton! {
            states: [q0, q1],
            start: q0,
            accept: [q1],
            transitions: [
                q0 -> q0: ["a"],
                q0 -> q1: ["b"],
            ],
        }
        .unwrap();
        let mut session = Session::with_automaton(automaton, Default::default());
        session.test_string(input);
        session
    }

    #[tokio::test(start_paused = true)]
    async fn plays_until_run_finishes() {
        let mut session = looping_session("aab");
        let (mut player, _handle) = AutoPlayer::new(Duration::from_millis(500));
        let started = Instant::now();

        let outcome = player.play(&mut session).await;

        assert_eq!(outcome, PlaybackOutcome::Finished(ExecutionStatus::Accepted));
        assert_eq!(session.execution().step(), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_dead_configuration() {
        let mut session = looping_session("acaa");
        let (mut player, _handle) = AutoPlayer::new(Duration::from_millis(100));

        let outcome = player.play(&mut session).await;

        assert_eq!(outcome, PlaybackOutcome::Finished(ExecutionStatus::Rejected));
        assert_eq!(session.execution().step(), 2);
        assert_eq!(session.execution().remaining_input(), "aa");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_pending_step() {
        let mut session = looping_session("aaaab");
        let (mut player, handle) = AutoPlayer::new(Duration::from_millis(500));

        let stopper = async {
            sleep(Duration::from_millis(750)).await;
            handle.stop();
        };
        let (outcome, ()) = tokio::join!(player.play(&mut session), stopper);

        assert_eq!(outcome, PlaybackOutcome::Stopped { step: 1 });

        sleep(Duration::from_secs(5)).await;
        assert_eq!(session.execution().step(), 1);
        assert_eq!(session.execution().status(), ExecutionStatus::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_before_play_never_steps() {
        let mut session = looping_session("ab");
        let (mut player, handle) = AutoPlayer::new(Duration::from_millis(100));
        handle.stop();

        assert_eq!(
            player.play(&mut session).await,
            PlaybackOutcome::Stopped { step: 0 }
        );
        assert_eq!(session.execution().step(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_playback() {
        let mut session = looping_session("ab");
        let (mut player, handle) = AutoPlayer::new(Duration::from_millis(100));
        drop(handle);

        assert_eq!(
            player.play(&mut session).await,
            PlaybackOutcome::Stopped { step: 0 }
        );
    }

    #[tokio::test]
    async fn idle_session_finishes_immediately() {
        let mut session = Session::default();
        let (mut player, _handle) = AutoPlayer::for_session(&session);

        assert_eq!(player.delay(), Duration::from_millis(500));
        assert_eq!(
            player.play(&mut session).await,
            PlaybackOutcome::Finished(ExecutionStatus::Idle)
        );
    }
}
