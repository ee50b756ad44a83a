//! Wall-clock pacing for a [`BattleSession`].
//!
//! The session itself is synchronous. The runner owns the timer task that
//! calls [`BattleSession::advance_turn`] once per turn delay and a second,
//! shorter timer per turn that clears that turn's presentation events.

use crate::battle::{BattleSession, TurnReport};
use crate::rolls::{RandomSource, SeededRolls};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

pub type SharedSession<R> = Arc<Mutex<BattleSession<R>>>;

pub struct BattleRunner<R: RandomSource + Send + 'static = SeededRolls> {
    session: SharedSession<R>,
    turn_task: Option<JoinHandle<()>>,
}

impl<R: RandomSource + Send + 'static> BattleRunner<R> {
    pub fn new(session: BattleSession<R>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            turn_task: None,
        }
    }

    /// Handle for reading state between turns.
    pub fn session(&self) -> SharedSession<R> {
        Arc::clone(&self.session)
    }

    /// Starts a fresh battle and arms the turn timer. Reports for each
    /// resolved turn arrive on the returned channel, which closes when the
    /// battle ends or the runner is stopped or reset.
    pub async fn start(&mut self) -> mpsc::UnboundedReceiver<TurnReport> {
        self.cancel_timer();
        let (generation, turn_delay, clear_delay) = {
            let mut session = self.session.lock().await;
            session.start();
            (
                session.generation(),
                session.config().turn_delay(),
                session.config().effect_clear_delay(),
            )
        };
        let (tx, rx) = mpsc::unbounded_channel();
        let shared = Arc::clone(&self.session);
        self.turn_task = Some(tokio::spawn(drive_turns(
            shared,
            generation,
            turn_delay,
            clear_delay,
            tx,
        )));
        rx
    }

    /// Halts the battle where it stands.
    pub async fn stop(&mut self) {
        self.cancel_timer();
        self.session.lock().await.stop();
    }

    /// Cancels any pending turn and returns to the pre-battle state.
    pub async fn reset(&mut self) {
        self.cancel_timer();
        self.session.lock().await.reset();
    }

    /// Waits for the turn timer to finish on its own.
    pub async fn finished(&mut self) {
        if let Some(task) = self.turn_task.take() {
            // An aborted task is the only error, and it means we are done anyway.
            let _ = task.await;
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(task) = self.turn_task.take() {
            task.abort();
        }
    }
}

impl<R: RandomSource + Send + 'static> Drop for BattleRunner<R> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

async fn drive_turns<R: RandomSource + Send + 'static>(
    session: SharedSession<R>,
    generation: u64,
    turn_delay: Duration,
    clear_delay: Duration,
    reports: mpsc::UnboundedSender<TurnReport>,
) {
    loop {
        sleep(turn_delay).await;
        let (report, running) = {
            let mut guard = session.lock().await;
            if guard.generation() != generation || !guard.is_running() {
                debug!(generation, "turn timer fired against a stale battle");
                return;
            }
            let report = guard.advance_turn();
            (report, guard.is_running())
        };

        let turn = report.turn;
        let clear_session = Arc::clone(&session);
        tokio::spawn(async move {
            sleep(clear_delay).await;
            let mut guard = clear_session.lock().await;
            if guard.generation() == generation {
                guard.clear_events_for_turn(turn);
            }
        });

        // Nobody listening is fine; the battle keeps going.
        let _ = reports.send(report);
        if !running {
            return;
        }
    }
}
