// SPDX-License-Identifier: MIT

//! Tick driver for a timer session.
//!
//! One tokio task owns the once-per-second cadence; every control
//! operation aborts it before touching the session, so a tick can never
//! fire after a stop and two countdowns can never run at once. Phase
//! completions are emitted on an unbounded channel, fire-and-forget: a
//! closed receiver never blocks the phase advance.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::services::session::{TimerSession, TimerSnapshot};
use crate::services::timer::Phase;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Event emitted when a phase completes. Carries everything the
/// presentation layer needs, including whether to play the sound cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub finished: Phase,
    pub next: Phase,
    pub auto_started: bool,
    pub play_sound: bool,
}

/// Handle owning a timer session and its tick task.
pub struct TimerHandle {
    session: Arc<Mutex<TimerSession>>,
    events: mpsc::UnboundedSender<TimerEvent>,
    tick_task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    /// Wrap a session, returning the handle and the completion-event
    /// receiver.
    pub fn new(session: TimerSession) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (
            Self {
                session: Arc::new(Mutex::new(session)),
                events,
                tick_task: None,
            },
            receiver,
        )
    }

    /// Start the countdown. Idempotent: a second start while the ticker is
    /// alive does nothing, so duplicate countdowns cannot exist.
    pub async fn start(&mut self) {
        {
            let mut session = self.session.lock().await;
            if session.is_running() && self.ticker_alive() {
                return;
            }
            session.start();
        }
        self.cancel_tick_task();
        self.spawn_tick_task();
    }

    /// Pause, retaining the remaining time.
    pub async fn pause(&mut self) {
        self.cancel_tick_task();
        self.session.lock().await.pause();
    }

    /// Stop: pause and reseed the current phase.
    pub async fn stop(&mut self) {
        self.cancel_tick_task();
        self.session.lock().await.stop();
    }

    /// Full reset (also discards the ephemeral override).
    pub async fn reset(&mut self) {
        self.cancel_tick_task();
        self.session.lock().await.reset();
    }

    /// Jump to a phase, paused.
    pub async fn select_phase(&mut self, phase: Phase) {
        self.cancel_tick_task();
        self.session.lock().await.select_phase(phase);
    }

    /// Run an operation against the underlying session (preset selection,
    /// preference updates, …).
    pub async fn with_session<T>(&self, f: impl FnOnce(&mut TimerSession) -> T) -> T {
        let mut session = self.session.lock().await;
        f(&mut session)
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        self.session.lock().await.snapshot()
    }

    fn ticker_alive(&self) -> bool {
        self.tick_task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn cancel_tick_task(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
    }

    fn spawn_tick_task(&mut self) {
        let session = Arc::clone(&self.session);
        let events = self.events.clone();

        self.tick_task = Some(tokio::spawn(async move {
            // First tick lands one full period after start.
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

            loop {
                interval.tick().await;

                let completion = {
                    let mut session = session.lock().await;
                    if !session.is_running() {
                        break;
                    }
                    session.tick()
                };

                if let Some(completion) = completion {
                    let _ = events.send(TimerEvent {
                        finished: completion.finished,
                        next: completion.next,
                        auto_started: completion.auto_started,
                        play_sound: completion.play_sound,
                    });

                    if !completion.auto_started {
                        break;
                    }
                }
            }
        }));
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel_tick_task();
    }
}
