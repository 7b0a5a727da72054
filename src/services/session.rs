// SPDX-License-Identifier: MIT

//! A client timer session: the countdown engine plus the configuration
//! layers that feed it.
//!
//! The session tracks which duration source is active. The selected preset
//! and the ephemeral custom override share one slot; activating either
//! deactivates the other. The custom override is session-only: it is never
//! persisted and `reset` discards it.

use serde::Serialize;

use crate::models::Preference;
use crate::services::resolver::{resolve, DurationSet, EffectiveConfig};
use crate::services::timer::{format_time, Completion, Phase, TimerEngine};

/// Timer session state, memory-only.
#[derive(Debug, Clone)]
pub struct TimerSession {
    authenticated: bool,
    preference: Option<Preference>,
    selected_preset: Option<DurationSet>,
    custom_override: Option<DurationSet>,
    engine: TimerEngine,
}

/// Point-in-time view of the session for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub running: bool,
    pub time_left: i64,
    pub display: String,
    pub completed_work_sessions: i64,
    pub progress: f64,
}

impl TimerSession {
    pub fn new(preference: Option<Preference>, authenticated: bool) -> Self {
        let config = resolve(preference.as_ref(), None, None, authenticated);
        Self {
            authenticated,
            preference,
            selected_preset: None,
            custom_override: None,
            engine: TimerEngine::new(&config),
        }
    }

    /// The configuration currently in effect, resolved fresh on each call.
    pub fn effective(&self) -> EffectiveConfig {
        resolve(
            self.preference.as_ref(),
            self.selected_preset.as_ref(),
            self.custom_override.as_ref(),
            self.authenticated,
        )
    }

    /// Replace the stored-preference snapshot after an authoritative API
    /// response. The running countdown is not reseeded; only the
    /// resolution layers change.
    pub fn set_preference(&mut self, preference: Option<Preference>) {
        self.preference = preference;
    }

    /// Activate a preset's durations, deactivating any custom override.
    pub fn select_preset(&mut self, durations: DurationSet) {
        self.custom_override = None;
        self.selected_preset = Some(durations);
    }

    /// Back to the stored preference's durations ("use default").
    pub fn clear_preset(&mut self) {
        self.selected_preset = None;
    }

    /// Activate an ephemeral custom duration set, deactivating any
    /// selected preset.
    pub fn set_custom_override(&mut self, durations: DurationSet) {
        self.selected_preset = None;
        self.custom_override = Some(durations);
    }

    pub fn selected_preset(&self) -> Option<&DurationSet> {
        self.selected_preset.as_ref()
    }

    pub fn custom_override(&self) -> Option<&DurationSet> {
        self.custom_override.as_ref()
    }

    // ─── Engine operations ───────────────────────────────────────

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn stop(&mut self) {
        let config = self.effective();
        self.engine.stop(&config);
    }

    /// Full reset: Work/paused, zeroed session counter, and the ephemeral
    /// override discarded.
    pub fn reset(&mut self) {
        self.custom_override = None;
        let config = self.effective();
        self.engine.reset(&config);
    }

    pub fn select_phase(&mut self, phase: Phase) {
        let config = self.effective();
        self.engine.select_phase(phase, &config);
    }

    pub fn tick(&mut self) -> Option<Completion> {
        let config = self.effective();
        self.engine.tick(&config)
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let config = self.effective();
        TimerSnapshot {
            phase: self.engine.phase(),
            running: self.engine.is_running(),
            time_left: self.engine.time_left(),
            display: format_time(self.engine.time_left()),
            completed_work_sessions: self.engine.completed_work_sessions(),
            progress: self.engine.progress(&config),
        }
    }
}
