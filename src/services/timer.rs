// SPDX-License-Identifier: MIT

//! Countdown state machine for the work/break cycle.
//!
//! `TimerEngine` is pure: it never schedules anything and never reads the
//! clock. It is advanced by an external once-per-second `tick` (see
//! `ticker`), and every operation takes the current [`EffectiveConfig`] so
//! durations are re-read rather than cached.

use serde::{Deserialize, Serialize};

use crate::services::resolver::EffectiveConfig;

/// Phase of the timer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Result of a phase completing: which phase finished, where the cycle
/// moved, whether it kept running, and whether a sound cue should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub finished: Phase,
    pub next: Phase,
    pub auto_started: bool,
    pub play_sound: bool,
}

/// The countdown engine: phase crossed with running/paused, plus the
/// completed-work-session counter that routes breaks.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    phase: Phase,
    running: bool,
    /// Seconds remaining in the current phase
    time_left: i64,
    completed_work_sessions: i64,
}

impl TimerEngine {
    /// A fresh engine: Work, paused, seeded to the full work duration.
    pub fn new(config: &EffectiveConfig) -> Self {
        Self {
            phase: Phase::Work,
            running: false,
            time_left: full_duration_secs(config, Phase::Work),
            completed_work_sessions: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn time_left(&self) -> i64 {
        self.time_left
    }

    pub fn completed_work_sessions(&self) -> i64 {
        self.completed_work_sessions
    }

    /// Begin (or resume) the countdown. No-op if already running.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Halt the countdown, retaining `time_left`.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Halt and discard progress into the current phase; the session
    /// counter is untouched.
    pub fn stop(&mut self, config: &EffectiveConfig) {
        self.running = false;
        self.time_left = full_duration_secs(config, self.phase);
    }

    /// Back to Work/paused with a full work duration and a zeroed
    /// session counter.
    pub fn reset(&mut self, config: &EffectiveConfig) {
        self.phase = Phase::Work;
        self.running = false;
        self.time_left = full_duration_secs(config, Phase::Work);
        self.completed_work_sessions = 0;
    }

    /// Jump directly to a phase, paused, reseeded to its full duration.
    pub fn select_phase(&mut self, phase: Phase, config: &EffectiveConfig) {
        self.phase = phase;
        self.running = false;
        self.time_left = full_duration_secs(config, phase);
    }

    /// Advance the countdown by one second. Returns the completion when the
    /// phase finishes. Does nothing while paused.
    ///
    /// A non-positive seeded duration completes on the first tick.
    pub fn tick(&mut self, config: &EffectiveConfig) -> Option<Completion> {
        if !self.running {
            return None;
        }

        self.time_left -= 1;
        if self.time_left <= 0 {
            Some(self.complete(config))
        } else {
            None
        }
    }

    fn complete(&mut self, config: &EffectiveConfig) -> Completion {
        let finished = self.phase;
        self.running = false;

        let auto_started = if finished.is_break() {
            self.phase = Phase::Work;
            config.auto_start_pomodoros
        } else {
            self.completed_work_sessions += 1;
            let interval = config.long_break_interval.max(1);
            self.phase = if self.completed_work_sessions % interval == 0 {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            };
            config.auto_start_breaks
        };

        self.time_left = full_duration_secs(config, self.phase);
        if auto_started {
            self.running = true;
        }

        Completion {
            finished,
            next: self.phase,
            auto_started,
            play_sound: config.sound_enabled,
        }
    }

    /// Fraction of the current phase elapsed, clamped to [0, 1]. The
    /// denominator is re-read from `config` on every call, so a live
    /// preference change moves the displayed progress without touching
    /// the countdown itself.
    pub fn progress(&self, config: &EffectiveConfig) -> f64 {
        let total = full_duration_secs(config, self.phase);
        if total <= 0 {
            return 1.0;
        }
        ((total - self.time_left) as f64 / total as f64).clamp(0.0, 1.0)
    }
}

fn full_duration_secs(config: &EffectiveConfig, phase: Phase) -> i64 {
    config.duration_minutes(phase) * 60
}

/// Format seconds remaining as `mm:ss` for display; negative values
/// render as `00:00`.
pub fn format_time(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EffectiveConfig {
        EffectiveConfig::defaults()
    }

    /// Run ticks until the current phase completes, returning the
    /// completion. Panics if the phase never finishes.
    fn run_to_completion(engine: &mut TimerEngine, config: &EffectiveConfig) -> Completion {
        for _ in 0..=(121 * 60) {
            if let Some(completion) = engine.tick(config) {
                return completion;
            }
        }
        panic!("phase never completed");
    }

    #[test]
    fn test_initial_state() {
        let engine = TimerEngine::new(&config());
        assert_eq!(engine.phase(), Phase::Work);
        assert!(!engine.is_running());
        assert_eq!(engine.time_left(), 25 * 60);
        assert_eq!(engine.completed_work_sessions(), 0);
    }

    #[test]
    fn test_tick_does_nothing_while_paused() {
        let cfg = config();
        let mut engine = TimerEngine::new(&cfg);

        assert_eq!(engine.tick(&cfg), None);
        assert_eq!(engine.time_left(), 25 * 60);
    }

    #[test]
    fn test_start_is_idempotent_and_ticks_count_down() {
        let cfg = config();
        let mut engine = TimerEngine::new(&cfg);

        engine.start();
        engine.start();
        assert!(engine.is_running());

        assert_eq!(engine.tick(&cfg), None);
        assert_eq!(engine.tick(&cfg), None);
        assert_eq!(engine.time_left(), 25 * 60 - 2);
    }

    #[test]
    fn test_pause_retains_time_left() {
        let cfg = config();
        let mut engine = TimerEngine::new(&cfg);

        engine.start();
        engine.tick(&cfg);
        engine.pause();

        assert!(!engine.is_running());
        assert_eq!(engine.time_left(), 25 * 60 - 1);
        assert_eq!(engine.tick(&cfg), None);
        assert_eq!(engine.time_left(), 25 * 60 - 1);
    }

    #[test]
    fn test_stop_reseeds_current_phase_but_keeps_counter() {
        let cfg = config();
        let mut engine = TimerEngine::new(&cfg);

        engine.start();
        run_to_completion(&mut engine, &cfg); // finish one work session
        assert_eq!(engine.completed_work_sessions(), 1);
        assert_eq!(engine.phase(), Phase::ShortBreak);

        engine.start();
        engine.tick(&cfg);
        engine.stop(&cfg);

        assert!(!engine.is_running());
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(engine.time_left(), 5 * 60);
        assert_eq!(engine.completed_work_sessions(), 1);
    }

    #[test]
    fn test_reset_from_any_state() {
        let cfg = config();
        let mut engine = TimerEngine::new(&cfg);

        engine.start();
        run_to_completion(&mut engine, &cfg);
        engine.select_phase(Phase::LongBreak, &cfg);
        engine.start();
        engine.tick(&cfg);

        engine.reset(&cfg);

        assert_eq!(engine.phase(), Phase::Work);
        assert!(!engine.is_running());
        assert_eq!(engine.time_left(), 25 * 60);
        assert_eq!(engine.completed_work_sessions(), 0);
    }

    #[test]
    fn test_work_completion_routes_breaks_by_interval() {
        let cfg = config(); // interval 4
        let mut engine = TimerEngine::new(&cfg);

        let mut break_phases = Vec::new();
        for _ in 0..5 {
            engine.select_phase(Phase::Work, &cfg);
            engine.start();
            let completion = run_to_completion(&mut engine, &cfg);
            break_phases.push(completion.next);
        }

        assert_eq!(
            break_phases,
            [
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
                Phase::ShortBreak,
            ]
        );
        assert_eq!(engine.completed_work_sessions(), 5);
    }

    #[test]
    fn test_break_completion_returns_to_work() {
        let cfg = config();
        let mut engine = TimerEngine::new(&cfg);

        engine.select_phase(Phase::ShortBreak, &cfg);
        engine.start();
        let completion = run_to_completion(&mut engine, &cfg);

        assert_eq!(completion.finished, Phase::ShortBreak);
        assert_eq!(completion.next, Phase::Work);
        assert_eq!(engine.completed_work_sessions(), 0);
    }

    #[test]
    fn test_auto_start_breaks() {
        let mut cfg = config();
        cfg.auto_start_breaks = true;
        cfg.auto_start_pomodoros = false;

        let mut engine = TimerEngine::new(&cfg);
        engine.start();
        let completion = run_to_completion(&mut engine, &cfg);

        assert!(completion.auto_started);
        assert!(engine.is_running());
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(engine.time_left(), 5 * 60);

        // Break finishes; pomodoro auto-start is off, so we stay paused.
        let completion = run_to_completion(&mut engine, &cfg);
        assert!(!completion.auto_started);
        assert!(!engine.is_running());
        assert_eq!(engine.phase(), Phase::Work);
    }

    #[test]
    fn test_auto_start_pomodoros() {
        let mut cfg = config();
        cfg.auto_start_breaks = false;
        cfg.auto_start_pomodoros = true;

        let mut engine = TimerEngine::new(&cfg);
        engine.select_phase(Phase::LongBreak, &cfg);
        engine.start();
        let completion = run_to_completion(&mut engine, &cfg);

        assert!(completion.auto_started);
        assert!(engine.is_running());
        assert_eq!(engine.phase(), Phase::Work);
    }

    #[test]
    fn test_sound_cue_follows_config() {
        let mut cfg = config();
        cfg.sound_enabled = true;
        let mut engine = TimerEngine::new(&cfg);
        engine.start();
        assert!(run_to_completion(&mut engine, &cfg).play_sound);

        cfg.sound_enabled = false;
        engine.select_phase(Phase::Work, &cfg);
        engine.start();
        assert!(!run_to_completion(&mut engine, &cfg).play_sound);
    }

    #[test]
    fn test_manual_phase_selection_pauses_and_reseeds() {
        let cfg = config();
        let mut engine = TimerEngine::new(&cfg);

        engine.start();
        engine.tick(&cfg);
        engine.select_phase(Phase::LongBreak, &cfg);

        assert_eq!(engine.phase(), Phase::LongBreak);
        assert!(!engine.is_running());
        assert_eq!(engine.time_left(), 15 * 60);
    }

    #[test]
    fn test_non_positive_duration_completes_on_next_tick() {
        let mut cfg = config();
        cfg.work_duration = 0;

        let mut engine = TimerEngine::new(&cfg);
        assert_eq!(engine.time_left(), 0);

        engine.start();
        let completion = engine.tick(&cfg);
        assert!(completion.is_some());
        assert_eq!(engine.phase(), Phase::ShortBreak);
    }

    #[test]
    fn test_progress_clamped_and_live_denominator() {
        let mut cfg = config();
        let mut engine = TimerEngine::new(&cfg);

        assert_eq!(engine.progress(&cfg), 0.0);

        engine.start();
        for _ in 0..(5 * 60) {
            engine.tick(&cfg);
        }
        let five_of_twentyfive = engine.progress(&cfg);
        assert!((five_of_twentyfive - 0.2).abs() < 1e-9);

        // A live preference change swaps the denominator while time_left
        // stays put. More time remaining than the new total clamps to 0.
        cfg.work_duration = 4;
        assert_eq!(engine.progress(&cfg), 0.0);

        // A larger total counts the same time_left as further along.
        cfg.work_duration = 50;
        let against_fifty = engine.progress(&cfg);
        assert!((against_fifty - 0.6).abs() < 1e-9);
        assert_eq!(engine.time_left(), 20 * 60);
    }

    #[test]
    fn test_interval_of_one_always_routes_long_break() {
        let mut cfg = config();
        cfg.long_break_interval = 1;

        let mut engine = TimerEngine::new(&cfg);
        engine.start();
        let completion = run_to_completion(&mut engine, &cfg);

        assert_eq!(completion.next, Phase::LongBreak);
    }

    #[test]
    fn test_phase_helpers() {
        assert!(!Phase::Work.is_break());
        assert!(Phase::ShortBreak.is_break());
        assert!(Phase::LongBreak.is_break());
        assert_eq!(Phase::Work.label(), "Work");
        assert_eq!(Phase::ShortBreak.label(), "Short Break");
        assert_eq!(Phase::LongBreak.label(), "Long Break");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(25 * 60), "25:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(-3), "00:00");
    }
}
