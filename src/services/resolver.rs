// SPDX-License-Identifier: MIT

//! Effective timer configuration resolution.
//!
//! Layers, highest precedence first: an ephemeral custom override, a
//! selected preset's durations, the stored preference, hardcoded defaults.
//! Pure functions only; callers own the layer state.

use serde::{Deserialize, Serialize};

use crate::models::preference::defaults;
use crate::models::{CustomPreset, Preference};
use crate::services::timer::Phase;

/// The three durations a preset or an ephemeral override supplies,
/// in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationSet {
    pub work_duration: i64,
    pub short_break: i64,
    pub long_break: i64,
}

impl From<&CustomPreset> for DurationSet {
    fn from(preset: &CustomPreset) -> Self {
        Self {
            work_duration: preset.work_duration,
            short_break: preset.short_break,
            long_break: preset.long_break,
        }
    }
}

/// The fully resolved configuration driving a running timer.
/// Durations are in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub work_duration: i64,
    pub short_break: i64,
    pub long_break: i64,
    pub auto_start_breaks: bool,
    pub auto_start_pomodoros: bool,
    pub long_break_interval: i64,
    pub sound_enabled: bool,
}

impl EffectiveConfig {
    /// Hardcoded defaults: 25/5/15, auto-start breaks on, auto-start
    /// pomodoros off, long break every 4th work session, sound on.
    pub const fn defaults() -> Self {
        Self {
            work_duration: defaults::WORK_DURATION,
            short_break: defaults::SHORT_BREAK,
            long_break: defaults::LONG_BREAK,
            auto_start_breaks: defaults::AUTO_START_BREAKS,
            auto_start_pomodoros: defaults::AUTO_START_POMODOROS,
            long_break_interval: defaults::LONG_BREAK_INTERVAL,
            sound_enabled: defaults::SOUND_ENABLED,
        }
    }

    /// Duration of the given phase, in minutes.
    pub fn duration_minutes(&self, phase: Phase) -> i64 {
        match phase {
            Phase::Work => self.work_duration,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }

    fn from_preference(preference: &Preference) -> Self {
        Self {
            work_duration: preference.work_duration,
            short_break: preference.short_break,
            long_break: preference.long_break,
            auto_start_breaks: preference.auto_start_breaks,
            auto_start_pomodoros: preference.auto_start_pomodoros,
            long_break_interval: preference.long_break_interval,
            sound_enabled: preference.sound_enabled,
        }
    }
}

/// Resolve the effective configuration from the layered inputs.
///
/// The stored preference only applies for an authenticated user. A preset
/// or an ephemeral override replaces the three durations as a unit; the
/// auto-start flags, long-break interval and sound flag always come from
/// the preference layer (or the defaults). The ephemeral override
/// supersedes the preset while active.
pub fn resolve(
    stored: Option<&Preference>,
    preset: Option<&DurationSet>,
    custom: Option<&DurationSet>,
    authenticated: bool,
) -> EffectiveConfig {
    let stored = if authenticated { stored } else { None };

    let mut config = match stored {
        Some(preference) => EffectiveConfig::from_preference(preference),
        None => EffectiveConfig::defaults(),
    };

    if let Some(durations) = custom.or(preset) {
        config.work_duration = durations.work_duration;
        config.short_break = durations.short_break;
        config.long_break = durations.long_break;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Preference {
        Preference {
            id: 1,
            user_id: 1,
            work_duration: 50,
            short_break: 10,
            long_break: 25,
            auto_start_breaks: false,
            auto_start_pomodoros: true,
            long_break_interval: 3,
            sound_enabled: false,
        }
    }

    fn durations(work: i64, short: i64, long: i64) -> DurationSet {
        DurationSet {
            work_duration: work,
            short_break: short,
            long_break: long,
        }
    }

    #[test]
    fn test_defaults_when_nothing_stored() {
        let config = resolve(None, None, None, true);
        assert_eq!(config, EffectiveConfig::defaults());
        assert_eq!(config.work_duration, 25);
        assert_eq!(config.short_break, 5);
        assert_eq!(config.long_break, 15);
    }

    #[test]
    fn test_stored_preference_used_in_full() {
        let preference = stored();
        let config = resolve(Some(&preference), None, None, true);

        assert_eq!(config.work_duration, 50);
        assert_eq!(config.short_break, 10);
        assert_eq!(config.long_break, 25);
        assert!(!config.auto_start_breaks);
        assert!(config.auto_start_pomodoros);
        assert_eq!(config.long_break_interval, 3);
        assert!(!config.sound_enabled);
    }

    #[test]
    fn test_stored_preference_ignored_when_unauthenticated() {
        let preference = stored();
        let config = resolve(Some(&preference), None, None, false);
        assert_eq!(config, EffectiveConfig::defaults());
    }

    #[test]
    fn test_preset_overrides_durations_only() {
        let preference = stored();
        let preset = durations(90, 15, 30);
        let config = resolve(Some(&preference), Some(&preset), None, true);

        assert_eq!(config.work_duration, 90);
        assert_eq!(config.short_break, 15);
        assert_eq!(config.long_break, 30);
        // Flags still come from the stored preference.
        assert!(!config.auto_start_breaks);
        assert!(config.auto_start_pomodoros);
        assert_eq!(config.long_break_interval, 3);
        assert!(!config.sound_enabled);
    }

    #[test]
    fn test_custom_override_supersedes_preset() {
        let preference = stored();
        let preset = durations(90, 15, 30);
        let custom = durations(33, 3, 13);
        let config = resolve(Some(&preference), Some(&preset), Some(&custom), true);

        assert_eq!(config.work_duration, 33);
        assert_eq!(config.short_break, 3);
        assert_eq!(config.long_break, 13);
    }

    #[test]
    fn test_custom_override_works_unauthenticated() {
        let custom = durations(33, 3, 13);
        let config = resolve(None, None, Some(&custom), false);

        assert_eq!(config.work_duration, 33);
        // Flags fall through to defaults.
        assert!(config.auto_start_breaks);
        assert_eq!(config.long_break_interval, 4);
    }

    #[test]
    fn test_duration_minutes_per_phase() {
        let config = EffectiveConfig::defaults();
        assert_eq!(config.duration_minutes(Phase::Work), 25);
        assert_eq!(config.duration_minutes(Phase::ShortBreak), 5);
        assert_eq!(config.duration_minutes(Phase::LongBreak), 15);
    }
}
