//! Per-user timer preferences.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Hardcoded defaults used when a user has no stored preferences yet
/// (and by the resolver when unauthenticated).
pub mod defaults {
    pub const WORK_DURATION: i64 = 25;
    pub const SHORT_BREAK: i64 = 5;
    pub const LONG_BREAK: i64 = 15;
    pub const AUTO_START_BREAKS: bool = true;
    pub const AUTO_START_POMODOROS: bool = false;
    pub const LONG_BREAK_INTERVAL: i64 = 4;
    pub const SOUND_ENABLED: bool = true;
}

/// Preference row, one per user. Durations are in minutes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    pub id: i64,
    pub user_id: i64,
    pub work_duration: i64,
    pub short_break: i64,
    pub long_break: i64,
    pub auto_start_breaks: bool,
    pub auto_start_pomodoros: bool,
    pub long_break_interval: i64,
    pub sound_enabled: bool,
}

impl Preference {
    /// Default preference values for a user, without an id (not yet stored).
    pub fn defaults_for(user_id: i64) -> Self {
        Self {
            id: 0,
            user_id,
            work_duration: defaults::WORK_DURATION,
            short_break: defaults::SHORT_BREAK,
            long_break: defaults::LONG_BREAK,
            auto_start_breaks: defaults::AUTO_START_BREAKS,
            auto_start_pomodoros: defaults::AUTO_START_POMODOROS,
            long_break_interval: defaults::LONG_BREAK_INTERVAL,
            sound_enabled: defaults::SOUND_ENABLED,
        }
    }
}

/// Partial-update request: unsupplied fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferences {
    #[validate(range(min = 1, max = 60, message = "must be between 1 and 60"))]
    pub work_duration: Option<i64>,
    #[validate(range(min = 1, max = 30, message = "must be between 1 and 30"))]
    pub short_break: Option<i64>,
    #[validate(range(min = 1, max = 60, message = "must be between 1 and 60"))]
    pub long_break: Option<i64>,
    pub auto_start_breaks: Option<bool>,
    pub auto_start_pomodoros: Option<bool>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub long_break_interval: Option<i64>,
    pub sound_enabled: Option<bool>,
}

impl UpdatePreferences {
    /// Apply supplied fields onto an existing record.
    pub fn apply(&self, preference: &mut Preference) {
        if let Some(v) = self.work_duration {
            preference.work_duration = v;
        }
        if let Some(v) = self.short_break {
            preference.short_break = v;
        }
        if let Some(v) = self.long_break {
            preference.long_break = v;
        }
        if let Some(v) = self.auto_start_breaks {
            preference.auto_start_breaks = v;
        }
        if let Some(v) = self.auto_start_pomodoros {
            preference.auto_start_pomodoros = v;
        }
        if let Some(v) = self.long_break_interval {
            preference.long_break_interval = v;
        }
        if let Some(v) = self.sound_enabled {
            preference.sound_enabled = v;
        }
    }
}
