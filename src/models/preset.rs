//! Named custom presets: a user-owned bundle of the three durations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum number of live presets per user.
pub const MAX_PRESETS_PER_USER: i64 = 3;

/// Custom preset row. Durations are in minutes; presets allow wider
/// ranges than preferences.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomPreset {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub work_duration: i64,
    pub short_break: i64,
    pub long_break: i64,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a preset.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePreset {
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 120, message = "must be between 1 and 120"))]
    pub work_duration: i64,
    #[validate(range(min = 1, max = 60, message = "must be between 1 and 60"))]
    pub short_break: i64,
    #[validate(range(min = 1, max = 120, message = "must be between 1 and 120"))]
    pub long_break: i64,
}

/// Partial-update request: unsupplied fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreset {
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 120, message = "must be between 1 and 120"))]
    pub work_duration: Option<i64>,
    #[validate(range(min = 1, max = 60, message = "must be between 1 and 60"))]
    pub short_break: Option<i64>,
    #[validate(range(min = 1, max = 120, message = "must be between 1 and 120"))]
    pub long_break: Option<i64>,
}

impl UpdatePreset {
    /// Apply supplied fields onto an existing record.
    pub fn apply(&self, preset: &mut CustomPreset) {
        if let Some(name) = &self.name {
            preset.name = name.clone();
        }
        if let Some(v) = self.work_duration {
            preset.work_duration = v;
        }
        if let Some(v) = self.short_break {
            preset.short_break = v;
        }
        if let Some(v) = self.long_break {
            preset.long_break = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_preset_validation() {
        let ok = CreatePreset {
            name: "Focus".to_string(),
            work_duration: 45,
            short_break: 10,
            long_break: 20,
        };
        assert!(ok.validate().is_ok());

        let empty_name = CreatePreset {
            name: String::new(),
            ..ok.clone()
        };
        assert!(empty_name.validate().is_err());

        let long_name = CreatePreset {
            name: "x".repeat(51),
            ..ok.clone()
        };
        assert!(long_name.validate().is_err());

        let work_too_long = CreatePreset {
            work_duration: 121,
            ..ok
        };
        assert!(work_too_long.validate().is_err());
    }

    #[test]
    fn test_preset_ranges_are_wider_than_preferences() {
        let deep_work = CreatePreset {
            name: "Deep Work".to_string(),
            work_duration: 120,
            short_break: 60,
            long_break: 120,
        };
        assert!(deep_work.validate().is_ok());
    }

    #[test]
    fn test_partial_update_apply() {
        let mut preset = CustomPreset {
            id: 1,
            user_id: 1,
            name: "Focus".to_string(),
            work_duration: 45,
            short_break: 10,
            long_break: 20,
            created_at: Utc::now(),
        };

        let update = UpdatePreset {
            short_break: Some(12),
            ..Default::default()
        };
        update.apply(&mut preset);

        assert_eq!(preset.name, "Focus");
        assert_eq!(preset.work_duration, 45);
        assert_eq!(preset.short_break, 12);
    }
}
