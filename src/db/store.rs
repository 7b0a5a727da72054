// SPDX-License-Identifier: MIT

//! SQLite record store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (identity records)
//! - Preferences (one row per user, lazy get-or-create)
//! - Custom presets (up to three named rows per user)
//!
//! The handle is injected into `AppState` at construction so tests can
//! substitute an in-memory database through the same code path. Quota and
//! name-uniqueness checks run inside a single write transaction together
//! with the mutation they guard.

use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::preset::MAX_PRESETS_PER_USER;
use crate::models::{CreatePreset, CustomPreset, Preference, UpdatePreferences, UpdatePreset, User};

/// Shared database handle.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Connect to the database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        tracing::info!(url = database_url, "Connected to database");

        Ok(Self { pool })
    }

    /// Open a fresh in-memory database with migrations applied.
    ///
    /// A single connection keeps every operation on the same `:memory:`
    /// instance.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        super::MIGRATOR.run(&pool).await?;

        Ok(Self { pool })
    }

    /// The underlying pool, for running migrations at startup.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Insert a new user. The email must already be normalized.
    ///
    /// Returns `AlreadyExists` if the email is taken (the UNIQUE constraint
    /// is the backstop behind the handler's explicit lookup).
    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
    ) -> Result<User, AppError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, name, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::AlreadyExists
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            name: name.map(str::to_string),
            created_at,
        })
    }

    /// Look up a user by normalized email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Look up a user by primary key.
    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    // ─── Preference Operations ───────────────────────────────────

    /// Fetch the user's preferences, creating the row with defaults on
    /// first access. Idempotent.
    pub async fn get_or_create_preferences(&self, user_id: i64) -> Result<Preference, AppError> {
        let mut tx = self.pool.begin().await?;

        if let Some(existing) =
            sqlx::query_as::<_, Preference>("SELECT * FROM preferences WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?
        {
            return Ok(existing);
        }

        let mut preference = Preference::defaults_for(user_id);
        preference.id = insert_preference(&mut tx, &preference).await?;
        tx.commit().await?;

        Ok(preference)
    }

    /// Apply a partial update to the user's preferences.
    ///
    /// Creates the row first (defaults filling unsupplied fields) if the
    /// user has none yet. All-or-nothing: the row is written once, after
    /// every supplied field has been applied.
    pub async fn update_preferences(
        &self,
        user_id: i64,
        update: &UpdatePreferences,
    ) -> Result<Preference, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing =
            sqlx::query_as::<_, Preference>("SELECT * FROM preferences WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;

        let mut preference = existing.unwrap_or_else(|| Preference::defaults_for(user_id));
        update.apply(&mut preference);

        if preference.id == 0 {
            preference.id = insert_preference(&mut tx, &preference).await?;
        } else {
            sqlx::query(
                "UPDATE preferences SET work_duration = ?, short_break = ?, long_break = ?, \
                 auto_start_breaks = ?, auto_start_pomodoros = ?, long_break_interval = ?, \
                 sound_enabled = ? WHERE user_id = ?",
            )
            .bind(preference.work_duration)
            .bind(preference.short_break)
            .bind(preference.long_break)
            .bind(preference.auto_start_breaks)
            .bind(preference.auto_start_pomodoros)
            .bind(preference.long_break_interval)
            .bind(preference.sound_enabled)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(preference)
    }

    // ─── Preset Operations ───────────────────────────────────────

    /// List the user's presets, ascending by creation order.
    pub async fn list_presets(&self, user_id: i64) -> Result<Vec<CustomPreset>, AppError> {
        let presets = sqlx::query_as::<_, CustomPreset>(
            "SELECT * FROM custom_presets WHERE user_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(presets)
    }

    /// Insert a new preset for the user.
    ///
    /// The quota and name-uniqueness checks share a write transaction with
    /// the insert, so two concurrent creates cannot both pass the count.
    pub async fn create_preset(
        &self,
        user_id: i64,
        create: &CreatePreset,
    ) -> Result<CustomPreset, AppError> {
        let mut tx = self.pool.begin().await?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM custom_presets WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;
        if count >= MAX_PRESETS_PER_USER {
            return Err(AppError::QuotaExceeded);
        }

        let duplicate: Option<i64> =
            sqlx::query_scalar("SELECT id FROM custom_presets WHERE user_id = ? AND name = ?")
                .bind(user_id)
                .bind(&create.name)
                .fetch_optional(&mut *tx)
                .await?;
        if duplicate.is_some() {
            return Err(AppError::DuplicateName);
        }

        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO custom_presets (user_id, name, work_duration, short_break, long_break, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&create.name)
        .bind(create.work_duration)
        .bind(create.short_break)
        .bind(create.long_break)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateName
            } else {
                AppError::Database(e)
            }
        })?;

        tx.commit().await?;

        Ok(CustomPreset {
            id: result.last_insert_rowid(),
            user_id,
            name: create.name.clone(),
            work_duration: create.work_duration,
            short_break: create.short_break,
            long_break: create.long_break,
            created_at,
        })
    }

    /// Apply a partial update to a preset the user owns.
    ///
    /// A preset that does not exist and a preset owned by someone else are
    /// both `NotFound`, so callers cannot tell them apart.
    pub async fn update_preset(
        &self,
        user_id: i64,
        preset_id: i64,
        update: &UpdatePreset,
    ) -> Result<CustomPreset, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut preset = sqlx::query_as::<_, CustomPreset>(
            "SELECT * FROM custom_presets WHERE id = ? AND user_id = ?",
        )
        .bind(preset_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Preset not found".to_string()))?;

        if let Some(name) = &update.name {
            if *name != preset.name {
                let duplicate: Option<i64> = sqlx::query_scalar(
                    "SELECT id FROM custom_presets WHERE user_id = ? AND name = ? AND id != ?",
                )
                .bind(user_id)
                .bind(name)
                .bind(preset_id)
                .fetch_optional(&mut *tx)
                .await?;
                if duplicate.is_some() {
                    return Err(AppError::DuplicateName);
                }
            }
        }

        update.apply(&mut preset);

        sqlx::query(
            "UPDATE custom_presets SET name = ?, work_duration = ?, short_break = ?, long_break = ? \
             WHERE id = ? AND user_id = ?",
        )
        .bind(&preset.name)
        .bind(preset.work_duration)
        .bind(preset.short_break)
        .bind(preset.long_break)
        .bind(preset_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateName
            } else {
                AppError::Database(e)
            }
        })?;

        tx.commit().await?;
        Ok(preset)
    }

    /// Remove a preset the user owns. Hard delete, same ownership-blind
    /// `NotFound` rule as update.
    pub async fn delete_preset(&self, user_id: i64, preset_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM custom_presets WHERE id = ? AND user_id = ?")
            .bind(preset_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Preset not found".to_string()));
        }

        Ok(())
    }
}

/// Insert a preference row, returning the new id.
async fn insert_preference(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    preference: &Preference,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO preferences (user_id, work_duration, short_break, long_break, \
         auto_start_breaks, auto_start_pomodoros, long_break_interval, sound_enabled) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(preference.user_id)
    .bind(preference.work_duration)
    .bind(preference.short_break)
    .bind(preference.long_break)
    .bind(preference.auto_start_breaks)
    .bind(preference.auto_start_pomodoros)
    .bind(preference.long_break_interval)
    .bind(preference.sound_enabled)
    .execute(&mut **tx)
    .await?;

    Ok(result.last_insert_rowid())
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db| matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation))
}
