// SPDX-License-Identifier: MIT

//! Preference routes: lazy get-or-create and partial updates.

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Preference, UpdatePreferences};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/preferences", get(get_preferences).put(update_preferences))
}

#[derive(Serialize)]
pub struct PreferencesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub preferences: Preference,
}

/// Get the caller's preferences, creating them with defaults on first read.
async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<PreferencesResponse>> {
    let preferences = state.db.get_or_create_preferences(auth.user_id).await?;

    Ok(Json(PreferencesResponse {
        message: None,
        preferences,
    }))
}

/// Partially update the caller's preferences. Validation failures leave
/// the stored record untouched.
async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdatePreferences>,
) -> Result<Json<PreferencesResponse>> {
    payload.validate()?;

    let preferences = state.db.update_preferences(auth.user_id, &payload).await?;

    tracing::info!(user_id = auth.user_id, "Preferences updated");

    Ok(Json(PreferencesResponse {
        message: Some("Preferences updated successfully".to_string()),
        preferences,
    }))
}
