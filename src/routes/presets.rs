// SPDX-License-Identifier: MIT

//! Custom preset routes: list, create, update, delete.
//!
//! Quota and name-uniqueness failures surface before anything is written;
//! ownership violations are indistinguishable from missing presets.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{CreatePreset, CustomPreset, UpdatePreset};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/presets", get(list_presets).post(create_preset))
        .route(
            "/presets/{id}",
            axum::routing::put(update_preset).delete(delete_preset),
        )
}

#[derive(Serialize)]
pub struct PresetListResponse {
    pub presets: Vec<CustomPreset>,
}

#[derive(Serialize)]
pub struct PresetResponse {
    pub message: String,
    pub preset: CustomPreset,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List the caller's presets, oldest first.
async fn list_presets(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<PresetListResponse>> {
    let presets = state.db.list_presets(auth.user_id).await?;

    Ok(Json(PresetListResponse { presets }))
}

/// Create a preset, subject to the 3-per-user quota and per-user name
/// uniqueness.
async fn create_preset(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreatePreset>,
) -> Result<(StatusCode, Json<PresetResponse>)> {
    payload.validate()?;

    let preset = state.db.create_preset(auth.user_id, &payload).await?;

    tracing::info!(user_id = auth.user_id, preset_id = preset.id, name = %preset.name, "Preset created");

    Ok((
        StatusCode::CREATED,
        Json(PresetResponse {
            message: "Preset created successfully".to_string(),
            preset,
        }),
    ))
}

/// Partially update a preset the caller owns.
async fn update_preset(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePreset>,
) -> Result<Json<PresetResponse>> {
    payload.validate()?;

    let preset = state.db.update_preset(auth.user_id, id, &payload).await?;

    tracing::info!(user_id = auth.user_id, preset_id = preset.id, "Preset updated");

    Ok(Json(PresetResponse {
        message: "Preset updated successfully".to_string(),
        preset,
    }))
}

/// Delete a preset the caller owns.
async fn delete_preset(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    state.db.delete_preset(auth.user_id, id).await?;

    tracing::info!(user_id = auth.user_id, preset_id = id, "Preset deleted");

    Ok(Json(MessageResponse {
        message: "Preset deleted successfully".to_string(),
    }))
}
