// SPDX-License-Identifier: MIT

//! Registration, login, and current-user routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AuthUser};
use crate::models::user::{normalize_email, LoginRequest, RegisterRequest};
use crate::models::PublicUser;
use crate::security::{hash_password, verify_password};
use crate::AppState;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}

/// Response for register and login.
#[derive(Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

/// Register a new account and issue a session token.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    payload.validate()?;

    let email = normalize_email(&payload.email);

    if state.db.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::AlreadyExists);
    }

    let password_hash = hash_password(&payload.password)?;
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let user = state.db.create_user(&email, &password_hash, name).await?;
    let token = create_jwt(user.id, &state.config.jwt_signing_key)?;

    tracing::info!(user_id = user.id, email = %user.email, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: user.public(),
        }),
    ))
}

/// Log in with email and password.
///
/// Unknown email and wrong password both fail with the same
/// `InvalidCredentials` response.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let email = normalize_email(&payload.email);

    let user = state
        .db
        .find_user_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = create_jwt(user.id, &state.config.jwt_signing_key)?;

    tracing::info!(user_id = user.id, email = %user.email, "User logged in");

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: user.public(),
    }))
}

/// Current user response.
#[derive(Serialize)]
pub struct MeResponse {
    pub user: PublicUser,
}

/// Get the authenticated user's profile.
async fn me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let user = state
        .db
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(MeResponse { user: user.public() }))
}
