// SPDX-License-Identifier: MIT

//! Pomodoro Timer: countdown cycles backed by per-user preferences and
//! custom presets.
//!
//! This crate provides the REST API for accounts, preferences and presets,
//! plus the timer core (state machine, configuration resolution and tick
//! driver) in [`services`].

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;

use config::Config;
use db::Db;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
}
