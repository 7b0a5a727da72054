// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod preference;
pub mod preset;
pub mod user;

pub use preference::{Preference, UpdatePreferences};
pub use preset::{CreatePreset, CustomPreset, UpdatePreset};
pub use user::{PublicUser, User};
