// SPDX-License-Identifier: MIT

//! Database layer (SQLite via sqlx).

pub mod store;

pub use store::Db;

/// Embedded migrations, applied at startup (and by tests against
/// in-memory databases).
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
