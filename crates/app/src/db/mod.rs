//! Database operations for the app's `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `redirect_settings` - Per-shop 404 redirect configuration
//!
//! # Migrations
//!
//! Migrations are stored in `crates/app/migrations/`, embedded into [`MIGRATOR`],
//! and run via:
//! ```bash
//! cargo run -p redirect404-cli -- migrate
//! ```

pub mod redirect_settings;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use redirect_settings::RedirectSettingRepository;

/// Embedded migrations for the app database.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
