//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! redirect404 migrate
//! ```
//!
//! # Environment Variables
//!
//! - `APP_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/app/migrations/` and are embedded into the
//! binary through [`redirect404_app::db::MIGRATOR`].

use thiserror::Error;

use super::DatabaseError;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run app database migrations.
pub async fn run() -> Result<(), MigrationError> {
    let pool = super::connect().await?;

    tracing::info!("Running app migrations...");
    redirect404_app::db::MIGRATOR.run(&pool).await?;

    tracing::info!("App migrations complete!");
    Ok(())
}
