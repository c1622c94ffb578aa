//! CLI subcommands.

pub mod migrate;
pub mod settings;
pub mod sign;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by commands that talk to the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),
}

/// Read the database URL from `APP_DATABASE_URL`, falling back to `DATABASE_URL`.
fn database_url() -> Result<SecretString, DatabaseError> {
    dotenvy::dotenv().ok();

    std::env::var("APP_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| DatabaseError::MissingEnvVar("APP_DATABASE_URL"))
}

/// Connect to the app database.
async fn connect() -> Result<PgPool, DatabaseError> {
    let url = database_url()?;

    tracing::info!("Connecting to app database...");
    Ok(redirect404_app::db::create_pool(&url).await?)
}
