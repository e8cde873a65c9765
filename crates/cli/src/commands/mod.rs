//! CLI subcommands.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use glamdiva_web::db::{self, RepositoryError};
use glamdiva_web::services::auth::AuthError;

/// Errors a command can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A store operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Hashing or validating the seeded credentials failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

/// Connect using `GLAMDIVA_DATABASE_URL`, or `DATABASE_URL` if unset.
pub async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("GLAMDIVA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("GLAMDIVA_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}
