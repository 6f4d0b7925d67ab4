//! CLI subcommands.

pub mod migrate;
pub mod seed;

use boutique_storefront::db::{self, RepositoryError};
use secrecy::SecretString;
use sqlx::PgPool;

/// Errors a subcommand can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] RepositoryError),
}

/// Connect to the storefront database named by the environment.
async fn connect() -> Result<PgPool, CommandError> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    tracing::info!("Connecting to storefront database...");
    Ok(db::create_pool(&database_url).await?)
}
