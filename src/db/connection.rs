//! Database connection management

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await
}

/// Connect and bring the schema up to date; shared by the server and the sync job
pub async fn connect_and_migrate(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = create_pool(config).await?;

    tracing::info!("Running database migrations...");
    super::run_migrations(&pool).await?;

    Ok(pool)
}
