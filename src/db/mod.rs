//! Database module
//!
//! This module handles database connections, migrations, and the store
//! implementations behind the catalog and attempt traits.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

use sqlx::PgPool;

pub use connection::*;
pub use memory::{MemoryAttemptStore, MemoryCatalog};
pub use repositories::{PgAttemptStore, PgProblemCatalog};
pub use store::{AttemptStore, ProblemCatalog};

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
