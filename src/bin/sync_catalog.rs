//! Catalog sync job
//!
//! Pulls the upstream problem list and upserts every problem and tag into
//! the local catalog. Safe to re-run.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursejudge::{
    config::CONFIG,
    db::{self, PgProblemCatalog},
    judge::HttpJudgeClient,
    services::CatalogSync,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_pool = db::connect_and_migrate(&CONFIG.database).await?;

    let source = HttpJudgeClient::new(&CONFIG.judge, &CONFIG.sync)?;
    let sync = CatalogSync::new(
        Arc::new(source),
        Arc::new(PgProblemCatalog::new(db_pool)),
        &CONFIG.sync,
    );

    tracing::info!(
        category = %CONFIG.sync.category,
        page_size = CONFIG.sync.page_size,
        "Starting catalog sync"
    );
    let report = sync.run().await?;
    tracing::info!(
        total = report.total,
        upserted = report.upserted,
        failed = report.failed,
        "Catalog sync finished"
    );

    Ok(())
}
