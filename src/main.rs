//! CourseJudge - Application Entry Point
//!
//! This is the main entry point for the CourseJudge server.

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursejudge::{
    config::CONFIG,
    create_router,
    db::{self, PgAttemptStore, PgProblemCatalog},
    judge::HttpJudgeClient,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CourseJudge server...");

    // Database pool with migrations applied
    let db_pool = db::connect_and_migrate(&CONFIG.database).await?;

    // External judge client
    let judge = HttpJudgeClient::new(&CONFIG.judge, &CONFIG.sync)?;
    if CONFIG.judge.session.is_empty() {
        tracing::warn!("JUDGE_SESSION is not set; submissions will be rejected upstream");
    }
    tracing::info!(base_url = %CONFIG.judge.base_url, "Judge client ready");

    // Create application state
    let state = AppState::new(
        Arc::new(judge),
        Arc::new(PgProblemCatalog::new(db_pool.clone())),
        Arc::new(PgAttemptStore::new(db_pool)),
        CONFIG.clone(),
    );

    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
