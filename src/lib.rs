//! CourseJudge - judge orchestration for course-based algorithm practice
//!
//! This library drives student code through an external LeetCode-compatible
//! judge, keeps the per-student attempt state machine, and recommends the
//! next problem after a solve.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Orchestration, recommendation, polling, catalog sync
//! - **Judge**: External judge client behind the `JudgeClient` trait
//! - **Db**: Store traits with Postgres and in-memory implementations
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use axum::Router;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the full application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(constants::API_BASE_PATH, handlers::routes(state.clone()))
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
