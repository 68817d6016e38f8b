//! Judge handlers: sample runs, submissions and status checks

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Judge routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/run", post(handler::run_test_case))
        .route("/submit", post(handler::submit))
        .route("/check/{id}", get(handler::check))
        .route("/check/{id}/wait", get(handler::check_and_wait))
}
