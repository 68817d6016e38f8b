//! Problem handlers
//!
//! All routes are keyed by the problem's external (judge-side) id, the same
//! id the judge routes take as `question_id`.

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Problem routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(handler::get_problem))
        .route("/{id}/attempts", get(handler::list_attempts))
        .route("/{id}/recommendation", get(handler::get_recommendation))
}
