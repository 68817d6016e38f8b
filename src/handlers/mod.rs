//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod health;
pub mod judge;
pub mod problems;

use axum::{middleware, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .merge(health::routes())
        .nest("/judge", judge::routes().route_layer(auth.clone()))
        .nest("/problems", problems::routes().route_layer(auth))
}
