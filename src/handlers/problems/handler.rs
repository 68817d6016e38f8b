//! Problem handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    constants::MAX_ATTEMPT_HISTORY,
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::{Problem, ProblemSummary},
    state::AppState,
};

use super::{
    request::AttemptHistoryQuery,
    response::{AttemptHistoryResponse, ProblemDetailResponse},
};

async fn load_problem(state: &AppState, external_id: i64) -> AppResult<Problem> {
    state
        .catalog()
        .find_by_external_id(external_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Problem {} not found", external_id)))
}

/// Get a problem by external id
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProblemDetailResponse>> {
    let problem = load_problem(&state, id).await?;
    let tags = state.catalog().tags_for_problem(problem.id).await?;
    let knowledge_points = state.catalog().knowledge_points_for_problem(problem.id).await?;

    Ok(Json(ProblemDetailResponse {
        problem,
        tags,
        knowledge_points,
    }))
}

/// List the caller's attempts on a problem
pub async fn list_attempts(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i64>,
    Query(query): Query<AttemptHistoryQuery>,
) -> AppResult<Json<AttemptHistoryResponse>> {
    let problem = load_problem(&state, id).await?;
    let limit = query
        .limit
        .unwrap_or(MAX_ATTEMPT_HISTORY)
        .clamp(1, MAX_ATTEMPT_HISTORY);

    let attempts = state
        .attempts()
        .list_for_problem(auth_user.id, problem.id, limit)
        .await?;

    Ok(Json(AttemptHistoryResponse {
        problem_id: problem.id,
        attempts,
    }))
}

/// Recommend a follow-up problem for the caller
pub async fn get_recommendation(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ProblemSummary>> {
    let problem = load_problem(&state, id).await?;

    let recommended = state
        .orchestrator()
        .recommender()
        .recommend(problem.id, auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("No recommendation available".to_string()))?;

    Ok(Json(recommended.summary()))
}
