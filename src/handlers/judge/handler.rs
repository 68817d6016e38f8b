//! Judge handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    judge::RunTicket,
    middleware::auth::AuthenticatedUser,
    services::{poll_until_settled, CheckOutcome, SubmitOutcome},
    state::AppState,
    utils::{validate_language, validate_run_id, validate_source_code},
};

use super::{
    request::{CheckQuery, RunRequest, SubmitRequest},
    response::WaitResponse,
};

fn check_code(lang: &str, code: &str) -> AppResult<()> {
    validate_language(lang)
        .and_then(|_| validate_source_code(code))
        .map_err(|e| AppError::Validation(e.to_string()))
}

/// Run code against the problem's sample input
pub async fn run_test_case(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<RunRequest>,
) -> AppResult<Json<RunTicket>> {
    payload.validate()?;
    check_code(&payload.lang, &payload.typed_code)?;

    let ticket = state
        .orchestrator()
        .run_test_case(
            auth_user.id,
            payload.question_id,
            &payload.typed_code,
            &payload.lang,
        )
        .await?;

    Ok(Json(ticket))
}

/// Submit code for full judging
pub async fn submit(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<SubmitRequest>,
) -> AppResult<(StatusCode, Json<SubmitOutcome>)> {
    payload.validate()?;
    check_code(&payload.lang, &payload.typed_code)?;

    let outcome = state
        .orchestrator()
        .submit(
            auth_user.id,
            &payload.lang,
            payload.knowledge_point_id,
            payload.question_id,
            &payload.typed_code,
        )
        .await?;

    Ok((StatusCode::ACCEPTED, Json(outcome)))
}

/// Poll a run or submission once
pub async fn check(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
    Query(query): Query<CheckQuery>,
) -> AppResult<Json<CheckOutcome>> {
    validate_run_id(&id).map_err(|e| AppError::Validation(e.to_string()))?;

    let outcome = state
        .orchestrator()
        .check(auth_user.id, &id, query.test)
        .await?;

    Ok(Json(outcome))
}

/// Poll on the server until the run settles or the poll budget is spent
pub async fn check_and_wait(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
    Query(query): Query<CheckQuery>,
) -> AppResult<Json<WaitResponse>> {
    validate_run_id(&id).map_err(|e| AppError::Validation(e.to_string()))?;

    let poll = poll_until_settled(
        state.orchestrator(),
        auth_user.id,
        &id,
        query.test,
        state.poll_policy(),
    )
    .await?;

    Ok(Json(poll.into()))
}
