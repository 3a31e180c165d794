// src/handlers/attempt.rs
//
// HTTP surface over the attempt engine. All routes operate on the caller's
// single active session; the heavy lifting (guarded transitions, countdown,
// single-submission guarantee) lives in `attempt::registry`.

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use crate::{attempt::registry::SessionRegistry, error::AppError, utils::jwt::Claims};

#[derive(Debug, Deserialize)]
pub struct StartAttemptRequest {
    pub quiz_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Option index for the current question (0-3).
    pub option: usize,
}

/// Starts a timed attempt on a quiz. Any session the student already had is
/// abandoned; a quiz with no questions is refused before a session exists.
pub async fn start(
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<StartAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let view = sessions
        .start(&claims.sub, &claims.name, &payload.quiz_id)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Current state of the caller's active attempt.
pub async fn current(
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.view(&claims.sub).await?))
}

/// Records (or overwrites) the answer for the current question.
pub async fn answer(
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.select_option(&claims.sub, payload.option).await?))
}

pub async fn next(
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.next(&claims.sub).await?))
}

pub async fn previous(
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.previous(&claims.sub).await?))
}

/// Moves to the confirmation step. The response's `unanswered` count is
/// advisory; submission is never blocked by open questions.
pub async fn request_submit(
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.request_submit(&claims.sub).await?))
}

pub async fn cancel_submit(
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.cancel_submit(&claims.sub).await?))
}

/// Confirms submission and returns the graded (pending) result.
pub async fn confirm(
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let result = sessions.confirm(&claims.sub, &claims.name).await?;
    Ok(Json(result))
}

/// Abandons the active attempt: the session is discarded, no record is
/// created.
pub async fn abandon(
    State(sessions): State<Arc<SessionRegistry>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    sessions.abandon(&claims.sub).await?;
    Ok(StatusCode::NO_CONTENT)
}
