// src/handlers/results.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, store::MemoryStore, utils::jwt::Claims};

/// The caller's own result history, newest first. Pending results are
/// included so students can see a submission is awaiting review.
pub async fn my_results(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.results_for_student(&claims.sub).await))
}

/// Every result in the system, for the staff review table.
pub async fn all_results(
    State(store): State<Arc<MemoryStore>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.all_results().await))
}

/// Publishes a graded result, making it visible on the leaderboard.
/// Idempotent: publishing twice leaves the result unchanged.
pub async fn publish_result(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = store.publish_result(&id).await?;
    tracing::info!(result_id = %id, admin = %claims.sub, "result published");
    Ok(Json(result))
}
