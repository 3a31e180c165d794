// src/handlers/admin.rs
//
// User administration. Content moderation lives with the content handlers
// (materials, vacancies, results) behind the same admin middleware.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::user::UpdateUserRequest,
    store::MemoryStore,
    utils::jwt::Claims,
};

/// Lists all users in the system.
/// Admin only.
pub async fn list_users(
    State(store): State<Arc<MemoryStore>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.list_users().await))
}

/// Updates a user's role or program.
/// Admin only.
pub async fn update_user(
    State(store): State<Arc<MemoryStore>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.update_user(&id, payload).await?))
}

/// Marks an instructor account as verified, unlocking content authoring.
/// Admin only.
pub async fn verify_user(
    State(store): State<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.verify_user(&id).await?))
}

/// Deletes a user by ID.
/// Admin only. Prevents deleting self.
pub async fn delete_user(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if id == claims.sub {
        return Err(AppError::Validation("Cannot delete yourself".to_string()));
    }

    store.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
