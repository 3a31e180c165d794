// src/handlers/community.rs
//
// The doubt forum: students ask, staff answer, the first reply resolves.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::doubt::{CreateDoubtRequest, ReplyDoubtRequest},
    store::MemoryStore,
    utils::{html::sanitize_text, jwt::Claims},
};

pub async fn list_doubts(
    State(store): State<Arc<MemoryStore>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.list_doubts().await))
}

/// Posts a doubt. Free text is sanitized before it is stored so every
/// consumer renders it safely.
pub async fn create_doubt(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateDoubtRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    let doubt = store
        .create_doubt(
            &claims.sub,
            &claims.name,
            sanitize_text(&payload.subject),
            sanitize_text(&payload.question),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(doubt)))
}

/// Replies to a doubt and marks it resolved.
pub async fn reply_doubt(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<ReplyDoubtRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    let doubt = store
        .reply_doubt(
            &id,
            &claims.sub,
            &claims.name,
            claims.role,
            sanitize_text(&payload.text),
        )
        .await?;
    Ok(Json(doubt))
}
