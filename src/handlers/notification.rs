// src/handlers/notification.rs
//
// Pull-based notification feed: clients poll their list and mark entries
// read. Appends happen inside the store on publish/approve/reply events.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{error::AppError, store::MemoryStore, utils::jwt::Claims};

pub async fn list_notifications(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.notifications_for(&claims.sub).await))
}

pub async fn mark_read(
    State(store): State<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store.mark_notification_read(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
