// src/handlers/material.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        material::{StatusUpdateRequest, UploadMaterialRequest},
        quiz::Program,
        user::Role,
    },
    store::{MemoryStore, materials::NewMaterial},
    utils::jwt::Claims,
};

#[derive(Debug, Deserialize)]
pub struct MaterialListParams {
    pub program: Option<Program>,
}

/// Lists materials. Students see approved content for their program; staff
/// see everything including the review queue.
pub async fn list_materials(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<MaterialListParams>,
) -> Result<impl IntoResponse, AppError> {
    let program = if claims.role == Role::Student {
        let user = store.get_user(&claims.sub).await?;
        user.program
    } else {
        params.program
    };
    Ok(Json(store.list_materials(claims.role, program).await))
}

/// Uploads material metadata; the file itself lives with the storage
/// collaborator. New uploads enter the admin review queue.
pub async fn upload_material(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UploadMaterialRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    if !claims.role.is_staff() {
        return Err(AppError::Forbidden(
            "Only instructors can upload materials".to_string(),
        ));
    }
    let uploader = store.get_user(&claims.sub).await?;
    if !uploader.is_verified && uploader.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Your account must be verified before uploading materials".to_string(),
        ));
    }

    let material = store
        .upload_material(NewMaterial {
            title: payload.title,
            kind: payload.kind,
            program: payload.program,
            url: payload.url,
            uploaded_by: claims.sub,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(material)))
}

/// Admin review action on a material.
pub async fn set_material_status(
    State(store): State<Arc<MemoryStore>>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.set_material_status(&id, payload.status).await?))
}

/// A student asks to download a material; an admin approves it later.
pub async fn request_download(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let request = store
        .request_download(&id, &claims.sub, &claims.name)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn list_download_requests(
    State(store): State<Arc<MemoryStore>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.list_download_requests().await))
}

pub async fn set_download_status(
    State(store): State<Arc<MemoryStore>>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.set_download_status(&id, payload.status).await?))
}
