// src/handlers/catalog.rs
//
// Vacancies, advertisements and the drug index.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        ad::CreateAdRequest,
        drug::{CreateDrugRequest, DrugSearchParams},
        material::StatusUpdateRequest,
        vacancy::CreateVacancyRequest,
    },
    store::MemoryStore,
    utils::jwt::Claims,
};

// --- Vacancies ---

/// Lists vacancies: approved ones for everyone, the full queue for admins.
pub async fn list_vacancies(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.list_vacancies(claims.role).await))
}

/// The caller's own postings, whatever their review state.
pub async fn my_vacancies(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.vacancies_for(&claims.sub).await))
}

pub async fn create_vacancy(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateVacancyRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    if !claims.role.is_staff() {
        return Err(AppError::Forbidden(
            "Only instructors and admins can post vacancies".to_string(),
        ));
    }

    let vacancy = store
        .create_vacancy(payload, &claims.sub, &claims.name, claims.role)
        .await?;
    Ok((StatusCode::CREATED, Json(vacancy)))
}

pub async fn set_vacancy_status(
    State(store): State<Arc<MemoryStore>>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.set_vacancy_status(&id, payload.status).await?))
}

// --- Advertisements ---

/// Ads whose date window covers today. Public.
pub async fn active_ads(
    State(store): State<Arc<MemoryStore>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.active_ads().await))
}

pub async fn list_ads(
    State(store): State<Arc<MemoryStore>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.list_ads().await))
}

pub async fn create_ad(
    State(store): State<Arc<MemoryStore>>,
    Json(payload): Json<CreateAdRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }
    let ad = store.create_ad(payload).await?;
    Ok((StatusCode::CREATED, Json(ad)))
}

pub async fn delete_ad(
    State(store): State<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store.delete_ad(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Drug index ---

/// Case-insensitive search over brand name, generic name and category.
/// Public: the drug index doubles as a reference tool.
pub async fn search_drugs(
    State(store): State<Arc<MemoryStore>>,
    Query(params): Query<DrugSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.search_drugs(params.q.as_deref()).await))
}

pub async fn create_drug(
    State(store): State<Arc<MemoryStore>>,
    Json(payload): Json<CreateDrugRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }
    let drug = store.create_drug(payload).await?;
    Ok((StatusCode::CREATED, Json(drug)))
}

pub async fn delete_drug(
    State(store): State<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store.delete_drug(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
