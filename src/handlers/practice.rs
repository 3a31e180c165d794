// src/handlers/practice.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        practice::{CreatePracticeSetRequest, PracticeListParams},
        user::Role,
    },
    store::{MemoryStore, catalog::NewPracticeSet},
    utils::jwt::Claims,
};

/// Lists practice sets, scoped to the student's program. Practice questions
/// keep their answer keys and explanations: the whole point of practice mode
/// is immediate feedback.
pub async fn list_practice_sets(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<PracticeListParams>,
) -> Result<impl IntoResponse, AppError> {
    let program = if claims.role == Role::Student {
        let user = store.get_user(&claims.sub).await?;
        user.program
    } else {
        params.program
    };
    Ok(Json(store.list_practice_sets(program).await))
}

pub async fn create_practice_set(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreatePracticeSetRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    if !claims.role.is_staff() {
        return Err(AppError::Forbidden(
            "Only instructors can create practice sets".to_string(),
        ));
    }
    let author = store.get_user(&claims.sub).await?;
    if !author.is_verified && author.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Your account must be verified before publishing practice sets".to_string(),
        ));
    }

    let set = store
        .create_practice_set(
            NewPracticeSet {
                title: payload.title,
                topic: payload.topic,
                program: payload.program,
                created_by: claims.sub,
            },
            payload.questions,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(set)))
}
