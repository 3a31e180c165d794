// src/handlers/auth.rs

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, Role},
    store::{MemoryStore, users::NewUser},
    utils::{
        hash::{hash_password, verify_password},
        jwt::{Claims, sign_jwt},
    },
};

/// Registers a new account.
///
/// Students and instructors may self-register; admin accounts are only
/// seeded from configuration. Instructors start unverified and must be
/// approved by an admin before they can publish content.
pub async fn register(
    State(store): State<Arc<MemoryStore>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    if payload.role == Role::Admin {
        return Err(AppError::Validation(
            "Administrator accounts cannot be self-registered".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let is_verified = payload.role != Role::Instructor;

    let user = store
        .create_user(NewUser {
            name: payload.name,
            email: payload.email,
            password_hash,
            role: payload.role,
            program: payload.program,
            is_verified,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a user and returns a JWT token.
pub async fn login(
    State(store): State<Arc<MemoryStore>>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = store
        .find_user_by_email(&payload.email)
        .await
        .ok_or_else(|| AppError::Auth("Invalid credentials".to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password_hash)?;
    if !is_valid {
        return Err(AppError::Auth("Invalid credentials".to_string()));
    }

    let token = sign_jwt(&user, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "user": user,
    })))
}

/// Returns the authenticated user's profile.
pub async fn me(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = store.get_user(&claims.sub).await?;
    Ok(Json(user))
}
