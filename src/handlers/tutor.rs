// src/handlers/tutor.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{ai::TutorService, error::AppError};

#[derive(Debug, Deserialize, Validate)]
pub struct AskTutorRequest {
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Question length must be between 1 and 2000 characters."
    ))]
    pub question: String,
}

/// Forwards a question to the AI tutor. The collaborator never fails: on
/// transport trouble the reply is a canned apology, so this endpoint only
/// rejects malformed input.
pub async fn ask_tutor(
    State(tutor): State<Arc<dyn TutorService>>,
    Json(payload): Json<AskTutorRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    let reply = tutor.ask(&payload.question).await;
    Ok(Json(json!({ "reply": reply })))
}
