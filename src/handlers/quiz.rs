// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        question::PublicQuestion,
        quiz::{CreateQuizRequest, QuizListParams},
        user::Role,
    },
    store::{MemoryStore, quizzes::NewQuiz},
    utils::jwt::Claims,
};

/// Lists quizzes. Students are scoped to their own program (plus content
/// tagged for all programs); staff may filter explicitly or see everything.
pub async fn list_quizzes(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<QuizListParams>,
) -> Result<impl IntoResponse, AppError> {
    let program = if claims.role == Role::Student {
        let user = store.get_user(&claims.sub).await?;
        user.program
    } else {
        params.program
    };

    let quizzes = store.list_quizzes(program).await;
    Ok(Json(quizzes))
}

/// Creates a quiz together with its ordered question set.
///
/// Requires a verified instructor (or an admin). Validation failures reject
/// the whole request; on success the quiz and its questions become visible
/// to readers atomically.
pub async fn create_quiz(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    // Rule: must be a verified instructor or an admin to publish.
    if !claims.role.is_staff() {
        return Err(AppError::Forbidden(
            "Only instructors can create quizzes".to_string(),
        ));
    }
    let author = store.get_user(&claims.sub).await?;
    if !author.is_verified && author.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Your account must be verified before publishing quizzes".to_string(),
        ));
    }

    let quiz = store
        .create_quiz(
            NewQuiz {
                title: payload.title,
                duration_minutes: payload.duration_minutes,
                program: payload.program,
            },
            payload.questions,
        )
        .await?;

    tracing::info!(quiz_id = %quiz.id, author = %claims.sub, "quiz created");
    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Returns a quiz's question sequence. Staff get the full records; students
/// get the public projection without answer keys.
pub async fn get_quiz_questions(
    State(store): State<Arc<MemoryStore>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let questions = store.get_quiz_questions(&id).await?;

    if claims.role.is_staff() {
        Ok(Json(questions).into_response())
    } else {
        let public: Vec<PublicQuestion> = questions.iter().map(PublicQuestion::from).collect();
        Ok(Json(public).into_response())
    }
}

/// Ranked, score-grouped view of one quiz's published results.
pub async fn leaderboard(
    State(store): State<Arc<MemoryStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let groups = store.leaderboard(&id).await?;
    Ok(Json(groups))
}
