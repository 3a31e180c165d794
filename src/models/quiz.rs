// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::{QuestionInput, validate_question_set};

/// Academic track used to scope quizzes, materials and practice sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Program {
    Diploma,
    Bachelor,
    #[serde(rename = "DHA")]
    Dha,
    #[serde(rename = "All Programs")]
    All,
}

impl Program {
    /// Whether content scoped to `self` is visible under `filter`.
    /// Content tagged `All` is visible to every program.
    pub fn visible_to(self, filter: Program) -> bool {
        self == Program::All || self == filter
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    Draft,
    Published,
}

/// Quiz metadata. The question sequence lives in the store keyed by quiz id;
/// `question_count` always equals its length.
#[derive(Debug, Clone, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub duration_minutes: u32,
    pub program: Program,
    pub status: QuizStatus,
    pub question_count: usize,
}

/// DTO for an instructor creating a quiz together with its question set.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title length must be between 1 and 200 characters."
    ))]
    pub title: String,

    #[validate(range(min = 1, message = "Duration must be at least one minute."))]
    pub duration_minutes: u32,

    pub program: Program,

    #[validate(custom(function = validate_question_set))]
    pub questions: Vec<QuestionInput>,
}

/// Query parameters for listing quizzes.
#[derive(Debug, Deserialize)]
pub struct QuizListParams {
    pub program: Option<Program>,
}
