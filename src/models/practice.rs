// src/models/practice.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::{Question, QuestionInput, validate_question_set};
use crate::models::quiz::Program;

/// Flashcard-style question set. Unlike quizzes there is no timer, no
/// submission and no grading record; explanations are shown after each
/// answer.
#[derive(Debug, Clone, Serialize)]
pub struct PracticeSet {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub program: Program,
    pub created_by: String,
    pub questions: Vec<Question>,
}

/// DTO for an instructor creating a practice set.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePracticeSetRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title length must be between 1 and 200 characters."
    ))]
    pub title: String,

    #[validate(length(min = 1, max = 100))]
    pub topic: String,

    pub program: Program,

    #[validate(custom(function = validate_question_set))]
    pub questions: Vec<QuestionInput>,
}

/// Query parameters for listing practice sets.
#[derive(Debug, Deserialize)]
pub struct PracticeListParams {
    pub program: Option<Program>,
}
