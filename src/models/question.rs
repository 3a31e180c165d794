// src/models/question.rs

use serde::{Deserialize, Serialize};

/// Number of options every multiple-choice question carries.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question. Owned exclusively by one quiz (or one practice
/// set); ids are scoped per owner as `"{owner_id}_q{index}"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    pub text: String,

    /// Exactly four option strings, in display order.
    pub options: Vec<String>,

    /// Index into `options` (0-3).
    pub correct_answer: usize,

    /// Shown after answering in practice mode.
    pub explanation: Option<String>,
}

/// DTO for sending a question to a student mid-attempt (excludes the correct
/// answer and the explanation).
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            text: q.text.clone(),
            options: q.options.clone(),
        }
    }
}

/// DTO for authoring a question (the owner assigns the id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionInput {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: Option<String>,
}

impl QuestionInput {
    /// Materializes the question with an id scoped to its owner.
    pub fn into_question(self, owner_id: &str, index: usize) -> Question {
        Question {
            id: format!("{}_q{}", owner_id, index),
            text: self.text,
            options: self.options,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
        }
    }
}

/// Validates an authored question set: non-empty, every question has text,
/// exactly four non-empty options, and an in-range correct index.
pub fn validate_question_set(
    questions: &[QuestionInput],
) -> Result<(), validator::ValidationError> {
    if questions.is_empty() {
        return Err(validator::ValidationError::new("questions_cannot_be_empty"));
    }
    for q in questions {
        if q.text.trim().is_empty() {
            return Err(validator::ValidationError::new("question_text_empty"));
        }
        if q.options.len() != OPTION_COUNT {
            return Err(validator::ValidationError::new("question_needs_four_options"));
        }
        if q.options.iter().any(|opt| opt.trim().is_empty()) {
            return Err(validator::ValidationError::new("question_option_empty"));
        }
        if q.correct_answer >= OPTION_COUNT {
            return Err(validator::ValidationError::new("correct_answer_out_of_range"));
        }
    }
    Ok(())
}
