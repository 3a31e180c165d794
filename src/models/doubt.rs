// src/models/doubt.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoubtStatus {
    Open,
    Resolved,
}

/// A reply on a doubt thread. The first staff reply resolves the doubt.
#[derive(Debug, Clone, Serialize)]
pub struct DoubtReply {
    pub id: String,
    pub author_name: String,
    pub role: Role,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A student question on the doubt forum.
#[derive(Debug, Clone, Serialize)]
pub struct Doubt {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub subject: String,
    pub question: String,
    pub status: DoubtStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub replies: Vec<DoubtReply>,
}

/// DTO for posting a doubt.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDoubtRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Subject length must be between 1 and 100 characters."
    ))]
    pub subject: String,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Question length must be between 1 and 5000 characters."
    ))]
    pub question: String,
}

/// DTO for replying to a doubt.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplyDoubtRequest {
    #[validate(length(
        min = 1,
        max = 5000,
        message = "Reply length must be between 1 and 5000 characters."
    ))]
    pub text: String,
}
