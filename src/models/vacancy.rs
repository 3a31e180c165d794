// src/models/vacancy.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::material::ApprovalStatus;
use crate::models::user::Role;

/// A job posting. Submitted by instructors or admins, visible to everyone
/// once an admin approves it.
#[derive(Debug, Clone, Serialize)]
pub struct Vacancy {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: String,
    pub salary: String,
    pub deadline: chrono::NaiveDate,
    pub description: String,
    pub requirements: String,
    pub contact_email: String,
    pub image_url: Option<String>,
    pub posted_by: String,
    pub poster_name: String,
    pub poster_role: Role,
    pub status: ApprovalStatus,
    pub posted_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for posting a vacancy.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVacancyRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 200))]
    pub company: String,

    #[validate(length(min = 1, max = 200))]
    pub location: String,

    #[validate(length(min = 1, max = 50))]
    pub employment_type: String,

    #[validate(length(min = 1, max = 100))]
    pub salary: String,

    pub deadline: chrono::NaiveDate,

    #[validate(length(min = 1, max = 10000))]
    pub description: String,

    #[validate(length(min = 1, max = 10000))]
    pub requirements: String,

    #[validate(email(message = "Contact email must be a valid email address."))]
    pub contact_email: String,

    #[validate(url(message = "Image URL must be a valid URL."))]
    pub image_url: Option<String>,
}
