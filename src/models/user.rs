// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::quiz::Program;

/// Closed set of roles. Capability checks dispatch on this enum instead of
/// matching on free-form role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Role {
    /// Instructors and admins may author content (quizzes, materials,
    /// practice sets) and see unpublished results.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Instructor | Role::Admin)
    }
}

/// A registered account.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,

    pub name: String,

    /// Unique login identifier.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password_hash: String,

    pub role: Role,

    /// Academic track; students are scoped to one, staff see everything.
    pub program: Option<Program>,

    /// Instructors start unverified and must be approved by an admin before
    /// they can author content.
    pub is_verified: bool,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a new account (registration).
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 2,
        max = 80,
        message = "Name length must be between 2 and 80 characters."
    ))]
    pub name: String,

    #[validate(email(message = "A valid email address is required."))]
    pub email: String,

    #[validate(length(
        min = 6,
        max = 128,
        message = "Password length must be between 6 and 128 characters."
    ))]
    pub password: String,

    pub role: Role,

    pub program: Option<Program>,
}

/// DTO for login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// DTO for an admin changing a user's role.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub role: Option<Role>,
    pub program: Option<Program>,
}
