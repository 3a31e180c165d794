// src/models/material.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::quiz::Program;

/// Shared moderation state for materials, download requests and vacancies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Pdf,
    Video,
    Ppt,
}

/// Uploaded study material. Only the metadata lives here; the file itself is
/// a storage collaborator's concern and is referenced by `url`.
#[derive(Debug, Clone, Serialize)]
pub struct Material {
    pub id: String,
    pub title: String,
    pub kind: MaterialKind,
    pub program: Program,
    pub status: ApprovalStatus,
    pub uploaded_by: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub url: String,
}

/// DTO for an instructor uploading material metadata.
#[derive(Debug, Deserialize, Validate)]
pub struct UploadMaterialRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title length must be between 1 and 200 characters."
    ))]
    pub title: String,

    pub kind: MaterialKind,

    pub program: Program,

    #[validate(url(message = "Material URL must be a valid URL."))]
    pub url: String,
}

/// A student's request to download an approved material, gated by an admin.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub id: String,
    pub material_id: String,

    /// Denormalized for the admin review table.
    pub material_title: String,

    pub student_id: String,
    pub student_name: String,
    pub status: ApprovalStatus,
    pub requested_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for moderation actions (materials, download requests, vacancies).
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ApprovalStatus,
}
