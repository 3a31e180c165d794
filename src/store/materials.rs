// src/store/materials.rs

use chrono::Utc;

use crate::error::AppError;
use crate::models::material::{ApprovalStatus, DownloadRequest, Material, MaterialKind};
use crate::models::quiz::Program;
use crate::models::user::Role;

use super::{MemoryStore, READ, WRITE, fresh_id};

pub struct NewMaterial {
    pub title: String,
    pub kind: MaterialKind,
    pub program: Program,
    pub url: String,
    pub uploaded_by: String,
}

impl MemoryStore {
    /// Students only see approved materials for their program; staff see
    /// everything including the pending review queue.
    pub async fn list_materials(&self, role: Role, program: Option<Program>) -> Vec<Material> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;

        if role.is_staff() {
            return tables.materials.clone();
        }

        tables
            .materials
            .iter()
            .filter(|m| m.status == ApprovalStatus::Approved)
            .filter(|m| match program {
                Some(filter) => m.program.visible_to(filter),
                None => true,
            })
            .cloned()
            .collect()
    }

    pub async fn upload_material(&self, new: NewMaterial) -> Result<Material, AppError> {
        self.simulate_latency(WRITE).await;
        let material = Material {
            id: fresh_id(),
            title: new.title,
            kind: new.kind,
            program: new.program,
            status: ApprovalStatus::Pending,
            uploaded_by: new.uploaded_by,
            uploaded_at: Utc::now(),
            url: new.url,
        };
        let mut tables = self.tables.write().await;
        tables.materials.push(material.clone());
        Ok(material)
    }

    pub async fn set_material_status(
        &self,
        id: &str,
        status: ApprovalStatus,
    ) -> Result<Material, AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;
        let material = tables
            .materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::NotFound("Material not found".to_string()))?;
        material.status = status;
        let material = material.clone();

        let verdict = match status {
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
            ApprovalStatus::Pending => "queued for review",
        };
        tables.notify(
            &material.uploaded_by,
            "Material reviewed",
            format!("Your material '{}' was {}.", material.title, verdict),
        );
        Ok(material)
    }

    pub async fn request_download(
        &self,
        material_id: &str,
        student_id: &str,
        student_name: &str,
    ) -> Result<DownloadRequest, AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;

        let material_title = tables
            .materials
            .iter()
            .find(|m| m.id == material_id)
            .map(|m| m.title.clone())
            .ok_or_else(|| AppError::NotFound("Material not found".to_string()))?;

        let request = DownloadRequest {
            id: fresh_id(),
            material_id: material_id.to_string(),
            material_title,
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
            status: ApprovalStatus::Pending,
            requested_at: Utc::now(),
        };
        tables.downloads.push(request.clone());
        Ok(request)
    }

    pub async fn list_download_requests(&self) -> Vec<DownloadRequest> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        tables.downloads.clone()
    }

    pub async fn set_download_status(
        &self,
        id: &str,
        status: ApprovalStatus,
    ) -> Result<DownloadRequest, AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;
        let request = tables
            .downloads
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::NotFound("Download request not found".to_string()))?;
        request.status = status;
        let request = request.clone();

        if status == ApprovalStatus::Approved {
            tables.notify(
                &request.student_id,
                "Download approved",
                format!("Your download request for '{}' was approved.", request.material_title),
            );
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn students_only_see_approved_materials_for_their_program() {
        let store = MemoryStore::new(Duration::ZERO);
        let pending = store
            .upload_material(NewMaterial {
                title: "Drug Interactions Video".to_string(),
                kind: MaterialKind::Video,
                program: Program::Bachelor,
                url: "https://files.example.com/interactions.mp4".to_string(),
                uploaded_by: "i1".to_string(),
            })
            .await
            .unwrap();
        let approved = store
            .upload_material(NewMaterial {
                title: "General Safety Protocols".to_string(),
                kind: MaterialKind::Pdf,
                program: Program::All,
                url: "https://files.example.com/safety.pdf".to_string(),
                uploaded_by: "i1".to_string(),
            })
            .await
            .unwrap();
        store
            .set_material_status(&approved.id, ApprovalStatus::Approved)
            .await
            .unwrap();

        let student_view = store
            .list_materials(Role::Student, Some(Program::Diploma))
            .await;
        assert_eq!(student_view.len(), 1);
        assert_eq!(student_view[0].title, "General Safety Protocols");

        let staff_view = store.list_materials(Role::Instructor, None).await;
        assert_eq!(staff_view.len(), 2);

        // The uploader was told about the approval.
        let notes = store.notifications_for("i1").await;
        assert_eq!(notes.len(), 1);
        let _ = pending;
    }

    #[tokio::test]
    async fn download_request_requires_existing_material() {
        let store = MemoryStore::new(Duration::ZERO);
        let err = store
            .request_download("missing", "s1", "Aarav")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
