// src/store/community.rs
//
// Doubt forum and notification feed.

use chrono::Utc;

use crate::error::AppError;
use crate::models::doubt::{Doubt, DoubtReply, DoubtStatus};
use crate::models::notification::Notification;
use crate::models::user::Role;

use super::{MemoryStore, READ, WRITE, fresh_id};

impl MemoryStore {
    pub async fn list_doubts(&self) -> Vec<Doubt> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        let mut doubts = tables.doubts.clone();
        doubts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        doubts
    }

    pub async fn create_doubt(
        &self,
        student_id: &str,
        student_name: &str,
        subject: String,
        question: String,
    ) -> Result<Doubt, AppError> {
        self.simulate_latency(WRITE).await;
        let doubt = Doubt {
            id: fresh_id(),
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
            subject,
            question,
            status: DoubtStatus::Open,
            created_at: Utc::now(),
            replies: Vec::new(),
        };
        let mut tables = self.tables.write().await;
        tables.doubts.push(doubt.clone());
        Ok(doubt)
    }

    /// Appends a reply and resolves the doubt. The asking student gets a
    /// notification unless they answered themselves.
    pub async fn reply_doubt(
        &self,
        doubt_id: &str,
        author_id: &str,
        author_name: &str,
        role: Role,
        text: String,
    ) -> Result<Doubt, AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;

        let doubt = tables
            .doubts
            .iter_mut()
            .find(|d| d.id == doubt_id)
            .ok_or_else(|| AppError::NotFound("Doubt not found".to_string()))?;

        doubt.replies.push(DoubtReply {
            id: fresh_id(),
            author_name: author_name.to_string(),
            role,
            text,
            created_at: Utc::now(),
        });
        doubt.status = DoubtStatus::Resolved;
        let doubt = doubt.clone();

        if doubt.student_id != author_id {
            tables.notify(
                &doubt.student_id,
                "Doubt answered",
                format!("{} replied to your doubt '{}'.", author_name, doubt.subject),
            );
        }
        Ok(doubt)
    }

    pub async fn notifications_for(&self, user_id: &str) -> Vec<Notification> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        let mut notes: Vec<Notification> = tables
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<(), AppError> {
        self.simulate_latency(WRITE).await;
        let mut tables = self.tables.write().await;
        let note = tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;
        note.is_read = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn reply_resolves_doubt_and_notifies_student() {
        let store = MemoryStore::new(Duration::ZERO);
        let doubt = store
            .create_doubt(
                "s1",
                "Aarav Student",
                "Pharmacology".to_string(),
                "What is first-pass metabolism?".to_string(),
            )
            .await
            .unwrap();
        assert_eq!(doubt.status, DoubtStatus::Open);

        let updated = store
            .reply_doubt(
                &doubt.id,
                "i1",
                "Dr. Sharma",
                Role::Instructor,
                "Metabolism of a drug before it reaches systemic circulation.".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, DoubtStatus::Resolved);
        assert_eq!(updated.replies.len(), 1);

        let notes = store.notifications_for("s1").await;
        assert_eq!(notes.len(), 1);
        assert!(!notes[0].is_read);

        store.mark_notification_read(&notes[0].id).await.unwrap();
        let notes = store.notifications_for("s1").await;
        assert!(notes[0].is_read);
    }

    #[tokio::test]
    async fn replying_to_own_doubt_does_not_notify() {
        let store = MemoryStore::new(Duration::ZERO);
        let doubt = store
            .create_doubt("s1", "Aarav", "Anatomy".to_string(), "Skull bones?".to_string())
            .await
            .unwrap();
        store
            .reply_doubt(&doubt.id, "s1", "Aarav", Role::Student, "Found it myself.".to_string())
            .await
            .unwrap();
        assert!(store.notifications_for("s1").await.is_empty());
    }
}
