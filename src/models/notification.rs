// src/models/notification.rs

use serde::Serialize;

/// A fire-and-forget message appended by store events (result published,
/// material reviewed, doubt answered). Delivery is pull: clients poll their
/// list and mark entries read.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
