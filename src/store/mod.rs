// src/store/mod.rs
//
// In-memory entity store. Stands in for a real backend: every operation
// sleeps a small multiple of a configurable latency unit to simulate a
// network round trip, and all tables live behind a single RwLock so a
// multi-record write (quiz + its questions) is visible to readers only as a
// whole.

pub mod catalog;
pub mod community;
pub mod materials;
pub mod quizzes;
mod seed;
pub mod users;

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    ad::Advertisement,
    doubt::Doubt,
    drug::Drug,
    material::{DownloadRequest, Material},
    notification::Notification,
    practice::PracticeSet,
    question::Question,
    quiz::Quiz,
    result::QuizResult,
    user::User,
    vacancy::Vacancy,
};

/// Latency multiples, proportional to the operations they simulate.
pub(crate) const READ: u32 = 1;
pub(crate) const WRITE: u32 = 2;
pub(crate) const SLOW_WRITE: u32 = 3;

#[derive(Default)]
pub(crate) struct Tables {
    pub users: Vec<User>,
    pub materials: Vec<Material>,
    pub downloads: Vec<DownloadRequest>,
    pub quizzes: Vec<Quiz>,
    /// Question sequences keyed by owning quiz id. A quiz id is present here
    /// iff the quiz row exists; both are written under one guard.
    pub questions: HashMap<String, Vec<Question>>,
    pub results: Vec<QuizResult>,
    pub practice_sets: Vec<PracticeSet>,
    pub doubts: Vec<Doubt>,
    pub notifications: Vec<Notification>,
    pub vacancies: Vec<Vacancy>,
    pub ads: Vec<Advertisement>,
    pub drugs: Vec<Drug>,
}

impl Tables {
    /// Fire-and-forget notification append. Callers already hold the write
    /// guard; failures cannot occur and nothing is awaited.
    pub(crate) fn notify(&mut self, user_id: &str, title: &str, message: String) {
        self.notifications.push(Notification {
            id: fresh_id(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            message,
            is_read: false,
            created_at: chrono::Utc::now(),
        });
    }
}

pub struct MemoryStore {
    latency_unit: Duration,
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// An empty store. Tests use this with `Duration::ZERO`.
    pub fn new(latency_unit: Duration) -> Self {
        Self {
            latency_unit,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// A store preloaded with the demo catalog (sample quizzes, practice
    /// sets, drugs, ads). Used by the server binary.
    pub fn with_demo_data(latency_unit: Duration) -> Self {
        Self {
            latency_unit,
            tables: RwLock::new(seed::demo_tables()),
        }
    }

    pub(crate) async fn simulate_latency(&self, units: u32) {
        let delay = self.latency_unit * units;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Fresh string id for any entity.
pub(crate) fn fresh_id() -> String {
    Uuid::new_v4().simple().to_string()
}
