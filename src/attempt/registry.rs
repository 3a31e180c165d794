// src/attempt/registry.rs
//
// Tracks the single active attempt per student and drives each session's
// countdown with a cooperative one-second ticker task. All mutation of a
// session goes through its async mutex, so a manual confirm racing the
// timer resolves to exactly one submission.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::AppError;
use crate::models::result::QuizResult;
use crate::store::MemoryStore;

use super::{AttemptPhase, AttemptSession, AttemptView, Tick};

struct ActiveAttempt {
    session: Arc<Mutex<AttemptSession>>,
    ticker: JoinHandle<()>,
}

pub struct SessionRegistry {
    store: Arc<MemoryStore>,
    /// Active sessions keyed by student id; one attempt per student.
    active: Mutex<HashMap<String, ActiveAttempt>>,
}

impl SessionRegistry {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Starts a fresh attempt for the student, abandoning any session they
    /// already had (its ticker is aborted, no record is created for it).
    pub async fn start(
        &self,
        student_id: &str,
        student_name: &str,
        quiz_id: &str,
    ) -> Result<AttemptView, AppError> {
        let quiz = self.store.get_quiz(quiz_id).await?;
        if quiz.question_count == 0 {
            return Err(AppError::NoQuestions(
                "This quiz has no questions yet".to_string(),
            ));
        }
        let questions = self.store.get_quiz_questions(quiz_id).await?;

        let session = AttemptSession::start(quiz, questions)?;
        let view = session.view();
        let session = Arc::new(Mutex::new(session));

        let ticker = self.spawn_ticker(
            Arc::clone(&session),
            student_id.to_string(),
            student_name.to_string(),
        );

        let mut active = self.active.lock().await;
        if let Some(previous) = active.insert(
            student_id.to_string(),
            ActiveAttempt {
                session,
                ticker,
            },
        ) {
            previous.ticker.abort();
        }
        Ok(view)
    }

    fn spawn_ticker(
        &self,
        session: Arc<Mutex<AttemptSession>>,
        student_id: String,
        student_name: String,
    ) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut session = session.lock().await;
                match session.tick() {
                    Tick::Expired { answers } => {
                        let quiz_id = session.quiz_id().to_string();
                        match store
                            .submit_quiz(&quiz_id, &answers, &student_id, &student_name)
                            .await
                        {
                            Ok(result) => {
                                tracing::info!(
                                    quiz_id,
                                    student_id,
                                    score = result.score,
                                    "attempt timed out, submitted automatically"
                                );
                                session.attach_result(result);
                            }
                            Err(e) => {
                                tracing::error!("failed to record timed-out attempt: {e}");
                            }
                        }
                        break;
                    }
                    Tick::Continue => {
                        if session.phase() == AttemptPhase::Submitted {
                            break;
                        }
                    }
                }
            }
        })
    }

    async fn session_for(&self, student_id: &str) -> Result<Arc<Mutex<AttemptSession>>, AppError> {
        let active = self.active.lock().await;
        active
            .get(student_id)
            .map(|a| Arc::clone(&a.session))
            .ok_or_else(|| AppError::NotFound("No active attempt".to_string()))
    }

    pub async fn view(&self, student_id: &str) -> Result<AttemptView, AppError> {
        let session = self.session_for(student_id).await?;
        let session = session.lock().await;
        Ok(session.view())
    }

    pub async fn select_option(
        &self,
        student_id: &str,
        option: usize,
    ) -> Result<AttemptView, AppError> {
        let session = self.session_for(student_id).await?;
        let mut session = session.lock().await;
        session.select_option(option)?;
        Ok(session.view())
    }

    pub async fn next(&self, student_id: &str) -> Result<AttemptView, AppError> {
        let session = self.session_for(student_id).await?;
        let mut session = session.lock().await;
        session.next()?;
        Ok(session.view())
    }

    pub async fn previous(&self, student_id: &str) -> Result<AttemptView, AppError> {
        let session = self.session_for(student_id).await?;
        let mut session = session.lock().await;
        session.previous()?;
        Ok(session.view())
    }

    pub async fn request_submit(&self, student_id: &str) -> Result<AttemptView, AppError> {
        let session = self.session_for(student_id).await?;
        let mut session = session.lock().await;
        session.request_submit()?;
        Ok(session.view())
    }

    pub async fn cancel_submit(&self, student_id: &str) -> Result<AttemptView, AppError> {
        let session = self.session_for(student_id).await?;
        let mut session = session.lock().await;
        session.cancel_submit()?;
        Ok(session.view())
    }

    /// Confirms a pending submission and grades it. If the countdown beat
    /// the student to it, the already-recorded result is returned instead of
    /// creating a second one.
    pub async fn confirm(
        &self,
        student_id: &str,
        student_name: &str,
    ) -> Result<QuizResult, AppError> {
        let session = self.session_for(student_id).await?;
        let mut session = session.lock().await;

        if session.phase() == AttemptPhase::Submitted {
            if let Some(result) = session.result() {
                return Ok(result.clone());
            }
        }

        let answers = session.confirm()?;
        let quiz_id = session.quiz_id().to_string();
        let result = self
            .store
            .submit_quiz(&quiz_id, &answers, student_id, student_name)
            .await?;
        session.attach_result(result.clone());
        Ok(result)
    }

    /// Drops the student's session without creating any record.
    pub async fn abandon(&self, student_id: &str) -> Result<(), AppError> {
        let mut active = self.active.lock().await;
        let attempt = active
            .remove(student_id)
            .ok_or_else(|| AppError::NotFound("No active attempt".to_string()))?;
        attempt.ticker.abort();
        Ok(())
    }
}
