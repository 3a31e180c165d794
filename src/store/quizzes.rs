// src/store/quizzes.rs
//
// Quiz authoring, grading and the result lifecycle.

use std::collections::HashMap;

use chrono::Utc;

use crate::error::AppError;
use crate::models::question::{Question, QuestionInput};
use crate::models::quiz::{Program, Quiz, QuizStatus};
use crate::models::result::{LeaderboardGroup, QuizResult, ResultStatus, group_by_percentage, percentage};

use super::{MemoryStore, READ, SLOW_WRITE, fresh_id};

/// Quiz metadata supplied by the author; id, status and question_count are
/// assigned by the store.
pub struct NewQuiz {
    pub title: String,
    pub duration_minutes: u32,
    pub program: Program,
}

impl MemoryStore {
    pub async fn list_quizzes(&self, program: Option<Program>) -> Vec<Quiz> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        match program {
            Some(filter) => tables
                .quizzes
                .iter()
                .filter(|q| q.program.visible_to(filter))
                .cloned()
                .collect(),
            None => tables.quizzes.clone(),
        }
    }

    pub async fn get_quiz(&self, id: &str) -> Result<Quiz, AppError> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        tables
            .quizzes
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))
    }

    /// Persists a quiz and its question sequence as one atomic unit: both
    /// records are written under a single guard, so no reader ever observes a
    /// quiz whose `question_count` disagrees with its stored questions.
    pub async fn create_quiz(
        &self,
        meta: NewQuiz,
        questions: Vec<QuestionInput>,
    ) -> Result<Quiz, AppError> {
        // Structural validation happens in the request DTO; these guards keep
        // the store's invariants independent of the transport.
        if questions.is_empty() {
            return Err(AppError::Validation(
                "A quiz needs at least one question".to_string(),
            ));
        }
        if meta.duration_minutes == 0 {
            return Err(AppError::Validation(
                "Duration must be at least one minute".to_string(),
            ));
        }

        self.simulate_latency(SLOW_WRITE).await;

        let quiz_id = fresh_id();
        let questions: Vec<Question> = questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| q.into_question(&quiz_id, i))
            .collect();

        let quiz = Quiz {
            id: quiz_id.clone(),
            title: meta.title,
            duration_minutes: meta.duration_minutes,
            program: meta.program,
            status: QuizStatus::Published,
            question_count: questions.len(),
        };

        let mut tables = self.tables.write().await;
        tables.quizzes.push(quiz.clone());
        tables.questions.insert(quiz_id, questions);
        Ok(quiz)
    }

    pub async fn get_quiz_questions(&self, quiz_id: &str) -> Result<Vec<Question>, AppError> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        tables
            .questions
            .get(quiz_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))
    }

    /// Grades an answer map against the quiz's stored questions and appends a
    /// pending result. An absent key counts as incorrect; an unknown quiz id
    /// is a NotFound error.
    pub async fn submit_quiz(
        &self,
        quiz_id: &str,
        answers: &HashMap<String, usize>,
        student_id: &str,
        student_name: &str,
    ) -> Result<QuizResult, AppError> {
        self.simulate_latency(SLOW_WRITE).await;
        let mut tables = self.tables.write().await;

        let quiz_title = tables
            .quizzes
            .iter()
            .find(|q| q.id == quiz_id)
            .map(|q| q.title.clone())
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

        let questions = tables.questions.get(quiz_id).cloned().unwrap_or_default();

        let score = questions
            .iter()
            .filter(|q| answers.get(&q.id) == Some(&q.correct_answer))
            .count();
        let total_questions = questions.len();

        let result = QuizResult {
            id: fresh_id(),
            quiz_id: quiz_id.to_string(),
            quiz_title,
            score,
            total_questions,
            percentage: percentage(score, total_questions),
            completed_at: Utc::now(),
            status: ResultStatus::Pending,
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
        };
        tables.results.push(result.clone());
        Ok(result)
    }

    /// All results for one student, newest first.
    pub async fn results_for_student(&self, student_id: &str) -> Vec<QuizResult> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        let mut results: Vec<QuizResult> = tables
            .results
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        results
    }

    pub async fn all_results(&self) -> Vec<QuizResult> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;
        let mut results = tables.results.clone();
        results.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        results
    }

    /// Flips a result pending -> published and notifies the student. A
    /// no-op when already published; score and percentage never change.
    pub async fn publish_result(&self, result_id: &str) -> Result<QuizResult, AppError> {
        self.simulate_latency(SLOW_WRITE).await;
        let mut tables = self.tables.write().await;

        let result = tables
            .results
            .iter_mut()
            .find(|r| r.id == result_id)
            .ok_or_else(|| AppError::NotFound("Result not found".to_string()))?;

        if result.status == ResultStatus::Published {
            return Ok(result.clone());
        }

        result.status = ResultStatus::Published;
        let result = result.clone();
        tables.notify(
            &result.student_id,
            "Result published",
            format!(
                "Your result for '{}' is out: {}%.",
                result.quiz_title, result.percentage
            ),
        );
        Ok(result)
    }

    /// Published results of one quiz, grouped by exact percentage and ranked
    /// descending. Never mutates results.
    pub async fn leaderboard(&self, quiz_id: &str) -> Result<Vec<LeaderboardGroup>, AppError> {
        self.simulate_latency(READ).await;
        let tables = self.tables.read().await;

        if !tables.quizzes.iter().any(|q| q.id == quiz_id) {
            return Err(AppError::NotFound("Quiz not found".to_string()));
        }

        let published: Vec<QuizResult> = tables
            .results
            .iter()
            .filter(|r| r.quiz_id == quiz_id && r.status == ResultStatus::Published)
            .cloned()
            .collect();
        Ok(group_by_percentage(published))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(Duration::ZERO)
    }

    fn meta(title: &str) -> NewQuiz {
        NewQuiz {
            title: title.to_string(),
            duration_minutes: 45,
            program: Program::Bachelor,
        }
    }

    fn question(text: &str, correct: usize) -> QuestionInput {
        QuestionInput {
            text: text.to_string(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct,
            explanation: None,
        }
    }

    #[tokio::test]
    async fn question_count_matches_stored_sequence() {
        let store = store();
        let quiz = store
            .create_quiz(meta("Mid-Term"), vec![question("q1", 0), question("q2", 2)])
            .await
            .unwrap();

        assert_eq!(quiz.question_count, 2);
        let questions = store.get_quiz_questions(&quiz.id).await.unwrap();
        assert_eq!(questions.len(), quiz.question_count);
        assert_eq!(questions[0].id, format!("{}_q0", quiz.id));
        assert_eq!(questions[1].id, format!("{}_q1", quiz.id));
    }

    #[tokio::test]
    async fn create_rejects_empty_question_set() {
        let store = store();
        let err = store.create_quiz(meta("Empty"), Vec::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.list_quizzes(None).await.is_empty());
    }

    #[tokio::test]
    async fn grading_counts_correct_answers_and_rounds_percentage() {
        let store = store();
        let quiz = store
            .create_quiz(meta("Mid-Term"), vec![question("q1", 0), question("q2", 2)])
            .await
            .unwrap();

        // First answer right, second wrong.
        let mut answers = HashMap::new();
        answers.insert(format!("{}_q0", quiz.id), 0);
        answers.insert(format!("{}_q1", quiz.id), 1);

        let result = store
            .submit_quiz(&quiz.id, &answers, "s1", "Aarav Student")
            .await
            .unwrap();

        assert_eq!(result.score, 1);
        assert_eq!(result.total_questions, 2);
        assert_eq!(result.percentage, 50);
        assert_eq!(result.status, ResultStatus::Pending);
        assert_eq!(result.quiz_title, "Mid-Term");
    }

    #[tokio::test]
    async fn missing_answers_count_as_incorrect() {
        let store = store();
        let quiz = store
            .create_quiz(meta("Partial"), vec![question("q1", 3), question("q2", 1)])
            .await
            .unwrap();

        let mut answers = HashMap::new();
        answers.insert(format!("{}_q1", quiz.id), 1);

        let result = store
            .submit_quiz(&quiz.id, &answers, "s1", "Aarav Student")
            .await
            .unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.percentage, 50);
    }

    #[tokio::test]
    async fn submit_unknown_quiz_is_not_found() {
        let store = store();
        let err = store
            .submit_quiz("missing", &HashMap::new(), "s1", "Aarav Student")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.all_results().await.is_empty());
    }

    #[tokio::test]
    async fn publish_is_idempotent() {
        let store = store();
        let quiz = store
            .create_quiz(meta("Once"), vec![question("q1", 0)])
            .await
            .unwrap();
        let result = store
            .submit_quiz(&quiz.id, &HashMap::new(), "s1", "Aarav Student")
            .await
            .unwrap();

        let first = store.publish_result(&result.id).await.unwrap();
        let second = store.publish_result(&result.id).await.unwrap();

        assert_eq!(first.status, ResultStatus::Published);
        assert_eq!(second.status, ResultStatus::Published);
        assert_eq!(second.score, result.score);
        assert_eq!(second.percentage, result.percentage);

        // Exactly one notification for the student despite the double call.
        let notes = store.notifications_for("s1").await;
        assert_eq!(notes.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_submissions_stay_independent() {
        let store = store();
        let quiz = store
            .create_quiz(meta("Twice"), vec![question("q1", 0)])
            .await
            .unwrap();

        let mut answers = HashMap::new();
        answers.insert(format!("{}_q0", quiz.id), 0);

        store.submit_quiz(&quiz.id, &answers, "s1", "Aarav").await.unwrap();
        store.submit_quiz(&quiz.id, &HashMap::new(), "s1", "Aarav").await.unwrap();

        let history = store.results_for_student("s1").await;
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn history_filters_by_student_and_sorts_newest_first() {
        let store = store();
        let quiz = store
            .create_quiz(meta("History"), vec![question("q1", 0)])
            .await
            .unwrap();

        store.submit_quiz(&quiz.id, &HashMap::new(), "s1", "Aarav").await.unwrap();
        store.submit_quiz(&quiz.id, &HashMap::new(), "s2", "Bina").await.unwrap();
        store.submit_quiz(&quiz.id, &HashMap::new(), "s1", "Aarav").await.unwrap();

        let history = store.results_for_student("s1").await;
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|r| r.student_id == "s1"));
        assert!(history[0].completed_at >= history[1].completed_at);
    }

    #[tokio::test]
    async fn leaderboard_ignores_pending_results() {
        let store = store();
        let quiz = store
            .create_quiz(meta("Board"), vec![question("q1", 0)])
            .await
            .unwrap();

        let mut right = HashMap::new();
        right.insert(format!("{}_q0", quiz.id), 0);

        let published = store.submit_quiz(&quiz.id, &right, "s1", "Aarav").await.unwrap();
        store.submit_quiz(&quiz.id, &HashMap::new(), "s2", "Bina").await.unwrap();
        store.publish_result(&published.id).await.unwrap();

        let board = store.leaderboard(&quiz.id).await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].percentage, 100);
        assert_eq!(board[0].entries.len(), 1);
    }

    #[tokio::test]
    async fn program_filter_includes_all_programs_content() {
        let store = store();
        store.create_quiz(meta("Bachelor only"), vec![question("q1", 0)]).await.unwrap();
        store
            .create_quiz(
                NewQuiz {
                    title: "Safety Basics".to_string(),
                    duration_minutes: 15,
                    program: Program::All,
                },
                vec![question("q1", 0)],
            )
            .await
            .unwrap();

        let bachelor = store.list_quizzes(Some(Program::Bachelor)).await;
        assert_eq!(bachelor.len(), 2);

        let diploma = store.list_quizzes(Some(Program::Diploma)).await;
        assert_eq!(diploma.len(), 1);
        assert_eq!(diploma[0].title, "Safety Basics");
    }
}
