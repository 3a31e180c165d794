// src/attempt/mod.rs
//
// The attempt engine. One student's timed pass through a quiz, modeled as an
// explicit state machine independent of any rendering layer:
//
//   InProgress -> ConfirmingSubmit -> Submitted (terminal)
//
// "Listing" is the absence of a session; abandonment drops the session
// without creating a record. The countdown decrements once per second while
// InProgress and stops the moment the session leaves that phase, so a late
// timeout handler can never double-submit.

pub mod registry;

use std::collections::HashMap;

use serde::Serialize;

use crate::error::AppError;
use crate::models::question::{PublicQuestion, Question};
use crate::models::quiz::Quiz;
use crate::models::result::QuizResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptPhase {
    InProgress,
    ConfirmingSubmit,
    Submitted,
}

/// Outcome of one countdown tick.
#[derive(Debug)]
pub enum Tick {
    Continue,
    /// The countdown hit zero while in progress. The session has already
    /// flipped to `Submitted`, so no later tick can expire again; the
    /// snapshot is the answer map as it stood at that instant.
    Expired { answers: HashMap<String, usize> },
}

/// Transient state of one active attempt. Never persisted; discarded on
/// submission or abandonment.
#[derive(Debug)]
pub struct AttemptSession {
    quiz: Quiz,
    questions: Vec<Question>,
    current_index: usize,
    answers: HashMap<String, usize>,
    remaining_seconds: u32,
    phase: AttemptPhase,
    result: Option<QuizResult>,
}

/// Read-side projection of a session for clients.
#[derive(Debug, Serialize)]
pub struct AttemptView {
    pub quiz_id: String,
    pub quiz_title: String,
    pub phase: AttemptPhase,
    pub current_index: usize,
    pub total_questions: usize,
    pub remaining_seconds: u32,
    /// The question at `current_index`, without its answer key.
    pub question: PublicQuestion,
    pub answers: HashMap<String, usize>,
    pub unanswered: usize,
    pub result: Option<QuizResult>,
}

impl AttemptSession {
    /// Begins an attempt. Refuses a quiz with no questions; in that case no
    /// session comes into existence at all.
    pub fn start(quiz: Quiz, questions: Vec<Question>) -> Result<Self, AppError> {
        if questions.is_empty() {
            return Err(AppError::NoQuestions(
                "This quiz has no questions yet".to_string(),
            ));
        }
        let remaining_seconds = quiz.duration_minutes * 60;
        Ok(Self {
            quiz,
            questions,
            current_index: 0,
            answers: HashMap::new(),
            remaining_seconds,
            phase: AttemptPhase::InProgress,
            result: None,
        })
    }

    pub fn phase(&self) -> AttemptPhase {
        self.phase
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz.id
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    /// Questions with no recorded answer. Absence from the map IS the
    /// unanswered representation; there are no placeholder values.
    pub fn unanswered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| !self.answers.contains_key(&q.id))
            .count()
    }

    fn ensure_in_progress(&self) -> Result<(), AppError> {
        match self.phase {
            AttemptPhase::InProgress => Ok(()),
            AttemptPhase::ConfirmingSubmit => Err(AppError::Validation(
                "Submission confirmation is pending".to_string(),
            )),
            AttemptPhase::Submitted => Err(AppError::Validation(
                "This attempt is already submitted".to_string(),
            )),
        }
    }

    /// Records (or overwrites) the answer for the current question. Does not
    /// advance the index.
    pub fn select_option(&mut self, option: usize) -> Result<(), AppError> {
        self.ensure_in_progress()?;
        let question = self.current_question();
        if option >= question.options.len() {
            return Err(AppError::Validation(format!(
                "Option index {option} is out of range"
            )));
        }
        let id = question.id.clone();
        self.answers.insert(id, option);
        Ok(())
    }

    /// Moves to the next question; clamps at the last one, never wraps.
    pub fn next(&mut self) -> Result<(), AppError> {
        self.ensure_in_progress()?;
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        }
        Ok(())
    }

    /// Moves to the previous question; clamps at the first one.
    pub fn previous(&mut self) -> Result<(), AppError> {
        self.ensure_in_progress()?;
        self.current_index = self.current_index.saturating_sub(1);
        Ok(())
    }

    /// Asks for submission. Advisory: reports how many questions are still
    /// unanswered but never blocks confirming.
    pub fn request_submit(&mut self) -> Result<usize, AppError> {
        self.ensure_in_progress()?;
        self.phase = AttemptPhase::ConfirmingSubmit;
        Ok(self.unanswered_count())
    }

    /// Backs out of the confirmation step and resumes the countdown.
    pub fn cancel_submit(&mut self) -> Result<(), AppError> {
        if self.phase != AttemptPhase::ConfirmingSubmit {
            return Err(AppError::Validation(
                "No submission is pending confirmation".to_string(),
            ));
        }
        self.phase = AttemptPhase::InProgress;
        Ok(())
    }

    /// Confirms submission, making the session terminal. Returns the answer
    /// snapshot for grading; the caller records the result via
    /// [`attach_result`](Self::attach_result).
    pub fn confirm(&mut self) -> Result<HashMap<String, usize>, AppError> {
        if self.phase != AttemptPhase::ConfirmingSubmit {
            return Err(AppError::Validation(
                "No submission is pending confirmation".to_string(),
            ));
        }
        self.phase = AttemptPhase::Submitted;
        Ok(self.answers.clone())
    }

    /// One second of countdown. Decrements only while InProgress; the
    /// confirmation dialog pauses the clock and a terminal session ignores
    /// ticks entirely. Expiry flips the phase itself, so exactly one tick
    /// can ever observe it.
    pub fn tick(&mut self) -> Tick {
        if self.phase != AttemptPhase::InProgress {
            return Tick::Continue;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = AttemptPhase::Submitted;
            return Tick::Expired {
                answers: self.answers.clone(),
            };
        }
        Tick::Continue
    }

    /// Attaches the graded result after submission.
    pub fn attach_result(&mut self, result: QuizResult) {
        self.result = Some(result);
    }

    pub fn view(&self) -> AttemptView {
        AttemptView {
            quiz_id: self.quiz.id.clone(),
            quiz_title: self.quiz.title.clone(),
            phase: self.phase,
            current_index: self.current_index,
            total_questions: self.questions.len(),
            remaining_seconds: self.remaining_seconds,
            question: PublicQuestion::from(self.current_question()),
            answers: self.answers.clone(),
            unanswered: self.unanswered_count(),
            result: self.result.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::{Program, QuizStatus};

    fn quiz(duration_minutes: u32, question_count: usize) -> Quiz {
        Quiz {
            id: "quiz1".to_string(),
            title: "Mid-Term Pharmacology".to_string(),
            duration_minutes,
            program: Program::Bachelor,
            status: QuizStatus::Published,
            question_count,
        }
    }

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                id: format!("quiz1_q{i}"),
                text: format!("Question {i}"),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer: 0,
                explanation: None,
            })
            .collect()
    }

    fn session(n: usize) -> AttemptSession {
        AttemptSession::start(quiz(1, n), questions(n)).unwrap()
    }

    #[test]
    fn start_rejects_empty_quiz() {
        let err = AttemptSession::start(quiz(1, 0), Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::NoQuestions(_)));
    }

    #[test]
    fn start_initializes_countdown_and_position() {
        let s = session(3);
        assert_eq!(s.phase(), AttemptPhase::InProgress);
        assert_eq!(s.remaining_seconds(), 60);
        assert_eq!(s.view().current_index, 0);
        assert_eq!(s.unanswered_count(), 3);
    }

    #[test]
    fn select_records_and_overwrites_without_advancing() {
        let mut s = session(2);
        s.select_option(1).unwrap();
        s.select_option(3).unwrap();
        let view = s.view();
        assert_eq!(view.current_index, 0);
        assert_eq!(view.answers.get("quiz1_q0"), Some(&3));
        assert_eq!(s.unanswered_count(), 1);
    }

    #[test]
    fn select_rejects_out_of_range_option() {
        let mut s = session(1);
        assert!(matches!(s.select_option(4), Err(AppError::Validation(_))));
        assert!(s.view().answers.is_empty());
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut s = session(2);
        s.previous().unwrap();
        assert_eq!(s.view().current_index, 0);
        s.next().unwrap();
        s.next().unwrap();
        s.next().unwrap();
        assert_eq!(s.view().current_index, 1);
    }

    #[test]
    fn request_submit_reports_unanswered_but_does_not_block() {
        let mut s = session(3);
        s.select_option(0).unwrap();
        let unanswered = s.request_submit().unwrap();
        assert_eq!(unanswered, 2);
        assert_eq!(s.phase(), AttemptPhase::ConfirmingSubmit);

        let answers = s.confirm().unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(s.phase(), AttemptPhase::Submitted);
    }

    #[test]
    fn cancel_returns_to_in_progress_and_clock_resumes() {
        let mut s = session(1);
        s.request_submit().unwrap();

        // Paused while the confirmation dialog is up.
        let before = s.remaining_seconds();
        assert!(matches!(s.tick(), Tick::Continue));
        assert_eq!(s.remaining_seconds(), before);

        s.cancel_submit().unwrap();
        assert_eq!(s.phase(), AttemptPhase::InProgress);
        assert!(matches!(s.tick(), Tick::Continue));
        assert_eq!(s.remaining_seconds(), before - 1);
    }

    #[test]
    fn operations_guarded_outside_in_progress() {
        let mut s = session(2);
        s.request_submit().unwrap();
        assert!(s.select_option(0).is_err());
        assert!(s.next().is_err());
        assert!(s.previous().is_err());
        assert!(s.request_submit().is_err());

        s.confirm().unwrap();
        assert!(s.cancel_submit().is_err());
        assert!(s.confirm().is_err());
    }

    #[test]
    fn expiry_fires_exactly_once_with_answer_snapshot() {
        let mut s = session(2);
        s.select_option(2).unwrap();

        let mut expired = Vec::new();
        for _ in 0..120 {
            if let Tick::Expired { answers } = s.tick() {
                expired.push(answers);
            }
        }

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].get("quiz1_q0"), Some(&2));
        assert_eq!(s.phase(), AttemptPhase::Submitted);
        assert_eq!(s.remaining_seconds(), 0);

        // Terminal: manual confirmation can no longer produce a second
        // submission.
        assert!(s.confirm().is_err());
    }
}
