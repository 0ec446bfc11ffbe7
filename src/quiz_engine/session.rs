//! The live quiz: an ordered question sequence, a cursor and the answers given.
//!
//! ```text
//! NotStarted ──start──▶ InProgress ──advance past last──▶ Completed
//!                          ▲                                  │
//!                          └──────── start / start_review ────┘
//! ```
//!
//! A session started through [`Session::start_review`] is in the reviewing
//! sub-mode: an ordinary in-progress session scoped to earlier mistakes.

use std::fmt;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    error::{QuizError, Result},
    helpers::round_percent,
    models::{AnswerRecord, Question, SKIP_MARKER},
    normalizer::normalize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not started"),
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::Completed  => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    questions: Vec<Question>,
    index: usize,
    score: u32,
    answers: Vec<AnswerRecord>,
    started_at: Option<DateTime<Utc>>,
    elapsed_ms: u64,
    state: SessionState,
    reviewing: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh attempt over `questions`, discarding any previous progress.
    pub fn start(&mut self, questions: Vec<Question>, now: DateTime<Utc>) -> Result<()> {
        self.begin(questions, now, false)
    }

    /// Begin a review attempt over questions missed in an earlier session.
    pub fn start_review(&mut self, questions: Vec<Question>, now: DateTime<Utc>) -> Result<()> {
        self.begin(questions, now, true)
    }

    fn begin(&mut self, questions: Vec<Question>, now: DateTime<Utc>, reviewing: bool) -> Result<()> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }
        *self = Session {
            questions,
            index: 0,
            score: 0,
            answers: Vec::new(),
            started_at: Some(now),
            elapsed_ms: 0,
            state: SessionState::InProgress,
            reviewing,
        };
        debug!("session started with {} questions (review: {reviewing})", self.questions.len());
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_reviewing(&self) -> bool {
        self.reviewing
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Question on screen, or `None` outside an in-progress session.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::InProgress => self.questions.get(self.index),
            _ => None,
        }
    }

    /// Whether the question at the cursor already has an answer record.
    pub fn is_current_answered(&self) -> bool {
        self.answers.last().is_some_and(|a| a.question_index == self.index)
    }

    /// Grade `text` against the current question by exact normalized equality.
    ///
    /// Returns whether the answer was correct.
    pub fn submit(&mut self, text: &str, now: DateTime<Utc>) -> Result<bool> {
        let question = self.answerable()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(QuizError::EmptyAnswer);
        }

        let correct = normalize(text) == normalize(&question.name);
        let record = AnswerRecord {
            question: question.clone(),
            question_index: self.index,
            user_answer: text.to_string(),
            correct,
            skipped: false,
            elapsed_ms: self.elapsed_at(now),
        };
        self.answers.push(record);
        if correct {
            self.score += 1;
        }
        debug!("question {} graded: {}", self.index, if correct { "correct" } else { "wrong" });
        Ok(correct)
    }

    /// Record the current question as skipped (and therefore not correct).
    pub fn skip(&mut self, now: DateTime<Utc>) -> Result<()> {
        let question = self.answerable()?.clone();
        self.answers.push(AnswerRecord {
            question,
            question_index: self.index,
            user_answer: SKIP_MARKER.to_string(),
            correct: false,
            skipped: true,
            elapsed_ms: self.elapsed_at(now),
        });
        debug!("question {} skipped", self.index);
        Ok(())
    }

    /// Move to the next question; moving past the last one completes the session.
    pub fn advance(&mut self) -> Result<SessionState> {
        self.ensure_in_progress()?;
        self.index += 1;
        if self.index == self.questions.len() {
            self.state = SessionState::Completed;
            debug!("session completed: {}/{} correct", self.score, self.questions.len());
        }
        Ok(self.state)
    }

    /// Step back one question, un-grading the question being left.
    pub fn retreat(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        if self.index == 0 {
            return Err(QuizError::AtFirstQuestion);
        }
        if self.is_current_answered() {
            if let Some(record) = self.answers.pop() {
                if record.correct {
                    self.score -= 1;
                }
            }
        }
        self.index -= 1;
        Ok(())
    }

    /// Refresh elapsed time; never touches the cursor, score or answers.
    pub fn tick(&mut self, now: DateTime<Utc>) -> u64 {
        if self.state == SessionState::InProgress {
            self.elapsed_ms = self.elapsed_at(now);
        }
        self.elapsed_ms
    }

    /// Running percentage over the questions already passed.
    pub fn running_percentage(&self) -> u32 {
        round_percent(self.score as usize, self.index)
    }

    /// Questions answered wrongly (skips excluded), in session order.
    pub fn mistakes(&self) -> Vec<Question> {
        self.answers
            .iter()
            .filter(|a| !a.correct && !a.skipped)
            .map(|a| a.question.clone())
            .collect()
    }

    fn ensure_in_progress(&self) -> Result<()> {
        match self.state {
            SessionState::InProgress => Ok(()),
            state => Err(QuizError::NotInProgress { state }),
        }
    }

    fn answerable(&self) -> Result<&Question> {
        self.ensure_in_progress()?;
        if self.is_current_answered() {
            return Err(QuizError::AlreadyAnswered { index: self.index });
        }
        self.questions
            .get(self.index)
            .ok_or(QuizError::NotInProgress { state: self.state })
    }

    fn elapsed_at(&self, now: DateTime<Utc>) -> u64 {
        self.started_at
            .map(|start| (now - start).num_milliseconds().max(0) as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn question(name: &str) -> Question {
        Question {
            image: "images/craneo.png".into(),
            system: "esqueletico".into(),
            region: "cabeza".into(),
            name: name.into(),
            x: 100.0,
            y: 100.0,
            width: 20.0,
            height: 20.0,
            hint: None,
        }
    }

    fn three() -> Vec<Question> {
        vec![question("Hueso Parietal"), question("Hueso Frontal"), question("Hueso Occipital")]
    }

    fn started() -> Session {
        let mut s = Session::new();
        s.start(three(), t0()).unwrap();
        s
    }

    #[test]
    fn new_session_is_not_started() {
        let s = Session::new();
        assert_eq!(s.state(), SessionState::NotStarted);
        assert!(s.current_question().is_none());
        assert_eq!(s.running_percentage(), 0);
    }

    #[test]
    fn full_walkthrough_reaches_completed() {
        let mut s = Session::new();
        assert_eq!(s.state(), SessionState::NotStarted);
        s.start(three(), t0()).unwrap();
        assert_eq!(s.state(), SessionState::InProgress);

        assert!(s.submit("hueso parietal", t0() + Duration::seconds(3)).unwrap());
        assert_eq!(s.advance().unwrap(), SessionState::InProgress);
        assert!(!s.submit("Hueso Temporal", t0() + Duration::seconds(8)).unwrap());
        assert_eq!(s.advance().unwrap(), SessionState::InProgress);
        s.skip(t0() + Duration::seconds(9)).unwrap();
        assert_eq!(s.advance().unwrap(), SessionState::Completed);

        assert_eq!(s.answers().len(), 3);
        assert_eq!(s.answers().iter().filter(|a| a.correct).count(), 1);
        assert_eq!(s.score(), 1);
        assert!(s.answers()[2].skipped);
        assert_eq!(s.answers()[2].user_answer, SKIP_MARKER);
        assert_eq!(s.answers()[1].elapsed_ms, 8_000);
        assert_eq!(s.mistakes(), vec![question("Hueso Frontal")]);
    }

    #[test]
    fn grading_ignores_case_accents_and_punctuation() {
        let mut s = Session::new();
        s.start(vec![question("Esternón")], t0()).unwrap();
        assert!(s.submit("  ESTERNON. ", t0()).unwrap());
        assert_eq!(s.answers()[0].user_answer, "ESTERNON.");
    }

    #[test]
    fn grading_is_exact_not_fuzzy() {
        let mut s = started();
        assert!(!s.submit("Hueso Parietel", t0()).unwrap());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn blank_answer_is_rejected_without_change() {
        let mut s = started();
        assert!(matches!(s.submit("   ", t0()), Err(QuizError::EmptyAnswer)));
        assert!(s.answers().is_empty());
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn same_question_cannot_be_graded_twice() {
        let mut s = started();
        s.submit("x", t0()).unwrap();
        assert!(matches!(s.submit("y", t0()), Err(QuizError::AlreadyAnswered { index: 0 })));
        assert!(matches!(s.skip(t0()), Err(QuizError::AlreadyAnswered { index: 0 })));
        assert_eq!(s.answers().len(), 1);
    }

    #[test]
    fn retreat_at_first_question_is_a_no_op() {
        let mut s = started();
        s.submit("Hueso Parietal", t0()).unwrap();
        assert!(matches!(s.retreat(), Err(QuizError::AtFirstQuestion)));
        assert_eq!(s.index(), 0);
        assert_eq!(s.answers().len(), 1);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn retreat_removes_the_answer_being_left() {
        let mut s = started();
        s.submit("nope", t0()).unwrap();
        s.advance().unwrap();
        s.submit("Hueso Frontal", t0()).unwrap();
        assert_eq!(s.score(), 1);

        s.retreat().unwrap();
        assert_eq!(s.index(), 0);
        assert_eq!(s.answers().len(), 1);
        // The popped answer was correct, so the score follows it out.
        assert_eq!(s.score(), 0);
        assert!(s.is_current_answered());
    }

    #[test]
    fn retreat_from_unanswered_question_keeps_answers() {
        let mut s = started();
        s.submit("Hueso Parietal", t0()).unwrap();
        s.advance().unwrap();
        s.retreat().unwrap();
        assert_eq!(s.index(), 0);
        assert_eq!(s.answers().len(), 1);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn operations_after_completion_are_rejected() {
        let mut s = started();
        for _ in 0..3 {
            s.skip(t0()).unwrap();
            s.advance().unwrap();
        }
        assert_eq!(s.state(), SessionState::Completed);
        assert!(matches!(s.submit("x", t0()), Err(QuizError::NotInProgress { .. })));
        assert!(matches!(s.skip(t0()), Err(QuizError::NotInProgress { .. })));
        assert!(matches!(s.advance(), Err(QuizError::NotInProgress { .. })));
        assert!(matches!(s.retreat(), Err(QuizError::NotInProgress { .. })));
        assert_eq!(s.index(), 3);
        assert_eq!(s.answers().len(), 3);
    }

    #[test]
    fn running_percentage_counts_passed_questions_only() {
        let mut s = started();
        s.submit("Hueso Parietal", t0()).unwrap();
        assert_eq!(s.running_percentage(), 0);
        s.advance().unwrap();
        assert_eq!(s.running_percentage(), 100);
        s.submit("wrong", t0()).unwrap();
        s.advance().unwrap();
        assert_eq!(s.running_percentage(), 50);
    }

    #[test]
    fn tick_updates_elapsed_only() {
        let mut s = started();
        s.submit("Hueso Parietal", t0()).unwrap();
        assert_eq!(s.tick(t0() + Duration::milliseconds(61_500)), 61_500);
        assert_eq!(s.index(), 0);
        assert_eq!(s.score(), 1);
        assert_eq!(s.answers().len(), 1);
    }

    #[test]
    fn empty_question_set_is_rejected() {
        let mut s = Session::new();
        assert!(matches!(s.start(vec![], t0()), Err(QuizError::EmptyQuestionSet)));
        assert_eq!(s.state(), SessionState::NotStarted);
    }

    #[test]
    fn review_start_resets_and_flags_the_session() {
        let mut s = started();
        s.submit("wrong", t0()).unwrap();
        s.advance().unwrap();
        s.start_review(vec![question("Hueso Parietal")], t0() + Duration::seconds(30)).unwrap();
        assert!(s.is_reviewing());
        assert_eq!(s.len(), 1);
        assert_eq!(s.index(), 0);
        assert_eq!(s.score(), 0);
        assert!(s.answers().is_empty());
        assert_eq!(s.elapsed_ms(), 0);
    }
}
