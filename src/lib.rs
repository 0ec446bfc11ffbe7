//! # anatomy_quiz
//!
//! An offline, deterministic engine for image identification quizzes.
//!
//! A learner is shown an image with a highlighted region and types the name of
//! that region. This crate owns everything except the drawing: it samples
//! questions from a labeled corpus, walks the learner through a session,
//! grades free-text answers, suggests close names after a miss, and keeps
//! cumulative statistics.
//!
//! ## How it works
//!
//! 1. Load a [`Corpus`] (a JSON array of images with labeled parts). If it
//!    cannot be read, [`Corpus::load_or_sample`] falls back to a one-part sample.
//! 2. Build a [`QuizEngine`] with a [`QuizConfig`] and a [`KeyValueStore`]
//!    for persistence.
//! 3. Call [`QuizEngine::start_quiz`], then `submit` / `skip` / `next` /
//!    `previous` as the learner acts. The last `next` returns a
//!    [`SessionSummary`] and folds the result into the saved [`Statistics`].
//! 4. [`QuizEngine::export_results`] gives a [`ResultsReport`] ready to be
//!    written as JSON.
//!
//! ## Key features
//!
//! - **Deterministic**: `rng_seed: Some(u64)` reproduces the same question
//!   order; a fixed [`Clock`] makes timing reproducible too.
//! - **Forgiving grading**: case, accents, punctuation and extra spaces are
//!   ignored, but the name itself must match exactly.
//! - **Suggestions**: a wrong answer lists up to three corpus names whose
//!   similarity to the right one is above 0.4, closest first.
//!
//! ## Quick start
//!
//! ```rust
//! use anatomy_quiz::{Corpus, MemoryStore, QuizConfig, QuizEngine};
//!
//! let config = QuizConfig { rng_seed: Some(42), ..QuizConfig::new(10) };
//! let mut engine = QuizEngine::new(Corpus::sample(), config, MemoryStore::new());
//!
//! // The sample corpus has a single part, so the quiz is capped at one question.
//! assert_eq!(engine.start_quiz().unwrap(), 1);
//!
//! let feedback = engine.submit("hueso parietal").unwrap();
//! assert!(feedback.correct);
//!
//! let summary = engine.next().unwrap().expect("last question completes the quiz");
//! assert_eq!(summary.grade, "1/1");
//! assert_eq!(engine.statistics().best_score, 100);
//! ```

pub mod quiz_engine;

// Convenience re-exports so callers can use `anatomy_quiz::QuizEngine`
// directly without reaching into `quiz_engine::`.
pub use quiz_engine::{
    edit_distance, export, highlight_rect, normalize, record_completion, report_file_name,
    similarity, suggestions, AnswerRecord, Clock, Corpus, Feedback, FileStore, HighlightRect,
    ImageRecord, KeyValueStore, MemoryStore, Part, Progress, Question, QuestionBank, QuizConfig,
    QuizEngine, QuizError, QuizStore, ReportAnswer, Result, ResultsReport, SelectionMode, Session,
    SessionState, SessionSummary, Size, Statistics, Suggestion, SuggestionOrder,
};
