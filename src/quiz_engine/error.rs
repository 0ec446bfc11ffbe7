//! Error types for the quiz engine.
//!
//! Every variant is a rejected operation: the session that produced it is left
//! exactly as it was before the call.

use thiserror::Error;

use crate::quiz_engine::models::SelectionMode;
use crate::quiz_engine::session::SessionState;

/// Result type alias using [`QuizError`].
pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("answer is empty")]
    EmptyAnswer,

    #[error("no questions available for mode '{mode}'")]
    NoQuestions { mode: SelectionMode },

    #[error("cannot start a session without questions")]
    EmptyQuestionSet,

    #[error("no mistakes to review")]
    NoMistakes,

    #[error("quiz is not in progress (state: {state})")]
    NotInProgress { state: SessionState },

    #[error("quiz is not completed (state: {state})")]
    NotCompleted { state: SessionState },

    #[error("question {index} has already been answered")]
    AlreadyAnswered { index: usize },

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
