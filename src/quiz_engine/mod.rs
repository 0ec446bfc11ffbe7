//! Core quiz engine: question sampling, session flow, answer grading and scoring.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: corpus records, questions, answers, statistics, config |
//! | `corpus`     | Corpus loading with the built-in fallback sample |
//! | `normalizer` | Canonical text form used for grading |
//! | `similarity` | Edit distance, similarity score and "did you mean" suggestions |
//! | `bank`       | Flattened question universe and seeded sampling |
//! | `session`    | The session state machine |
//! | `stats`      | Session summary metrics and cumulative statistics |
//! | `report`     | Exported results report |
//! | `storage`    | Key-value persistence of progress, statistics and the tutorial flag |
//! | `overlay`    | Highlight rectangle for the rendering collaborator |
//! | `clock`      | Injectable time source |
//! | `helpers`    | Percent, pace and elapsed-time formatting |
//! | `engine`     | `QuizEngine`, the facade tying everything together |

pub mod bank;
pub mod clock;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod helpers;
pub mod models;
pub mod normalizer;
pub mod overlay;
pub mod report;
pub mod session;
pub mod similarity;
pub mod stats;
pub mod storage;

// Re-export the public API surface so callers can use
// `quiz_engine::QuizEngine` without reaching into sub-modules.
pub use bank::QuestionBank;
pub use clock::Clock;
pub use corpus::Corpus;
pub use engine::QuizEngine;
pub use error::{QuizError, Result};
pub use models::{
    AnswerRecord, Feedback, ImageRecord, Part, Progress, Question, QuizConfig,
    SelectionMode, Statistics, SuggestionOrder,
};
pub use normalizer::normalize;
pub use overlay::{highlight_rect, HighlightRect, Size};
pub use report::{export, report_file_name, ReportAnswer, ResultsReport};
pub use session::{Session, SessionState};
pub use similarity::{edit_distance, similarity, suggestions, Suggestion};
pub use stats::{record_completion, SessionSummary};
pub use storage::{FileStore, KeyValueStore, MemoryStore, QuizStore};
