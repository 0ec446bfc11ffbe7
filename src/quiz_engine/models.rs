use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz_engine::session::SessionState;

/// Tag used when an image record carries no system or region.
pub const GENERAL_TAG: &str = "general";

/// Text stored as the user's answer when a question is skipped.
pub const SKIP_MARKER: &str = "(skipped)";

// ---------------------------------------------------------------------------
// Corpus records
// ---------------------------------------------------------------------------

/// A labeled region within one image, as it appears in the corpus file.
///
/// `x`/`y` are the *center* of the region in the image's natural pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(alias = "nombre")]
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// One image of the corpus together with its labeled parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(alias = "imagen")]
    pub image: String,
    #[serde(default, alias = "sistema", skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, alias = "partes")]
    pub parts: Vec<Part>,
}

impl ImageRecord {
    /// System tag, falling back to [`GENERAL_TAG`].
    pub fn system_tag(&self) -> &str {
        self.system.as_deref().unwrap_or(GENERAL_TAG)
    }

    /// Region tag, falling back to [`GENERAL_TAG`].
    pub fn region_tag(&self) -> &str {
        self.region.as_deref().unwrap_or(GENERAL_TAG)
    }
}

// ---------------------------------------------------------------------------
// Quiz types
// ---------------------------------------------------------------------------

/// A part bound into quiz context: the part itself plus its owning image tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub image: String,
    pub system: String,
    pub region: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Question {
    /// Flatten `part` of `record` into a question.
    pub fn from_part(record: &ImageRecord, part: &Part) -> Self {
        Question {
            image: record.image.clone(),
            system: record.system_tag().to_string(),
            region: record.region_tag().to_string(),
            name: part.name.clone(),
            x: part.x,
            y: part.y,
            width: part.width,
            height: part.height,
            hint: part.hint.clone(),
        }
    }

    /// Human-readable image label: the file name up to its first `.`, with
    /// `_` and `-` as spaces.
    ///
    /// `"images/sin_nombres/craneo-lateral_1.png"` → `"craneo lateral 1"`.
    pub fn image_label(&self) -> String {
        let file = Path::new(&self.image)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.image);
        let stem = file.split('.').next().unwrap_or(file);
        stem.replace(['_', '-'], " ")
    }
}

/// How the question universe is narrowed before sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Every part of every image.
    #[default]
    All,
    /// Parts of one randomly chosen system tag.
    System,
    /// Parts of one randomly chosen region tag.
    Region,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::All    => write!(f, "all"),
            SelectionMode::System => write!(f, "system"),
            SelectionMode::Region => write!(f, "region"),
        }
    }
}

/// Order in which suggestions are kept before truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionOrder {
    /// Highest similarity first; ties keep corpus order.
    #[default]
    Ranked,
    /// Corpus order: the first matches found are the ones shown.
    Discovery,
}

/// One graded or skipped question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: Question,
    /// Position of `question` in the session sequence.
    pub question_index: usize,
    pub user_answer: String,
    pub correct: bool,
    pub skipped: bool,
    /// Milliseconds since the session started.
    pub elapsed_ms: u64,
}

/// Verdict returned to the caller after a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: bool,
    pub correct_answer: String,
    /// Close corpus names, only filled in for a wrong answer.
    pub suggestions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Persisted records
// ---------------------------------------------------------------------------

/// Cumulative statistics across every completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Best percentage ever achieved (0..=100).
    pub best_score: u32,
    pub total_quizzes: u32,
    pub total_correct: u32,
    pub total_questions: u32,
}

/// Snapshot of the live session written after every graded or skipped answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub last_score: u32,
    pub total_questions: usize,
    pub date: DateTime<Utc>,
    pub state: SessionState,
    pub answers: Vec<AnswerRecord>,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Engine configuration.
///
/// Every field has a default, so a partial JSON object deserializes fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Requested questions per quiz; capped by what the corpus offers.
    pub question_count: usize,
    pub mode: SelectionMode,
    /// `Some` makes sampling reproducible; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
    pub suggestion_order: SuggestionOrder,
    /// A corpus name must score strictly above this to be suggested.
    pub suggestion_threshold: f64,
    pub max_suggestions: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: 20,
            mode: SelectionMode::All,
            rng_seed: None,
            suggestion_order: SuggestionOrder::Ranked,
            suggestion_threshold: 0.4,
            max_suggestions: 3,
        }
    }
}

impl QuizConfig {
    /// Defaults with a specific question count.
    pub fn new(question_count: usize) -> Self {
        Self { question_count, ..Self::default() }
    }
}
