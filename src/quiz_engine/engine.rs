use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::quiz_engine::{
    bank::QuestionBank,
    clock::Clock,
    corpus::Corpus,
    error::{QuizError, Result},
    models::{Feedback, Progress, QuizConfig, Statistics},
    overlay::{highlight_rect, HighlightRect, Size},
    report::{self, ResultsReport},
    session::{Session, SessionState},
    similarity::suggestions,
    stats::{record_completion, SessionSummary},
    storage::{KeyValueStore, MemoryStore, QuizStore},
};

/// Owns the corpus, the live [`Session`] and the persisted statistics, and
/// routes every learner action through them.
///
/// Persistence failures are logged and never undo or reject a quiz action.
pub struct QuizEngine<S: KeyValueStore = MemoryStore> {
    corpus: Corpus,
    bank: QuestionBank,
    config: QuizConfig,
    rng: StdRng,
    clock: Clock,
    store: QuizStore<S>,
    statistics: Statistics,
    session: Session,
}

impl<S: KeyValueStore> QuizEngine<S> {
    /// Build an engine over `corpus`; statistics are read from `store` once, here.
    pub fn new(corpus: Corpus, config: QuizConfig, store: S) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let store = QuizStore::new(store);
        let statistics = store.load_statistics();
        let bank = QuestionBank::from_corpus(&corpus);
        info!(
            "quiz engine ready: {} images, {} questions, best score {}%",
            corpus.image_count(),
            bank.len(),
            statistics.best_score
        );
        QuizEngine {
            corpus,
            bank,
            config,
            rng,
            clock: Clock::default(),
            store,
            statistics,
            session: Session::new(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Change question count, mode or suggestion settings for later quizzes.
    ///
    /// The RNG keeps its stream; `rng_seed` only matters at construction.
    pub fn config_mut(&mut self) -> &mut QuizConfig {
        &mut self.config
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn store(&self) -> &QuizStore<S> {
        &self.store
    }

    /// Sample a new question set and start a session over it.
    ///
    /// Returns the session length. On failure the current session is untouched.
    pub fn start_quiz(&mut self) -> Result<usize> {
        let questions = self
            .bank
            .sample(self.config.mode, self.config.question_count, &mut self.rng)?;
        self.session.start(questions, self.clock.now())?;
        info!(
            "quiz started: {} questions (requested {}, mode {})",
            self.session.len(),
            self.config.question_count,
            self.config.mode
        );
        Ok(self.session.len())
    }

    /// Start a session over the wrong answers of the completed one.
    pub fn review_mistakes(&mut self) -> Result<usize> {
        if self.session.state() != SessionState::Completed {
            return Err(QuizError::NotCompleted { state: self.session.state() });
        }
        let mistakes = self.session.mistakes();
        if mistakes.is_empty() {
            return Err(QuizError::NoMistakes);
        }
        self.session.start_review(mistakes, self.clock.now())?;
        info!("reviewing {} mistakes", self.session.len());
        Ok(self.session.len())
    }

    /// Grade `text` against the current question.
    ///
    /// A wrong answer comes back with close corpus names as suggestions.
    pub fn submit(&mut self, text: &str) -> Result<Feedback> {
        let correct = self.session.submit(text, self.clock.now())?;
        let correct_answer = self
            .session
            .answers()
            .last()
            .map(|a| a.question.name.clone())
            .unwrap_or_default();

        let suggestions = if correct {
            Vec::new()
        } else {
            suggestions(
                &correct_answer,
                self.corpus.part_names(),
                self.config.suggestion_order,
                self.config.suggestion_threshold,
                self.config.max_suggestions,
            )
            .into_iter()
            .map(|s| s.name)
            .collect()
        };

        self.persist_progress();
        Ok(Feedback { correct, correct_answer, suggestions })
    }

    pub fn skip(&mut self) -> Result<()> {
        self.session.skip(self.clock.now())?;
        self.persist_progress();
        Ok(())
    }

    /// Move forward. Returns the summary when this completes the session.
    pub fn next(&mut self) -> Result<Option<SessionSummary>> {
        self.session.tick(self.clock.now());
        if self.session.advance()? != SessionState::Completed {
            return Ok(None);
        }

        self.statistics = record_completion(&self.session, &self.statistics);
        if let Err(e) = self.store.save_statistics(&self.statistics) {
            warn!("could not save statistics: {e}");
        }
        let summary = SessionSummary::from_session(&self.session);
        info!(
            "quiz finished: {} in {} (best {}%)",
            summary.grade, summary.time, self.statistics.best_score
        );
        Ok(Some(summary))
    }

    pub fn previous(&mut self) -> Result<()> {
        self.session.retreat()
    }

    /// Timer tick: refresh elapsed milliseconds for display.
    pub fn tick(&mut self) -> u64 {
        self.session.tick(self.clock.now())
    }

    /// Summary of the session once it is completed.
    pub fn summary(&self) -> Option<SessionSummary> {
        match self.session.state() {
            SessionState::Completed => Some(SessionSummary::from_session(&self.session)),
            _ => None,
        }
    }

    pub fn export_results(&self) -> ResultsReport {
        report::export(&self.session, self.clock.now())
    }

    pub fn report_file_name(&self) -> String {
        report::report_file_name(self.clock.now().date_naive())
    }

    /// Rectangle to draw over the current question's image.
    pub fn highlight(&self, natural: Size, display: Size) -> Option<HighlightRect> {
        self.session
            .current_question()
            .and_then(|q| highlight_rect(q, natural, display))
    }

    /// True on the first question of a session until the tutorial is dismissed.
    pub fn should_show_tutorial(&self) -> bool {
        self.session.state() == SessionState::InProgress
            && self.session.index() == 0
            && !self.store.tutorial_shown()
    }

    pub fn mark_tutorial_shown(&mut self) {
        if let Err(e) = self.store.mark_tutorial_shown() {
            warn!("could not save tutorial flag: {e}");
        }
    }

    /// Forget saved progress, statistics and the tutorial flag.
    pub fn clear_storage(&mut self) -> Result<()> {
        self.store.clear_all()?;
        self.statistics = self.store.load_statistics();
        info!("saved progress cleared");
        Ok(())
    }

    fn persist_progress(&mut self) {
        let progress = Progress {
            last_score: self.session.score(),
            total_questions: self.session.len(),
            date: self.clock.now(),
            state: self.session.state(),
            answers: self.session.answers().to_vec(),
        };
        if let Err(e) = self.store.save_progress(&progress) {
            warn!("could not save progress: {e}");
        }
    }
}
