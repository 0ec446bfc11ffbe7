use log::debug;
use rand::Rng;

use crate::quiz_engine::{
    corpus::Corpus,
    error::{QuizError, Result},
    models::{Question, SelectionMode},
};

/// Every part of the corpus flattened into a question, in corpus order.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Flatten every part of every image, tagged with its image's system and region.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let questions = corpus
            .images()
            .iter()
            .flat_map(|record| record.parts.iter().map(move |part| Question::from_part(record, part)))
            .collect();
        QuestionBank { questions }
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

    /// Distinct system tags in first-seen order.
    pub fn systems(&self) -> Vec<&str> {
        distinct(self.questions.iter().map(|q| q.system.as_str()))
    }

    /// Distinct region tags in first-seen order.
    pub fn regions(&self) -> Vec<&str> {
        distinct(self.questions.iter().map(|q| q.region.as_str()))
    }

    /// Draw up to `count` distinct questions under `mode`.
    ///
    /// `System` and `Region` first pick one tag uniformly at random and keep
    /// only its questions. The survivors are shuffled and the first
    /// `min(count, survivors)` returned.
    pub fn sample<R: Rng>(&self, mode: SelectionMode, count: usize, rng: &mut R) -> Result<Vec<Question>> {
        let mut pool: Vec<&Question> = match mode {
            SelectionMode::All => self.questions.iter().collect(),
            SelectionMode::System => match pick(&self.systems(), rng) {
                Some(tag) => self.questions.iter().filter(|q| q.system == tag).collect(),
                None => Vec::new(),
            },
            SelectionMode::Region => match pick(&self.regions(), rng) {
                Some(tag) => self.questions.iter().filter(|q| q.region == tag).collect(),
                None => Vec::new(),
            },
        };

        let take = count.min(pool.len());
        if take == 0 {
            return Err(QuizError::NoQuestions { mode });
        }

        shuffle(&mut pool, rng);
        debug!("sampled {take} of {} questions (mode {mode})", pool.len());
        Ok(pool.into_iter().take(take).cloned().collect())
    }
}

fn distinct<'a>(tags: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

fn pick<'a, R: Rng>(tags: &[&'a str], rng: &mut R) -> Option<&'a str> {
    if tags.is_empty() {
        return None;
    }
    Some(tags[rng.gen_range(0..tags.len())])
}

/// Fisher-Yates shuffle.
fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
