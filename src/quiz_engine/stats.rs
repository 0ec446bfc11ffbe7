//! Session outcome metrics and the cumulative statistics they feed.

use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    helpers::{format_elapsed, questions_per_minute, round_percent},
    models::Statistics,
    session::Session,
};

/// Metrics shown once a session is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total: usize,
    pub correct: usize,
    /// Wrong answers, skips excluded.
    pub incorrect: usize,
    pub skipped: usize,
    /// Correct answers over all questions of the session.
    pub percentage: u32,
    /// Correct answers over graded, non-skipped answers.
    pub accuracy_rate: u32,
    pub questions_per_minute: String,
    /// `"correct/total"`.
    pub grade: String,
    /// Elapsed time as `m:ss`.
    pub time: String,
}

impl SessionSummary {
    pub fn from_session(session: &Session) -> Self {
        let answers = session.answers();
        let correct = answers.iter().filter(|a| a.correct).count();
        let incorrect = answers.iter().filter(|a| !a.correct && !a.skipped).count();
        let skipped = answers.iter().filter(|a| a.skipped).count();
        let total = session.len();

        SessionSummary {
            total,
            correct,
            incorrect,
            skipped,
            percentage: round_percent(correct, total),
            accuracy_rate: round_percent(correct, correct + incorrect),
            questions_per_minute: questions_per_minute(total, session.elapsed_ms()),
            grade: format!("{correct}/{total}"),
            time: format_elapsed(session.elapsed_ms()),
        }
    }
}

/// Fold a finished session into `prior`.
pub fn record_completion(session: &Session, prior: &Statistics) -> Statistics {
    let percentage = SessionSummary::from_session(session).percentage;
    Statistics {
        best_score: prior.best_score.max(percentage),
        total_quizzes: prior.total_quizzes + 1,
        total_correct: prior.total_correct + session.score(),
        total_questions: prior.total_questions + session.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz_engine::models::Question;
    use chrono::{DateTime, Duration, Utc};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn question(name: &str) -> Question {
        Question {
            image: "img.png".into(),
            system: "general".into(),
            region: "general".into(),
            name: name.into(),
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            hint: None,
        }
    }

    /// Play a session where `outcomes[i]` is `Some(true)` correct,
    /// `Some(false)` wrong, `None` skipped.
    fn played(outcomes: &[Option<bool>], elapsed: Duration) -> Session {
        let questions: Vec<Question> = (0..outcomes.len()).map(|i| question(&format!("part {i}"))).collect();
        let mut s = Session::new();
        s.start(questions, t0()).unwrap();
        for (i, outcome) in outcomes.iter().enumerate() {
            match outcome {
                Some(true) => assert!(s.submit(&format!("Part {i}"), t0()).unwrap()),
                Some(false) => assert!(!s.submit("wrong", t0()).unwrap()),
                None => s.skip(t0()).unwrap(),
            }
            s.tick(t0() + elapsed);
            s.advance().unwrap();
        }
        s
    }

    #[test]
    fn summary_counts_and_rates() {
        let s = played(&[Some(true), Some(true), Some(false), None], Duration::seconds(120));
        let summary = SessionSummary::from_session(&s);
        assert_eq!(
            summary,
            SessionSummary {
                total: 4,
                correct: 2,
                incorrect: 1,
                skipped: 1,
                percentage: 50,
                accuracy_rate: 67,
                questions_per_minute: "2.0".into(),
                grade: "2/4".into(),
                time: "2:00".into(),
            }
        );
    }

    #[test]
    fn accuracy_is_zero_when_everything_was_skipped() {
        let s = played(&[None, None], Duration::seconds(5));
        let summary = SessionSummary::from_session(&s);
        assert_eq!(summary.accuracy_rate, 0);
        assert_eq!(summary.percentage, 0);
        assert_eq!(summary.skipped, 2);
    }

    #[test]
    fn completion_tracks_best_and_totals() {
        let first = played(&[Some(true), Some(false), Some(false), Some(false)], Duration::seconds(10));
        let second = played(&[Some(true), Some(true), Some(true), Some(false)], Duration::seconds(10));

        let after_one = record_completion(&first, &Statistics::default());
        let after_two = record_completion(&second, &after_one);

        assert_eq!(after_one.best_score, 25);
        assert_eq!(
            after_two,
            Statistics { best_score: 75, total_quizzes: 2, total_correct: 4, total_questions: 8 }
        );
    }

    #[test]
    fn worse_session_keeps_previous_best() {
        let prior = Statistics { best_score: 90, total_quizzes: 3, total_correct: 20, total_questions: 30 };
        let s = played(&[Some(false), Some(true)], Duration::seconds(10));
        let next = record_completion(&s, &prior);
        assert_eq!(next.best_score, 90);
        assert_eq!(next.total_quizzes, 4);
        assert_eq!(next.total_correct, 21);
        assert_eq!(next.total_questions, 32);
    }
}
