use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{error::Result, session::Session, stats::SessionSummary};

/// One answer as it appears in the exported report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnswer {
    #[serde(alias = "pregunta")]
    pub question: String,
    #[serde(alias = "respuestaUsuario")]
    pub user_answer: String,
    #[serde(alias = "correcta")]
    pub correct: bool,
    #[serde(alias = "saltada")]
    pub skipped: bool,
}

/// Downloadable snapshot of a session.
///
/// Written with English camelCase keys. Older reports with Spanish keys
/// (`fecha`, `totalPreguntas`, ...) are still accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsReport {
    #[serde(alias = "fecha")]
    pub date: DateTime<Utc>,
    #[serde(alias = "totalPreguntas")]
    pub total_questions: usize,
    #[serde(alias = "respuestasCorrectas")]
    pub correct_answers: usize,
    #[serde(alias = "respuestasIncorrectas")]
    pub incorrect_answers: usize,
    #[serde(alias = "preguntasSaltadas")]
    pub skipped_questions: usize,
    #[serde(alias = "porcentaje")]
    pub percentage: u32,
    /// `"correct/total"`.
    #[serde(alias = "nota")]
    pub grade: String,
    /// Elapsed time as `m:ss`.
    #[serde(alias = "tiempo")]
    pub time: String,
    #[serde(alias = "respuestas")]
    pub answers: Vec<ReportAnswer>,
}

impl ResultsReport {
    /// Pretty-printed JSON, the format handed to the download collaborator.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the report for `session` stamped with `now`.
pub fn export(session: &Session, now: DateTime<Utc>) -> ResultsReport {
    let summary = SessionSummary::from_session(session);
    ResultsReport {
        date: now,
        total_questions: summary.total,
        correct_answers: summary.correct,
        incorrect_answers: summary.incorrect,
        skipped_questions: summary.skipped,
        percentage: summary.percentage,
        grade: summary.grade,
        time: summary.time,
        answers: session
            .answers()
            .iter()
            .map(|a| ReportAnswer {
                question: a.question.name.clone(),
                user_answer: a.user_answer.clone(),
                correct: a.correct,
                skipped: a.skipped,
            })
            .collect(),
    }
}

/// File name for a report written on `date`, e.g. `anatomy-quiz-results-2024-03-09.json`.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("anatomy-quiz-results-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz_engine::models::{Question, SKIP_MARKER};
    use chrono::Duration;
    use serde_json::Value;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn question(name: &str) -> Question {
        Question {
            image: "images/torax.png".into(),
            system: "esqueletico".into(),
            region: "torax".into(),
            name: name.into(),
            x: 250.0,
            y: 400.0,
            width: 40.0,
            height: 180.0,
            hint: None,
        }
    }

    fn finished() -> Session {
        let mut s = Session::new();
        s.start(vec![question("Esternón"), question("Clavícula"), question("Costilla")], t0()).unwrap();
        s.submit("esternon", t0()).unwrap();
        s.advance().unwrap();
        s.submit("Escapula", t0()).unwrap();
        s.advance().unwrap();
        s.skip(t0()).unwrap();
        s.tick(t0() + Duration::seconds(75));
        s.advance().unwrap();
        s
    }

    #[test]
    fn export_reduces_answers_and_totals() {
        let report = export(&finished(), t0());
        assert_eq!(report.total_questions, 3);
        assert_eq!(report.correct_answers, 1);
        assert_eq!(report.incorrect_answers, 1);
        assert_eq!(report.skipped_questions, 1);
        assert_eq!(report.percentage, 33);
        assert_eq!(report.grade, "1/3");
        assert_eq!(report.time, "1:15");
        assert_eq!(
            report.answers[2],
            ReportAnswer {
                question: "Costilla".into(),
                user_answer: SKIP_MARKER.into(),
                correct: false,
                skipped: true,
            }
        );
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = export(&finished(), t0()).to_json_pretty().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totalQuestions"], 3);
        assert_eq!(value["skippedQuestions"], 1);
        assert_eq!(value["answers"][1]["userAnswer"], "Escapula");
        assert_eq!(value["answers"][0]["question"], "Esternón");
        assert_eq!(value["date"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn spanish_keyed_report_still_reads() {
        let json = r#"{
            "fecha": "2024-03-09T10:00:00.000Z",
            "totalPreguntas": 2,
            "respuestasCorrectas": 1,
            "respuestasIncorrectas": 0,
            "preguntasSaltadas": 1,
            "porcentaje": 50,
            "nota": "1/2",
            "tiempo": "0:42",
            "respuestas": [
                { "pregunta": "Húmero", "respuestaUsuario": "humero", "correcta": true, "saltada": false },
                { "pregunta": "Cúbito", "respuestaUsuario": "(skipped)", "correcta": false, "saltada": true }
            ]
        }"#;
        let report: ResultsReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.total_questions, 2);
        assert_eq!(report.skipped_questions, 1);
        assert_eq!(report.grade, "1/2");
        assert_eq!(report.time, "0:42");
        assert_eq!(report.answers[0].user_answer, "humero");
        assert!(report.answers[1].skipped);

        // Written back out with the English keys.
        let value: Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["correctAnswers"], 1);
        assert!(value.get("totalPreguntas").is_none());
    }

    #[test]
    fn file_name_carries_the_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(report_file_name(date), "anatomy-quiz-results-2024-03-09.json");
    }
}
