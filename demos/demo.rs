//! Scripted end-to-end quiz.
//!
//! Run with: `cargo run --example demo [path/to/data.json]`
//!
//! Set `RUST_LOG=debug` to see the engine's own log lines.
//!
//! This example shows how `anatomy_quiz` works end to end:
//!
//! 1. **Corpus**: the given file is loaded; without one (or if it cannot be
//!    read) the engine falls back to its built-in one-part sample.
//! 2. **Session**: a seeded quiz is played with a scripted learner who gets
//!    every other answer wrong and skips the last question, so the output is
//!    reproducible.
//! 3. **Summary and report**: the completion metrics, the cumulative
//!    statistics and the exported JSON report are printed.

use anatomy_quiz::{Corpus, MemoryStore, QuizConfig, QuizEngine, Size};

fn main() -> anatomy_quiz::Result<()> {
    env_logger::init();

    let corpus = match std::env::args().nth(1) {
        Some(path) => Corpus::load_or_sample(path),
        None => Corpus::sample(),
    };
    println!("Corpus: {} images, {} parts", corpus.image_count(), corpus.part_count());

    let config = QuizConfig { rng_seed: Some(2024), ..QuizConfig::new(5) };
    let mut engine = QuizEngine::new(corpus, config, MemoryStore::new());
    let total = engine.start_quiz()?;

    for i in 0..total {
        let question = match engine.session().current_question() {
            Some(q) => q.clone(),
            None => break,
        };
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("  Question {}/{}  Image: {}", i + 1, total, question.image_label());
        if let Some(hint) = &question.hint {
            println!("  Hint: {hint}");
        }
        let natural = Size::new(1000.0, 800.0);
        if let Some(rect) = engine.highlight(natural, Size::new(500.0, 400.0)) {
            println!(
                "  Highlight: {:.1},{:.1} {:.1}x{:.1}",
                rect.x, rect.y, rect.width, rect.height
            );
        }

        if i + 1 == total && total > 1 {
            engine.skip()?;
            println!("  (skipped)");
        } else {
            let typed = if i % 2 == 0 { question.name.to_lowercase() } else { "no lo sé".to_string() };
            let feedback = engine.submit(&typed)?;
            let mark = if feedback.correct { "✓" } else { "✗" };
            println!("  [{mark}] typed {typed:?}, answer {:?}", feedback.correct_answer);
            if !feedback.suggestions.is_empty() {
                println!("      did you mean: {}", feedback.suggestions.join(", "));
            }
        }

        if let Some(summary) = engine.next()? {
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!(
                "  Grade {}  ({}%)  accuracy {}%  pace {} q/min  time {}",
                summary.grade,
                summary.percentage,
                summary.accuracy_rate,
                summary.questions_per_minute,
                summary.time
            );
        }
    }

    let stats = engine.statistics();
    println!(
        "  Best {}%  quizzes {}  correct {}/{}",
        stats.best_score, stats.total_quizzes, stats.total_correct, stats.total_questions
    );

    println!();
    println!("{}:", engine.report_file_name());
    println!("{}", engine.export_results().to_json_pretty()?);
    Ok(())
}
