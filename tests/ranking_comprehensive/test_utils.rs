//! Test utilities for the ranking comprehensive tests

use jokerank::{Document, QrelRow, QueryRow};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// A small humor collection with one off-topic document
pub fn joke_corpus() -> Vec<Document> {
    vec![
        Document::new("j1", "Why did the chicken cross the road? To get to the other side."),
        Document::new("j2", "I told my wife she was drawing her eyebrows too high. She looked surprised."),
        Document::new("j3", "I'm reading a book on anti-gravity. It's impossible to put down."),
        Document::new("j4", "Parallel lines have so much in common. It's a shame they'll never meet."),
        Document::new("j5", "Why don't scientists trust atoms? Because they make up everything."),
        Document::new("j6", "I used to be a banker, but I lost interest."),
        Document::new("j7", "The chicken and the egg walked into a bar."),
        Document::new("n1", "Quarterly logistics report for the northern region."),
    ]
}

/// Queries matching the corpus
pub fn joke_queries() -> Vec<QueryRow> {
    vec![
        QueryRow::new("q1", "chicken road"),
        QueryRow::new("q2", "eyebrows"),
        QueryRow::new("q3", "anti-gravity book"),
        QueryRow::new("q4", "parallel lines"),
        QueryRow::new("q5", "atoms"),
        QueryRow::new("q6", "banker interest"),
    ]
}

/// Judgments for `joke_queries`
pub fn joke_qrels() -> Vec<QrelRow> {
    vec![
        QrelRow::new("q1", "j1", 1),
        QrelRow::new("q1", "j7", 1),
        QrelRow::new("q2", "j2", 1),
        QrelRow::new("q3", "j3", 1),
        QrelRow::new("q4", "j4", 1),
        QrelRow::new("q5", "j5", 1),
        QrelRow::new("q6", "j6", 1),
        QrelRow::new("q6", "n1", 0),
    ]
}

/// Docids of a ranked list
pub fn docids(ranked: &[jokerank::RetrievedDoc]) -> Vec<&str> {
    ranked.iter().map(|d| d.docid.as_str()).collect()
}
