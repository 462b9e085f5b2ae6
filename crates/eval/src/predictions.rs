//! Submission rows
//!
//! Ranked lists become `PredictionRow`s with normalized, rounded scores and
//! 1-based ranks. Rows read back from a submission regroup by qid for
//! scoring.

use crate::metrics::{map_at_k, PredictionMap};
use jokerank_core::{to_qrel_map, PredictionRow, QrelRow, QueryRow, Rankings};
use jokerank_search::normalize_scores;
use tracing::info;

/// Decimal places kept in submitted scores
const SCORE_DECIMALS: usize = 6;

/// Round to `SCORE_DECIMALS` places
///
/// Formatting rounds the exact binary value with ties to even, so no
/// error creeps in from scaling before the round.
fn round_score(score: f64) -> f64 {
    format!("{:.*}", SCORE_DECIMALS, score)
        .parse()
        .unwrap_or(score)
}

/// Build submission rows from per-query rankings
///
/// Queries are visited in input order. Each ranking is min-max normalized
/// before its rows are emitted. A query with no ranking emits nothing; a
/// qid listed twice emits its ranking twice.
pub fn predictions_from_rankings(
    run_id: &str,
    manual: u8,
    queries: &[QueryRow],
    rankings: &Rankings,
) -> Vec<PredictionRow> {
    let mut out = Vec::new();
    for query in queries {
        let Some(ranked) = rankings.get(&query.qid) else {
            continue;
        };
        for (i, doc) in normalize_scores(ranked).into_iter().enumerate() {
            out.push(PredictionRow {
                run_id: run_id.to_string(),
                manual,
                qid: query.qid.clone(),
                docid: doc.docid,
                rank: i + 1,
                score: round_score(doc.score),
            });
        }
    }
    out
}

/// Group submitted docids by qid, keeping row order within each query
pub fn predictions_by_query(rows: &[PredictionRow]) -> PredictionMap {
    let mut grouped = PredictionMap::new();
    for row in rows {
        grouped
            .entry(row.qid.clone())
            .or_default()
            .push(row.docid.clone());
    }
    grouped
}

/// Docid lists of in-memory rankings, for scoring without building rows
pub fn ranked_docids(rankings: &Rankings) -> PredictionMap {
    rankings
        .iter()
        .map(|(qid, ranked)| {
            (
                qid.clone(),
                ranked.iter().map(|d| d.docid.clone()).collect(),
            )
        })
        .collect()
}

/// MAP@k of submission rows against judgment rows
pub fn evaluate_predictions(rows: &[PredictionRow], qrels: &[QrelRow], k: usize) -> f64 {
    let relevance = to_qrel_map(qrels);
    let score = map_at_k(&predictions_by_query(rows), &relevance, k);
    info!(
        target: "jokerank::eval",
        rows = rows.len(),
        judged_queries = relevance.len(),
        k,
        map = score,
        "Evaluated predictions"
    );
    score
}
