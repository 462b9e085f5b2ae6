//! Ranking quality metrics

use jokerank_core::RelevanceMap;
use std::collections::{HashMap, HashSet};

/// qid -> ranked docids, best first
pub type PredictionMap = HashMap<String, Vec<String>>;

/// Average precision of one ranked list, cut off at `k`
///
/// Sums the precision at every rank holding a relevant docid and divides
/// by the size of the relevance set. Relevant documents that were never
/// retrieved count against the score. An empty relevance set yields 0.
pub fn average_precision(predictions: &[String], relevant: &HashSet<String>, k: usize) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }

    let mut hits = 0usize;
    let mut precision_sum = 0.0;
    for (i, docid) in predictions.iter().take(k).enumerate() {
        if relevant.contains(docid) {
            hits += 1;
            precision_sum += hits as f64 / (i + 1) as f64;
        }
    }
    precision_sum / relevant.len() as f64
}

/// Mean average precision at `k`
///
/// Averages over queries with a non-empty relevance set; queries without
/// one are excluded. A judged query missing from `predictions` contributes
/// an AP of 0. Returns 0 when no query qualifies.
///
/// # Example
///
/// ```
/// use jokerank_core::RelevanceMap;
/// use jokerank_eval::{map_at_k, PredictionMap};
///
/// let mut preds = PredictionMap::new();
/// preds.insert("q".into(), vec!["a".into(), "x".into(), "b".into()]);
/// let mut rel = RelevanceMap::new();
/// rel.insert("q".into(), ["a", "b", "c"].iter().map(|s| s.to_string()).collect());
///
/// // (1/1 + 2/3) / 3
/// assert!((map_at_k(&preds, &rel, 3) - 5.0 / 9.0).abs() < 1e-12);
/// ```
pub fn map_at_k(predictions: &PredictionMap, relevance: &RelevanceMap, k: usize) -> f64 {
    let mut total = 0.0;
    let mut counted = 0usize;
    for (qid, relevant) in relevance {
        if relevant.is_empty() {
            continue;
        }
        let ranked = predictions.get(qid).map(Vec::as_slice).unwrap_or(&[]);
        total += average_precision(ranked, relevant, k);
        counted += 1;
    }

    if counted == 0 {
        0.0
    } else {
        total / counted as f64
    }
}
