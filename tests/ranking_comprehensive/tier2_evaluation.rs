//! Tier 2: Evaluation
//!
//! MAP@K over rankings and over submission rows.

use super::test_utils::*;
use jokerank::{
    evaluate_predictions, map_at_k, predictions_from_rankings, ranked_docids, to_qrel_map,
    HybridParams, HybridRanker, LexicalIndex, NoProgress, PredictionMap, RelevanceMap,
};
use std::collections::HashSet;

/// MAP@3 with the only relevant document at rank 2
#[test]
fn test_tier2_map_at_3_first_hit_at_rank_two() {
    let mut preds = PredictionMap::new();
    preds.insert("q1".into(), vec!["d1".into(), "d2".into(), "d3".into()]);
    let mut rel = RelevanceMap::new();
    rel.insert("q1".into(), HashSet::from(["d2".to_string()]));

    assert!((map_at_k(&preds, &rel, 3) - 0.5).abs() < 1e-12);
}

/// MAP@3 with one of two relevant documents found at rank 1
#[test]
fn test_tier2_map_at_3_example() {
    let mut preds = PredictionMap::new();
    preds.insert("q".into(), vec!["d1".into(), "d2".into(), "d3".into()]);
    let mut rel = RelevanceMap::new();
    rel.insert("q".into(), HashSet::from(["d1".to_string(), "d4".to_string()]));

    assert!((map_at_k(&preds, &rel, 3) - 0.5).abs() < 1e-12);
}

/// A perfect ranker scores 1.0
#[test]
fn test_tier2_oracle_scores_one() {
    let qrels = joke_qrels();
    let rel = to_qrel_map(&qrels);
    let preds: PredictionMap = rel
        .iter()
        .map(|(qid, docs)| {
            let mut ranked: Vec<String> = docs.iter().cloned().collect();
            ranked.sort();
            (qid.clone(), ranked)
        })
        .collect();

    assert!((map_at_k(&preds, &rel, 1000) - 1.0).abs() < 1e-12);
}

/// MAP computed from rows equals MAP computed from the rankings
#[test]
fn test_tier2_rows_and_rankings_agree() {
    init_tracing();
    let docs = joke_corpus();
    let queries = joke_queries();
    let qrels = joke_qrels();
    let index = LexicalIndex::fit(&docs, None);
    let rankings =
        HybridRanker::new(&index, HybridParams::default()).rank_queries(&queries, 5, &NoProgress);

    let rows = predictions_from_rankings("run", 0, &queries, &rankings);
    let from_rows = evaluate_predictions(&rows, &qrels, 5);
    let from_rankings = map_at_k(&ranked_docids(&rankings), &to_qrel_map(&qrels), 5);

    assert_eq!(from_rows, from_rankings);
    assert!(from_rows > 0.5);
}

/// Shrinking k never raises MAP for the same rankings
#[test]
fn test_tier2_map_monotone_in_k() {
    let docs = joke_corpus();
    let queries = joke_queries();
    let rel = to_qrel_map(&joke_qrels());
    let index = LexicalIndex::fit(&docs, None);
    let rankings =
        HybridRanker::new(&index, HybridParams::default()).rank_queries(&queries, 100, &NoProgress);
    let preds = ranked_docids(&rankings);

    let mut previous = 0.0;
    for k in 1..=8 {
        let map = map_at_k(&preds, &rel, k);
        assert!(map >= previous);
        previous = map;
    }
}

/// Every submission row has a normalized, rounded score and a 1-based rank
#[test]
fn test_tier2_row_shape() {
    let docs = joke_corpus();
    let queries = joke_queries();
    let index = LexicalIndex::fit(&docs, Some(&joke_qrels()));
    let rankings =
        HybridRanker::new(&index, HybridParams::default()).rank_queries(&queries, 10, &NoProgress);
    let rows = predictions_from_rankings("run", 1, &queries, &rankings);

    for row in &rows {
        assert!((0.0..=1.0).contains(&row.score));
        assert_eq!(row.score, (row.score * 1e6).round() / 1e6);
        assert!(row.rank >= 1);
    }
    let first_per_query: Vec<_> = rows.iter().filter(|r| r.rank == 1).collect();
    assert!(first_per_query.iter().all(|r| r.score == 1.0));
}
