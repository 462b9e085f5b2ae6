//! Tier 1: Ranking Correctness
//!
//! Signals combine as documented, results are ordered and truncated, and
//! the index statistics follow their formulas.

use super::test_utils::*;
use jokerank::{
    bm25_idf, gram_idf_value, Document, HybridParams, HybridRanker, LexicalIndex, NgramRange,
    NoProgress, QrelRow,
};

// ============================================================================
// Index Statistics
// ============================================================================

/// Corpus statistics match their closed forms
#[test]
fn test_tier1_index_statistics() {
    init_tracing();
    let docs = joke_corpus();
    let index = LexicalIndex::fit(&docs, None);

    assert_eq!(index.num_docs(), 8);
    let n = index.num_docs() as f64;
    let df = index.doc_freq("chicken") as f64;
    assert_eq!(df, 2.0);
    assert!((index.idf("chicken") - bm25_idf(n, df)).abs() < 1e-12);

    let gram_df = index.gram_doc_freq("chi") as f64;
    assert!((index.gram_idf("chi") - gram_idf_value(n, gram_df)).abs() < 1e-12);
}

/// Only positively judged documents receive the prior
#[test]
fn test_tier1_prior_from_positive_judgments() {
    let docs = joke_corpus();
    let qrels = joke_qrels();
    let index = LexicalIndex::fit(&docs, Some(&qrels));

    assert_eq!(index.prior("j1"), 1.0);
    assert_eq!(index.prior("j6"), 1.0);
    assert_eq!(index.prior("n1"), 0.0);
    assert_eq!(index.prior("unknown"), 0.0);
}

// ============================================================================
// Ranking
// ============================================================================

/// The two-document example ranks the matching document first
#[test]
fn test_tier1_two_document_example() {
    let docs = vec![
        Document::new("d1", "Why did the chicken cross the road"),
        Document::new("d2", "Time flies like an arrow"),
    ];
    let qrels = vec![QrelRow::new("q", "d1", 1)];
    let index = LexicalIndex::fit(&docs, Some(&qrels));
    let ranked = HybridRanker::new(&index, HybridParams::default()).rank("chicken road", 10);

    assert_eq!(ranked[0].docid, "d1");
    assert!(ranked[0].score > 0.0);
}

/// A document sharing no signal with the query is dropped, not ranked last
#[test]
fn test_tier1_unrelated_document_excluded() {
    let docs = vec![
        Document::new("d1", "cats are funny"),
        Document::new("d2", "dogs are serious"),
    ];
    let index = LexicalIndex::fit(&docs, None);
    let ranker = HybridRanker::new(&index, HybridParams::default());
    let ranked = ranker.rank("funny cats", 10);

    assert_eq!(docids(&ranked), vec!["d1"]);
    assert!(ranked[0].score > 0.0);
    assert_eq!(ranker.explain("funny cats", "d2").map(|b| b.total), Some(0.0));
}

/// Query terms found in two documents rank both above the rest
#[test]
fn test_tier1_shared_term_ranks_both() {
    init_tracing();
    let docs = joke_corpus();
    let index = LexicalIndex::fit(&docs, None);
    let ranked = HybridRanker::new(&index, HybridParams::default()).rank("chicken", 2);

    let mut top = docids(&ranked);
    top.sort();
    assert_eq!(top, vec!["j1", "j7"]);
}

/// An empty query against an index without priors ranks nothing
#[test]
fn test_tier1_empty_query() {
    let docs = joke_corpus();
    let index = LexicalIndex::fit(&docs, None);
    let ranker = HybridRanker::new(&index, HybridParams::default());
    assert!(ranker.rank("", 100).is_empty());
}

/// Zero weights on every signal rank nothing
#[test]
fn test_tier1_zero_weights() {
    let docs = joke_corpus();
    let index = LexicalIndex::fit(&docs, Some(&joke_qrels()));
    let params = HybridParams::default()
        .with_bm25_weight(0.0)
        .with_char_weight(0.0)
        .with_humor_weight(0.0)
        .with_match_boost(0.0);
    assert!(HybridRanker::new(&index, params).rank("chicken", 10).is_empty());
}

/// The exact-match boost alone can order otherwise tied documents
#[test]
fn test_tier1_exact_match_only() {
    let docs = joke_corpus();
    let index = LexicalIndex::fit(&docs, None);
    let params = HybridParams::default()
        .with_bm25_weight(0.0)
        .with_char_weight(0.0)
        .with_humor_weight(0.0)
        .with_match_boost(1.0);
    let ranked = HybridRanker::new(&index, params).rank("the chicken", 10);

    assert_eq!(docids(&ranked), vec!["j1", "j7"]);
    assert!(ranked.iter().all(|d| d.score == 1.0));
}

/// explain() agrees with the ranked score of every returned document
#[test]
fn test_tier1_explain_matches_rank() {
    let docs = joke_corpus();
    let index = LexicalIndex::fit(&docs, Some(&joke_qrels()));
    let ranker = HybridRanker::new(&index, HybridParams::default());

    for hit in ranker.rank("why chicken", 10) {
        let breakdown = ranker.explain("why chicken", &hit.docid).unwrap();
        assert_eq!(breakdown.total, hit.score);
    }
}

/// A smaller n-gram range changes cosine scores but not BM25
#[test]
fn test_tier1_custom_ngram_range() {
    let docs = joke_corpus();
    let default_index = LexicalIndex::fit(&docs, None);
    let bigram_index = LexicalIndex::fit_with(&docs, None, NgramRange::new(2, 2), &NoProgress);

    let a = HybridRanker::new(&default_index, HybridParams::default());
    let b = HybridRanker::new(&bigram_index, HybridParams::default());
    let tokens = jokerank::tokenize("chicken");

    assert_eq!(a.bm25(&tokens, "j1"), b.bm25(&tokens, "j1"));
    assert_ne!(a.char_cosine("chicken", "j1"), b.char_cosine("chicken", "j1"));
}
