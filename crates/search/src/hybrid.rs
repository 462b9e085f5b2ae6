//! Hybrid lexical ranker
//!
//! This module provides:
//! - HybridRanker: linear blend of BM25, character n-gram cosine, the
//!   relevance prior and an exact-substring boost
//! - ScoreBreakdown: per-signal view of one document's score
//!
//! # Determinism
//!
//! Ranking is a full linear scan in arena order followed by a stable sort,
//! so documents with equal scores keep their insertion order.
//!
//! HybridRanker is STATELESS. It borrows the index and copies the
//! parameters; all query state is ephemeral per call.

use crate::index::{IndexedDoc, LexicalIndex};
use crate::scorer::{Bm25Scorer, CharCosineScorer, PreparedQuery, Scorer};
use jokerank_core::progress::should_report;
use jokerank_core::{HybridParams, Progress, QueryRow, Rankings, RetrievedDoc};
use serde::Serialize;
use tracing::debug;

/// Report ranking progress every this many queries
const RANK_PROGRESS_EVERY: usize = 5;

// ============================================================================
// ScoreBreakdown
// ============================================================================

/// Raw signals and combined score for one `(query, document)` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// BM25 over word tokens
    pub bm25: f64,
    /// Character n-gram TF-IDF cosine
    pub char_cosine: f64,
    /// Relevance prior, 0.0 or 1.0
    pub prior: f64,
    /// Whether the lower-cased query is a substring of the document
    pub exact_match: bool,
    /// Weighted sum of the signals
    pub total: f64,
}

// ============================================================================
// HybridRanker
// ============================================================================

/// Ranker over a fitted `LexicalIndex`
///
/// ```text
/// query text
///      │
///      ▼
/// PreparedQuery (tokens, n-grams, lower)
///      │
///      ▼  for each document in arena order
/// ┌──────────────────────────────────────────┐
/// │ bm25_weight  * BM25                      │
/// │ char_weight  * cosine                    │
/// │ humor_weight * prior                     │
/// │ match_boost  * [query ⊂ document]        │
/// └──────────────────┬───────────────────────┘
///                    │ keep score > 0
///                    ▼
///        stable sort desc, truncate top_k
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HybridRanker<'a> {
    index: &'a LexicalIndex,
    params: HybridParams,
    bm25: Bm25Scorer,
    char_cosine: CharCosineScorer,
}

impl<'a> HybridRanker<'a> {
    /// Create a ranker over `index` with the given weights
    pub fn new(index: &'a LexicalIndex, params: HybridParams) -> Self {
        HybridRanker {
            index,
            params,
            bm25: Bm25Scorer::new(params.k1, params.b),
            char_cosine: CharCosineScorer::new(),
        }
    }

    /// The index being ranked
    pub fn index(&self) -> &'a LexicalIndex {
        self.index
    }

    /// The active parameters
    pub fn params(&self) -> HybridParams {
        self.params
    }

    /// Analyze a query with the index's n-gram range
    pub fn prepare(&self, query: &str) -> PreparedQuery {
        PreparedQuery::new(query, self.index.ngram_range())
    }

    /// BM25 score of a token sequence against one document
    ///
    /// Returns `None` for an unknown docid.
    pub fn bm25(&self, query_tokens: &[String], docid: &str) -> Option<f64> {
        let doc = self.index.get(docid)?;
        Some(self.bm25.score_tokens(query_tokens, doc, self.index))
    }

    /// Character n-gram cosine of a query text against one document
    ///
    /// Returns `None` for an unknown docid.
    pub fn char_cosine(&self, query_text: &str, docid: &str) -> Option<f64> {
        let doc = self.index.get(docid)?;
        let query = self.prepare(query_text);
        Some(self.char_cosine.score(doc, &query, self.index))
    }

    /// Per-signal breakdown for one document, `None` for an unknown docid
    pub fn explain(&self, query_text: &str, docid: &str) -> Option<ScoreBreakdown> {
        let doc = self.index.get(docid)?;
        let query = self.prepare(query_text);
        Some(self.breakdown(doc, &query))
    }

    fn breakdown(&self, doc: &IndexedDoc, query: &PreparedQuery) -> ScoreBreakdown {
        let bm25 = self.bm25.score(doc, query, self.index);
        let char_cosine = self.char_cosine.score(doc, query, self.index);
        let exact_match = !query.lower.is_empty() && doc.text_lower.contains(&query.lower);
        let exact = if exact_match { 1.0 } else { 0.0 };

        let p = &self.params;
        let total = p.bm25_weight * bm25
            + p.char_weight * char_cosine
            + p.humor_weight * doc.prior
            + p.match_boost * exact;

        ScoreBreakdown {
            bm25,
            char_cosine,
            prior: doc.prior,
            exact_match,
            total,
        }
    }

    /// Rank every document for one query
    ///
    /// Only strictly positive scores are kept. The result is sorted by
    /// descending score with ties in insertion order, then truncated to
    /// `top_k`.
    pub fn rank(&self, query_text: &str, top_k: usize) -> Vec<RetrievedDoc> {
        if top_k == 0 || self.index.is_empty() {
            return Vec::new();
        }

        let query = self.prepare(query_text);
        let mut scored: Vec<RetrievedDoc> = self
            .index
            .docs()
            .iter()
            .filter_map(|doc| {
                let total = self.breakdown(doc, &query).total;
                (total > 0.0).then(|| RetrievedDoc::new(doc.docid.clone(), total))
            })
            .collect();

        // sort_by is stable: equal scores keep arena order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        scored
    }

    /// Rank a query collection in input order
    ///
    /// A repeated qid keeps the ranking of its last occurrence.
    pub fn rank_queries(
        &self,
        queries: &[QueryRow],
        top_k: usize,
        progress: &dyn Progress,
    ) -> Rankings {
        let total = queries.len();
        let mut rankings = Rankings::with_capacity(total);

        for (i, row) in queries.iter().enumerate() {
            let ranked = self.rank(&row.query, top_k);
            debug!(target: "jokerank::rank", qid = %row.qid, hits = ranked.len(), "Ranked query");
            rankings.insert(row.qid.clone(), ranked);

            let done = i + 1;
            if should_report(done, total, RANK_PROGRESS_EVERY) {
                progress.report(
                    &format!("Ranking queries: {}/{}", done, total),
                    0.6 + 0.3 * (done as f64 / total as f64),
                );
            }
        }
        rankings
    }
}

// ============================================================================
// Tests
// ============================================================================
