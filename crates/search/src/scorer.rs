//! Scoring infrastructure
//!
//! This module provides:
//! - PreparedQuery: per-call query view (lower-cased text, tokens, n-grams)
//! - Scorer trait for pluggable per-document signals
//! - Bm25Scorer: Okapi BM25 over word tokens
//! - CharCosineScorer: TF-IDF cosine over character n-grams
//!
//! Scorers read only the `LexicalIndex`; they hold parameters, never
//! corpus state.

use crate::index::{log_tf, IndexedDoc, LexicalIndex};
use crate::tokenizer::{char_ngrams, tokenize};
use jokerank_core::NgramRange;
use rustc_hash::FxHashMap;

// ============================================================================
// PreparedQuery
// ============================================================================

/// Query features computed once per ranking call
///
/// This is an ephemeral view, never stored. N-gram counts keep the order
/// of first occurrence so that score accumulation order is reproducible.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    /// Raw query text
    pub text: String,
    /// Lower-cased query text
    pub lower: String,
    /// Word tokens, duplicates kept
    pub tokens: Vec<String>,
    /// Distinct n-grams with their counts, in first-occurrence order
    pub grams: Vec<(String, u32)>,
}

impl PreparedQuery {
    /// Analyze `text` with the given n-gram range
    pub fn new(text: &str, ngram: NgramRange) -> Self {
        let lower = text.to_lowercase();
        let tokens = tokenize(text);

        let mut slots: FxHashMap<String, usize> = FxHashMap::default();
        let mut grams: Vec<(String, u32)> = Vec::new();
        for gram in char_ngrams(&lower, ngram.min_n, ngram.max_n) {
            match slots.get(&gram) {
                Some(&slot) => grams[slot].1 += 1,
                None => {
                    slots.insert(gram.clone(), grams.len());
                    grams.push((gram, 1));
                }
            }
        }

        PreparedQuery {
            text: text.to_string(),
            lower,
            tokens,
            grams,
        }
    }
}

// ============================================================================
// Scorer Trait
// ============================================================================

/// Pluggable per-document scoring interface
///
/// Returns a raw, unnormalized score; the hybrid ranker weights and sums
/// the outputs of several scorers.
///
/// # Thread Safety
///
/// Scorers must be Send + Sync so rankers can be shared across threads.
pub trait Scorer: Send + Sync {
    /// Score one indexed document against a prepared query
    fn score(&self, doc: &IndexedDoc, query: &PreparedQuery, index: &LexicalIndex) -> f64;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}

// ============================================================================
// Bm25Scorer
// ============================================================================

/// Okapi BM25 over word tokens
///
/// # Formula
///
/// For each query token t with tf > 0 in the document:
/// score += IDF(t) * (tf * (k1 + 1)) / (tf + k1 * (1 - b + b * dl/avgdl))
///
/// Query tokens are scored once per occurrence, so a token repeated in the
/// query contributes repeatedly. Tokens absent from the document add
/// exactly 0.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Scorer {
    /// Term-frequency saturation
    pub k1: f64,
    /// Length normalization
    pub b: f64,
}

impl Default for Bm25Scorer {
    fn default() -> Self {
        Bm25Scorer { k1: 1.5, b: 0.75 }
    }
}

impl Bm25Scorer {
    /// Create a scorer with custom parameters
    pub fn new(k1: f64, b: f64) -> Self {
        Bm25Scorer { k1, b }
    }

    /// Score a token sequence against a document
    pub fn score_tokens(&self, tokens: &[String], doc: &IndexedDoc, index: &LexicalIndex) -> f64 {
        let dl = doc.len as f64;
        let norm = self.k1 * (1.0 - self.b + self.b * dl / index.avg_doc_len().max(1e-9));

        let mut score = 0.0;
        for token in tokens {
            let tf = doc.term_frequency(token);
            if tf == 0 {
                continue;
            }
            let tf = tf as f64;
            score += index.idf(token) * (tf * (self.k1 + 1.0)) / (tf + norm);
        }
        score
    }
}

impl Scorer for Bm25Scorer {
    fn score(&self, doc: &IndexedDoc, query: &PreparedQuery, index: &LexicalIndex) -> f64 {
        self.score_tokens(&query.tokens, doc, index)
    }

    fn name(&self) -> &str {
        "bm25"
    }
}

// ============================================================================
// CharCosineScorer
// ============================================================================

/// TF-IDF cosine similarity over character n-grams
///
/// Weights are `(1 + ln tf) * idf`. Query n-grams whose IDF is exactly 0
/// (including n-grams the corpus never saw) are left out of both the dot
/// product and the query norm.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCosineScorer;

impl CharCosineScorer {
    /// Create a new scorer
    pub fn new() -> Self {
        CharCosineScorer
    }
}

impl Scorer for CharCosineScorer {
    fn score(&self, doc: &IndexedDoc, query: &PreparedQuery, index: &LexicalIndex) -> f64 {
        if query.grams.is_empty() {
            return 0.0;
        }

        let mut dot = 0.0;
        let mut qnorm2 = 0.0;
        for (gram, tfq) in &query.grams {
            let idf = index.gram_idf(gram);
            if idf == 0.0 {
                continue;
            }
            let qw = log_tf(*tfq) * idf;
            qnorm2 += qw * qw;

            let tfd = doc.gram_frequency(gram);
            if tfd > 0 {
                let dw = log_tf(tfd) * idf;
                dot += qw * dw;
            }
        }

        let qnorm = if qnorm2 > 0.0 { qnorm2.sqrt() } else { 1.0 };
        let dnorm = doc.gram_norm;
        if qnorm > 0.0 && dnorm > 0.0 {
            dot / (qnorm * dnorm)
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        "char-cosine"
    }
}

// ============================================================================
// Tests
// ============================================================================
