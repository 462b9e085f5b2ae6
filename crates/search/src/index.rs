//! Lexical index built once per document collection
//!
//! This module provides:
//! - IndexedDoc: immutable per-document record (arena entry)
//! - LexicalIndex: corpus-wide statistics for BM25 and char n-gram TF-IDF
//!
//! # Layout
//!
//! Documents live in an arena (`Vec<IndexedDoc>`) in first-seen order. Each
//! record carries every per-document statistic, so a docid known to the
//! index is known to all of its tables. Corpus-wide tables (document
//! frequencies, IDF) are keyed by term or n-gram.
//!
//! The index is built in one pass by `fit` and never mutated afterwards.
//! It holds no scorer parameters, so one index can back any number of
//! ranker configurations.

use crate::tokenizer::{char_ngrams, tokenize};
use jokerank_core::progress::should_report;
use jokerank_core::{positive_docids, Document, NgramRange, NoProgress, Progress, QrelRow};
use rustc_hash::FxHashMap;
use tracing::{info, warn};

/// Report fit progress every this many documents
const FIT_PROGRESS_EVERY: usize = 1000;

// ============================================================================
// IndexedDoc
// ============================================================================

/// Per-document statistics derived at fit time
#[derive(Debug, Clone)]
pub struct IndexedDoc {
    /// Document identifier
    pub docid: String,
    /// Lower-cased raw text (for exact-match checks)
    pub text_lower: String,
    /// Word token -> occurrences
    pub term_freqs: FxHashMap<String, u32>,
    /// Number of word tokens
    pub len: usize,
    /// Char n-gram -> occurrences
    pub gram_freqs: FxHashMap<String, u32>,
    /// Euclidean norm of the TF-IDF n-gram vector (1.0 when zero)
    pub gram_norm: f64,
    /// 1.0 if ever judged relevant in the fitting qrels, else 0.0
    pub prior: f64,
}

impl IndexedDoc {
    fn analyze(doc: &Document, ngram: NgramRange) -> Self {
        let text_lower = doc.text.to_lowercase();

        let tokens = tokenize(&doc.text);
        let len = tokens.len();
        let mut term_freqs: FxHashMap<String, u32> = FxHashMap::default();
        for token in tokens {
            *term_freqs.entry(token).or_insert(0) += 1;
        }

        let mut gram_freqs: FxHashMap<String, u32> = FxHashMap::default();
        for gram in char_ngrams(&text_lower, ngram.min_n, ngram.max_n) {
            *gram_freqs.entry(gram).or_insert(0) += 1;
        }

        IndexedDoc {
            docid: doc.docid.clone(),
            text_lower,
            term_freqs,
            len,
            gram_freqs,
            gram_norm: 1.0,
            prior: 0.0,
        }
    }

    /// Occurrences of `term` in this document
    pub fn term_frequency(&self, term: &str) -> u32 {
        self.term_freqs.get(term).copied().unwrap_or(0)
    }

    /// Occurrences of `gram` in this document
    pub fn gram_frequency(&self, gram: &str) -> u32 {
        self.gram_freqs.get(gram).copied().unwrap_or(0)
    }
}

/// Sublinear term-frequency weight `1 + ln(tf)`
#[inline]
pub(crate) fn log_tf(tf: u32) -> f64 {
    1.0 + (tf as f64).ln()
}

// ============================================================================
// LexicalIndex
// ============================================================================

/// Statistical index over a fixed document collection
#[derive(Debug, Clone)]
pub struct LexicalIndex {
    /// Documents in first-seen order
    docs: Vec<IndexedDoc>,
    /// docid -> arena position
    positions: FxHashMap<String, usize>,
    /// term -> number of documents containing it
    doc_freqs: FxHashMap<String, usize>,
    /// term -> BM25 IDF (unclamped)
    idf: FxHashMap<String, f64>,
    /// n-gram -> number of documents containing it
    gram_doc_freqs: FxHashMap<String, usize>,
    /// n-gram -> smoothed IDF
    gram_idf: FxHashMap<String, f64>,
    /// Mean token count over all documents
    avg_doc_len: f64,
    /// n-gram lengths used for documents and queries
    ngram: NgramRange,
}

impl LexicalIndex {
    /// Build an index with the default n-gram range
    ///
    /// When `qrels` is given, every document judged relevant for any query
    /// receives a prior of 1.0.
    pub fn fit(docs: &[Document], qrels: Option<&[QrelRow]>) -> Self {
        Self::fit_with(docs, qrels, NgramRange::default(), &NoProgress)
    }

    /// Build an index, reporting progress to `progress`
    pub fn fit_with_progress(
        docs: &[Document],
        qrels: Option<&[QrelRow]>,
        progress: &dyn Progress,
    ) -> Self {
        Self::fit_with(docs, qrels, NgramRange::default(), progress)
    }

    /// Build an index with an explicit n-gram range
    ///
    /// A docid seen twice keeps its first position but takes the later
    /// text; statistics are computed over the distinct documents only.
    pub fn fit_with(
        docs: &[Document],
        qrels: Option<&[QrelRow]>,
        ngram: NgramRange,
        progress: &dyn Progress,
    ) -> Self {
        let total = docs.len();
        let mut arena: Vec<IndexedDoc> = Vec::with_capacity(total);
        let mut positions: FxHashMap<String, usize> = FxHashMap::default();

        for (i, doc) in docs.iter().enumerate() {
            let record = IndexedDoc::analyze(doc, ngram);
            match positions.get(&doc.docid) {
                Some(&pos) => {
                    warn!(
                        target: "jokerank::index",
                        docid = %doc.docid,
                        "Duplicate docid, replacing earlier document"
                    );
                    arena[pos] = record;
                }
                None => {
                    positions.insert(doc.docid.clone(), arena.len());
                    arena.push(record);
                }
            }

            let done = i + 1;
            if should_report(done, total, FIT_PROGRESS_EVERY) {
                progress.report(
                    &format!("Indexing documents: {}/{}", done, total),
                    0.1 + 0.4 * (done as f64 / total as f64),
                );
            }
        }

        // Corpus-wide document frequencies over the distinct documents
        let mut doc_freqs: FxHashMap<String, usize> = FxHashMap::default();
        let mut gram_doc_freqs: FxHashMap<String, usize> = FxHashMap::default();
        let mut total_len = 0usize;
        for doc in &arena {
            total_len += doc.len;
            for term in doc.term_freqs.keys() {
                *doc_freqs.entry(term.clone()).or_insert(0) += 1;
            }
            for gram in doc.gram_freqs.keys() {
                *gram_doc_freqs.entry(gram.clone()).or_insert(0) += 1;
            }
        }

        let n_docs = arena.len().max(1) as f64;
        let avg_doc_len = total_len as f64 / n_docs;

        let idf: FxHashMap<String, f64> = doc_freqs
            .iter()
            .map(|(term, &df)| (term.clone(), bm25_idf(n_docs, df as f64)))
            .collect();
        let gram_idf: FxHashMap<String, f64> = gram_doc_freqs
            .iter()
            .map(|(gram, &df)| (gram.clone(), gram_idf_value(n_docs, df as f64)))
            .collect();

        for doc in arena.iter_mut() {
            let norm2: f64 = doc
                .gram_freqs
                .iter()
                .map(|(gram, &tf)| {
                    let w = log_tf(tf) * gram_idf.get(gram).copied().unwrap_or(0.0);
                    w * w
                })
                .sum();
            doc.gram_norm = if norm2 > 0.0 { norm2.sqrt() } else { 1.0 };
        }

        if let Some(qrels) = qrels {
            let positive = positive_docids(qrels);
            for doc in arena.iter_mut() {
                doc.prior = if positive.contains(doc.docid.as_str()) {
                    1.0
                } else {
                    0.0
                };
            }
        }

        info!(
            target: "jokerank::index",
            docs = arena.len(),
            terms = doc_freqs.len(),
            ngrams = gram_doc_freqs.len(),
            avg_doc_len,
            "Lexical index built"
        );

        LexicalIndex {
            docs: arena,
            positions,
            doc_freqs,
            idf,
            gram_doc_freqs,
            gram_idf,
            avg_doc_len,
            ngram,
        }
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Number of distinct documents
    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }

    /// Whether the index holds no documents
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Mean token count, fixed at fit time
    pub fn avg_doc_len(&self) -> f64 {
        self.avg_doc_len
    }

    /// n-gram range used by this index
    pub fn ngram_range(&self) -> NgramRange {
        self.ngram
    }

    /// Number of distinct word tokens
    pub fn vocabulary_size(&self) -> usize {
        self.doc_freqs.len()
    }

    /// Number of distinct char n-grams
    pub fn ngram_vocabulary_size(&self) -> usize {
        self.gram_doc_freqs.len()
    }

    /// Documents containing `term`
    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freqs.get(term).copied().unwrap_or(0)
    }

    /// Documents containing `gram`
    pub fn gram_doc_freq(&self, gram: &str) -> usize {
        self.gram_doc_freqs.get(gram).copied().unwrap_or(0)
    }

    /// BM25 IDF of `term`, 0.0 outside the vocabulary
    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// Char n-gram IDF of `gram`, 0.0 for unseen n-grams
    pub fn gram_idf(&self, gram: &str) -> f64 {
        self.gram_idf.get(gram).copied().unwrap_or(0.0)
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Documents in first-seen order
    pub fn docs(&self) -> &[IndexedDoc] {
        &self.docs
    }

    /// Look up a document by id
    pub fn get(&self, docid: &str) -> Option<&IndexedDoc> {
        self.positions.get(docid).map(|&pos| &self.docs[pos])
    }

    /// Whether `docid` is indexed
    pub fn contains(&self, docid: &str) -> bool {
        self.positions.contains_key(docid)
    }

    /// Relevance prior of `docid` (0.0 when unknown)
    pub fn prior(&self, docid: &str) -> f64 {
        self.get(docid).map_or(0.0, |d| d.prior)
    }
}

/// Smoothed BM25 IDF: `ln(1 + (N - df + 0.5) / (df + 0.5))`
///
/// Returned unclamped. For `df <= N` the value is positive and shrinks
/// toward `ln(1 + 0.5 / (N + 0.5))` as a term approaches every document.
pub fn bm25_idf(n_docs: f64, df: f64) -> f64 {
    (1.0 + (n_docs - df + 0.5) / (df + 0.5)).ln()
}

/// Char n-gram IDF: `ln(1 + N / (1 + df))`
pub fn gram_idf_value(n_docs: f64, df: f64) -> f64 {
    (1.0 + n_docs / (1.0 + df)).ln()
}

// ============================================================================
// Tests
// ============================================================================
