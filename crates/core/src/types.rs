//! Record types exchanged with the outside world
//!
//! - Document: a `(docid, text)` pair to be indexed
//! - QueryRow: a `(qid, query)` pair to be ranked
//! - QrelRow: a graded relevance judgment
//! - RetrievedDoc: one element of a ranked result list
//! - PredictionRow: one submission row for a `(query, document)` pair

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Inputs
// ============================================================================

/// A document in the collection being ranked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique key within the collection
    pub docid: String,
    /// Raw document text
    pub text: String,
}

impl Document {
    /// Create a new document
    pub fn new(docid: impl Into<String>, text: impl Into<String>) -> Self {
        Document {
            docid: docid.into(),
            text: text.into(),
        }
    }
}

/// A query to be ranked against the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRow {
    /// Query identifier
    pub qid: String,
    /// Free-text query
    pub query: String,
}

impl QueryRow {
    /// Create a new query row
    pub fn new(qid: impl Into<String>, query: impl Into<String>) -> Self {
        QueryRow {
            qid: qid.into(),
            query: query.into(),
        }
    }
}

/// A graded relevance judgment linking a query to a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QrelRow {
    /// Query identifier
    pub qid: String,
    /// Document identifier
    pub docid: String,
    /// Graded judgment; positive means relevant
    #[serde(default)]
    pub qrel: i64,
}

impl QrelRow {
    /// Create a new judgment
    pub fn new(qid: impl Into<String>, docid: impl Into<String>, qrel: i64) -> Self {
        QrelRow {
            qid: qid.into(),
            docid: docid.into(),
            qrel,
        }
    }

    /// Whether this row marks the document as relevant
    pub fn is_positive(&self) -> bool {
        self.qrel > 0
    }
}

// ============================================================================
// Outputs
// ============================================================================

/// One element of a ranked result list
///
/// The score is non-negative as produced by the ranker and lies in
/// `[0, 1]` after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDoc {
    /// Document identifier
    pub docid: String,
    /// Ranking score
    pub score: f64,
}

impl RetrievedDoc {
    /// Create a new result entry
    pub fn new(docid: impl Into<String>, score: f64) -> Self {
        RetrievedDoc {
            docid: docid.into(),
            score,
        }
    }
}

/// Ranked lists keyed by query identifier
pub type Rankings = HashMap<String, Vec<RetrievedDoc>>;

/// A submission row for one retrieved document
///
/// Field names match the benchmark's prediction file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    /// Identifier of the run that produced this row
    pub run_id: String,
    /// 1 for a manual run, 0 for an automatic one
    pub manual: u8,
    /// Query identifier
    pub qid: String,
    /// Document identifier
    pub docid: String,
    /// 1-based rank within the query
    pub rank: usize,
    /// Normalized score rounded to six decimals
    pub score: f64,
}
