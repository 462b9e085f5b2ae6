//! Relevance maps derived from judgment rows

use crate::types::QrelRow;
use std::collections::{BTreeMap, HashSet};

/// qid -> set of relevant docids
///
/// Keyed by an ordered map so that anything summed over queries is
/// accumulated in the same order on every run.
pub type RelevanceMap = BTreeMap<String, HashSet<String>>;

/// Build the relevance map from judgment rows
///
/// Only positive rows contribute. Repeated positive judgments for the same
/// `(qid, docid)` collapse into one entry.
pub fn to_qrel_map(qrels: &[QrelRow]) -> RelevanceMap {
    let mut rel = RelevanceMap::new();
    for row in qrels.iter().filter(|r| r.is_positive()) {
        rel.entry(row.qid.clone())
            .or_default()
            .insert(row.docid.clone());
    }
    rel
}

/// Docids judged relevant for at least one query
pub fn positive_docids(qrels: &[QrelRow]) -> HashSet<&str> {
    qrels
        .iter()
        .filter(|r| r.is_positive())
        .map(|r| r.docid.as_str())
        .collect()
}
