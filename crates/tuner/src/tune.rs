//! Grid-search tuning of the hybrid ranker
//!
//! Judgment rows are split by query. One index is fitted over every
//! document with the training judgments as the prior; each grid candidate
//! then ranks the validation queries against that shared index and is
//! scored by MAP@top_k. The strictly greatest MAP wins, with ties going to
//! the candidate enumerated first.
//!
//! Trials only read the index, so they may run on the rayon pool. The
//! selection pass always walks results in enumeration order, which keeps
//! parallel and sequential outcomes identical. Progress counts trials in
//! completion order; reports are serialized so fractions never decrease.

use crate::split::split_qrels_by_query;
use jokerank_core::progress::should_report;
use jokerank_core::{
    to_qrel_map, Document, HybridParams, NgramRange, NoProgress, Progress, QrelRow, QueryRow,
    RelevanceMap, Result, TuneConfig,
};
use jokerank_eval::{map_at_k, PredictionMap};
use jokerank_search::{HybridRanker, LexicalIndex};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Report tuning progress every this many trials
const TUNE_PROGRESS_EVERY: usize = 10;

// ============================================================================
// Outcome
// ============================================================================

/// One evaluated grid candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    /// Candidate parameters
    pub params: HybridParams,
    /// Validation MAP@top_k
    pub map: f64,
}

/// Result of a tuning run
#[derive(Debug, Clone, PartialEq)]
pub struct TuneOutcome {
    /// Winning parameters
    pub best: HybridParams,
    /// Validation MAP@top_k of the winner
    pub best_map: f64,
    /// Every trial in enumeration order
    pub trials: Vec<TrialResult>,
    /// Number of index fits performed
    pub fits: usize,
}

// ============================================================================
// Tuner
// ============================================================================

/// Grid-search driver
///
/// # Example
///
/// ```
/// use jokerank_core::{Document, NoProgress, QrelRow, QueryRow, TuneConfig};
/// use jokerank_tuner::Tuner;
///
/// let docs = vec![Document::new("d1", "a pun"), Document::new("d2", "a joke")];
/// let queries = vec![QueryRow::new("q1", "pun")];
/// let qrels = vec![QrelRow::new("q1", "d1", 1)];
///
/// let outcome = Tuner::new(TuneConfig::default())
///     .run(&docs, &queries, &qrels, &NoProgress)
///     .unwrap();
/// assert_eq!(outcome.trials.len(), 243);
/// assert_eq!(outcome.fits, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Tuner {
    config: TuneConfig,
    ngram: NgramRange,
    base: HybridParams,
}

impl Tuner {
    /// Create a tuner with default n-gram range and base parameters
    pub fn new(config: TuneConfig) -> Self {
        Tuner {
            config,
            ngram: NgramRange::default(),
            base: HybridParams::default(),
        }
    }

    /// Builder: n-gram range of the tuning index
    pub fn with_ngram(mut self, ngram: NgramRange) -> Self {
        self.ngram = ngram;
        self
    }

    /// Builder: values for parameters the grid does not cover
    pub fn with_base(mut self, base: HybridParams) -> Self {
        self.base = base;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &TuneConfig {
        &self.config
    }

    /// Run the grid search
    pub fn run(
        &self,
        docs: &[Document],
        queries: &[QueryRow],
        qrels: &[QrelRow],
        progress: &dyn Progress,
    ) -> Result<TuneOutcome> {
        self.config.validate()?;
        self.ngram.validate()?;

        let (train, valid) = split_qrels_by_query(qrels, self.config.valid_ratio, self.config.seed);

        // Later rows win for a repeated qid
        let query_text: HashMap<&str, &str> = queries
            .iter()
            .map(|q| (q.qid.as_str(), q.query.as_str()))
            .collect();
        let valid_qids: Vec<&str> = valid
            .iter()
            .map(|r| r.qid.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let relevance = to_qrel_map(&valid);

        let index = LexicalIndex::fit_with(docs, Some(&train), self.ngram, &NoProgress);
        let candidates = self.config.grid.candidates(self.base);
        let total = candidates.len();

        info!(
            target: "jokerank::tune",
            trials = total,
            train_rows = train.len(),
            valid_queries = valid_qids.len(),
            parallel = self.config.parallel,
            "Starting grid search"
        );

        let trial = Trial {
            index: &index,
            query_text: &query_text,
            valid_qids: &valid_qids,
            relevance: &relevance,
            top_k: self.config.top_k,
        };
        // Held while reporting so fractions reach the observer in order
        let done = Mutex::new(0usize);
        let run_one = |params: &HybridParams| {
            let map = trial.evaluate(*params);
            let mut count = done.lock();
            *count += 1;
            let finished = *count;
            if should_report(finished, total, TUNE_PROGRESS_EVERY) {
                progress.report(
                    &format!("Auto-tune grid search: {}/{}", finished, total),
                    0.05 + 0.45 * (finished as f64 / total as f64),
                );
            }
            TrialResult {
                params: *params,
                map,
            }
        };

        let trials: Vec<TrialResult> = if self.config.parallel {
            candidates.par_iter().map(run_one).collect()
        } else {
            candidates.iter().map(run_one).collect()
        };

        let mut best = self.base;
        let mut best_map = -1.0;
        for result in &trials {
            debug!(target: "jokerank::tune", params = ?result.params, map = result.map, "Trial");
            if result.map > best_map {
                best_map = result.map;
                best = result.params;
            }
        }

        info!(
            target: "jokerank::tune",
            best = ?best,
            best_map,
            "Grid search finished"
        );

        Ok(TuneOutcome {
            best,
            best_map,
            trials,
            fits: 1,
        })
    }
}

/// Shared read-only state of one tuning run
struct Trial<'a> {
    index: &'a LexicalIndex,
    query_text: &'a HashMap<&'a str, &'a str>,
    valid_qids: &'a [&'a str],
    relevance: &'a RelevanceMap,
    top_k: usize,
}

impl Trial<'_> {
    fn evaluate(&self, params: HybridParams) -> f64 {
        let ranker = HybridRanker::new(self.index, params);
        let predictions: PredictionMap = self
            .valid_qids
            .iter()
            .map(|&qid| {
                let text = self.query_text.get(qid).copied().unwrap_or("");
                let ranked = ranker
                    .rank(text, self.top_k)
                    .into_iter()
                    .map(|d| d.docid)
                    .collect();
                (qid.to_string(), ranked)
            })
            .collect();
        map_at_k(&predictions, self.relevance, self.top_k)
    }
}

// ============================================================================
// Convenience entry points
// ============================================================================

/// Tune with the default split, grid and n-gram range
///
/// Returns the winning parameters and their validation MAP@top_k.
pub fn tune_params(
    docs: &[Document],
    queries: &[QueryRow],
    qrels: &[QrelRow],
    top_k: usize,
) -> Result<(HybridParams, f64)> {
    let config = TuneConfig::default().with_top_k(top_k);
    let outcome = Tuner::new(config).run(docs, queries, qrels, &NoProgress)?;
    Ok((outcome.best, outcome.best_map))
}

/// Tune with an explicit configuration
pub fn tune_params_with(
    docs: &[Document],
    queries: &[QueryRow],
    qrels: &[QrelRow],
    config: &TuneConfig,
    progress: &dyn Progress,
) -> Result<TuneOutcome> {
    Tuner::new(config.clone()).run(docs, queries, qrels, progress)
}
