//! End-to-end prediction run
//!
//! Optionally tunes on the supplied judgments, fits one index over every
//! document with all judgments as the prior, ranks each query and emits
//! submission rows.

use crate::tune::{TuneOutcome, Tuner};
use jokerank_core::{
    Document, Error, HybridParams, JokerankConfig, NgramRange, NoProgress, PredictionRow,
    Progress, QrelRow, QueryRow, Result, TuneConfig, DEFAULT_TOP_K,
};
use jokerank_eval::predictions_from_rankings;
use jokerank_search::{HybridRanker, LexicalIndex};
use tracing::info;

/// Options for one prediction run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Run identifier written into every row
    pub run_id: String,
    /// 1 for a manual run, 0 for an automatic one
    pub manual: u8,
    /// Results kept per query
    pub top_k: usize,
    /// Replace `params` with tuned values before ranking
    pub auto_tune: bool,
    /// Ranking parameters
    pub params: HybridParams,
    /// Character n-gram range
    pub ngram: NgramRange,
    /// Settings used when `auto_tune` is set; validation MAP is cut at
    /// the run's `top_k`, not at `tuning.top_k`
    pub tuning: TuneConfig,
}

impl RunOptions {
    /// Default options for `run_id`
    pub fn new(run_id: impl Into<String>) -> Self {
        RunOptions {
            run_id: run_id.into(),
            manual: 0,
            top_k: DEFAULT_TOP_K,
            auto_tune: false,
            params: HybridParams::default(),
            ngram: NgramRange::default(),
            tuning: TuneConfig::default(),
        }
    }

    /// Options taken from a loaded configuration file
    pub fn from_config(run_id: impl Into<String>, config: &JokerankConfig) -> Self {
        RunOptions {
            run_id: run_id.into(),
            manual: 0,
            top_k: config.top_k,
            auto_tune: false,
            params: config.params,
            ngram: config.ngram,
            tuning: config.tuning.clone(),
        }
    }

    /// Builder: mark the run as manual
    pub fn with_manual(mut self, manual: bool) -> Self {
        self.manual = u8::from(manual);
        self
    }

    /// Builder: enable auto-tuning
    pub fn with_auto_tune(mut self, auto_tune: bool) -> Self {
        self.auto_tune = auto_tune;
        self
    }

    /// Builder: set ranking parameters
    pub fn with_params(mut self, params: HybridParams) -> Self {
        self.params = params;
        self
    }

    /// Builder: set top-k
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Builder: set tuning settings
    pub fn with_tuning(mut self, tuning: TuneConfig) -> Self {
        self.tuning = tuning;
        self
    }
}

/// Rows and parameters produced by a run
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Submission rows, queries in input order
    pub predictions: Vec<PredictionRow>,
    /// Parameters used for ranking
    pub params: HybridParams,
    /// Tuning result when `auto_tune` was set
    pub tuning: Option<TuneOutcome>,
}

/// Produce submission rows for `queries`
///
/// # Errors
///
/// - `Error::MissingQrels` if `auto_tune` is set without judgments
/// - `Error::InvalidConfig` for an invalid n-gram range or tuning setup
pub fn run_predictions(
    docs: &[Document],
    queries: &[QueryRow],
    qrels: Option<&[QrelRow]>,
    options: &RunOptions,
    progress: &dyn Progress,
) -> Result<RunOutput> {
    options.ngram.validate()?;

    let mut params = options.params;
    let mut tuning = None;
    if options.auto_tune {
        let judgments = qrels.ok_or(Error::MissingQrels)?;
        let outcome = Tuner::new(options.tuning.clone().with_top_k(options.top_k))
            .with_ngram(options.ngram)
            .with_base(options.params)
            .run(docs, queries, judgments, progress)?;
        progress.report(
            &format!(
                "Selected params: {:?}; holdout MAP={:.6}",
                outcome.best, outcome.best_map
            ),
            0.55,
        );
        params = outcome.best;
        tuning = Some(outcome);
    }

    // Tuning already owns the early progress range
    let fit_progress: &dyn Progress = if tuning.is_some() {
        &NoProgress
    } else {
        progress
    };
    let index = LexicalIndex::fit_with(docs, qrels, options.ngram, fit_progress);

    let ranker = HybridRanker::new(&index, params);
    let rankings = ranker.rank_queries(queries, options.top_k, progress);
    let predictions = predictions_from_rankings(&options.run_id, options.manual, queries, &rankings);

    info!(
        target: "jokerank::pipeline",
        run_id = %options.run_id,
        queries = queries.len(),
        rows = predictions.len(),
        tuned = tuning.is_some(),
        "Predictions built"
    );
    progress.report(
        &format!("Built {} prediction rows", predictions.len()),
        1.0,
    );

    Ok(RunOutput {
        predictions,
        params,
        tuning,
    })
}
