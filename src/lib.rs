//! jokerank - hybrid lexical ranking for humor retrieval
//!
//! jokerank ranks short documents against text queries by blending Okapi
//! BM25, a character n-gram TF-IDF cosine, a relevance prior and an
//! exact-substring boost. It also scores rankings with MAP@K and tunes the
//! blend on a seeded train/validation split of relevance judgments.
//!
//! # Quick Start
//!
//! ```
//! use jokerank::{Document, HybridParams, HybridRanker, LexicalIndex};
//!
//! let docs = vec![
//!     Document::new("d1", "Why did the chicken cross the road"),
//!     Document::new("d2", "Time flies like an arrow"),
//! ];
//! let index = LexicalIndex::fit(&docs, None);
//! let ranked = HybridRanker::new(&index, HybridParams::default()).rank("chicken road", 10);
//! assert_eq!(ranked[0].docid, "d1");
//! ```
//!
//! # Architecture
//!
//! - `jokerank-core`: records, errors, configuration, progress observer
//! - `jokerank-search`: tokenizer, index, scorers, hybrid ranker
//! - `jokerank-eval`: MAP@K and submission rows
//! - `jokerank-tuner`: query split, grid search, prediction pipeline

pub use jokerank_core::*;
pub use jokerank_eval::{
    average_precision, evaluate_predictions, map_at_k, predictions_by_query,
    predictions_from_rankings, ranked_docids, PredictionMap,
};
pub use jokerank_search::{
    bm25_idf, char_ngrams, gram_idf_value, normalize_scores, tokenize, HybridRanker,
    LexicalIndex, ScoreBreakdown,
};
pub use jokerank_tuner::{
    run_predictions, split_qrels_by_query, tune_params, tune_params_with, RunOptions, RunOutput,
    TrialResult, TuneOutcome, Tuner,
};
