//! Tuning and prediction runs for jokerank
//!
//! This crate provides:
//! - split_qrels_by_query: seeded, query-level train/validation split
//! - Tuner: exhaustive grid search scored by validation MAP@K
//! - run_predictions: optional tuning, fit, rank and emit submission rows
//!
//! # Usage
//!
//! ```
//! use jokerank_core::{Document, NoProgress, QueryRow};
//! use jokerank_tuner::{run_predictions, RunOptions};
//!
//! let docs = vec![Document::new("d1", "Why did the chicken cross the road")];
//! let queries = vec![QueryRow::new("q1", "chicken")];
//! let out = run_predictions(&docs, &queries, None, &RunOptions::new("demo"), &NoProgress).unwrap();
//! assert_eq!(out.predictions[0].docid, "d1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pipeline;
pub mod split;
pub mod tune;

// Re-export commonly used types
pub use pipeline::{run_predictions, RunOptions, RunOutput};
pub use split::split_qrels_by_query;
pub use tune::{tune_params, tune_params_with, TrialResult, TuneOutcome, Tuner};
