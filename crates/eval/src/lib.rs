//! Evaluation for jokerank
//!
//! - MAP@K and per-query average precision
//! - Conversion of ranked lists into submission rows, and back into
//!   per-query docid lists for scoring

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod metrics;
pub mod predictions;

pub use metrics::{average_precision, map_at_k, PredictionMap};
pub use predictions::{
    evaluate_predictions, predictions_by_query, predictions_from_rankings, ranked_docids,
};
