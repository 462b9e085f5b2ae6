//! Core types for jokerank
//!
//! This crate defines the foundational types used throughout the workspace:
//! - Error: Error type and `Result` alias
//! - Records: Document, QueryRow, QrelRow, RetrievedDoc, PredictionRow
//! - JSON row codec: fail-fast conversion from loosely-typed rows
//! - RelevanceMap: qid -> positive docids
//! - Configuration: HybridParams, NgramRange, TuningGrid, TuneConfig, JokerankConfig
//! - Progress: observer for long-running operations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod json;
pub mod progress;
pub mod relevance;
pub mod types;

// Re-export commonly used types
pub use config::{
    HybridParams, JokerankConfig, NgramRange, TuneConfig, TuningGrid, CONFIG_FILE_NAME,
    DEFAULT_TOP_K,
};
pub use error::{Error, Result};
pub use json::{documents_from_json, qrels_from_json, queries_from_json};
pub use progress::{NoProgress, Progress};
pub use relevance::{positive_docids, to_qrel_map, RelevanceMap};
pub use types::{Document, PredictionRow, QrelRow, QueryRow, Rankings, RetrievedDoc};
