//! Error types for jokerank
//!
//! This module defines all error types used throughout the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Numeric hazards (empty corpus, zero-norm vectors, queries without
//! judgments) are never errors: they resolve to explicit defaults at the
//! point of computation. Errors are reserved for malformed input and
//! caller misuse.

use std::io;
use thiserror::Error;

/// Result type alias for jokerank operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for jokerank
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is absent (or `null`) in an input row
    #[error("missing field '{field}' in {record} row {index}")]
    MissingField {
        /// Kind of record being parsed ("document", "query", "qrel")
        record: &'static str,
        /// Zero-based position of the row in its collection
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },

    /// A field is present but has an unusable type or value
    #[error("invalid field '{field}' in {record} row {index}: {reason}")]
    InvalidField {
        /// Kind of record being parsed
        record: &'static str,
        /// Zero-based position of the row in its collection
        index: usize,
        /// Name of the offending field
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Auto-tuning was requested without relevance judgments
    #[error("auto-tuning requires relevance judgments (qrels)")]
    MissingQrels,

    /// Configuration values are out of range or inconsistent
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed
    #[error("configuration parse error: {0}")]
    ConfigParse(String),

    /// I/O error (configuration file access)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParse(e.to_string())
    }
}

impl Error {
    /// Create a missing-field error
    pub fn missing_field(record: &'static str, index: usize, field: &'static str) -> Self {
        Error::MissingField {
            record,
            index,
            field,
        }
    }

    /// Create an invalid-field error
    pub fn invalid_field(
        record: &'static str,
        index: usize,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidField {
            record,
            index,
            field,
            reason: reason.into(),
        }
    }

    /// Create an invalid-configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}
