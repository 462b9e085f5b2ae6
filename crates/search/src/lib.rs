//! Lexical retrieval for jokerank
//!
//! This crate provides:
//! - Word tokenizer and character n-gram extractor
//! - LexicalIndex: document arena plus corpus statistics and relevance prior
//! - Scorer trait with BM25 and character n-gram cosine implementations
//! - HybridRanker: weighted blend of the scorers, prior and exact match
//! - normalize_scores: min-max rescaling of a ranked list
//!
//! # Usage
//!
//! ```
//! use jokerank_core::{Document, HybridParams};
//! use jokerank_search::{HybridRanker, LexicalIndex};
//!
//! let docs = vec![
//!     Document::new("d1", "Why did the chicken cross the road"),
//!     Document::new("d2", "Time flies like an arrow"),
//! ];
//! let index = LexicalIndex::fit(&docs, None);
//! let ranked = HybridRanker::new(&index, HybridParams::default()).rank("chicken", 10);
//! assert_eq!(ranked[0].docid, "d1");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hybrid;
pub mod index;
pub mod normalize;
pub mod scorer;
pub mod tokenizer;

// Re-export commonly used types
pub use hybrid::{HybridRanker, ScoreBreakdown};
pub use index::{bm25_idf, gram_idf_value, IndexedDoc, LexicalIndex};
pub use normalize::normalize_scores;
pub use scorer::{Bm25Scorer, CharCosineScorer, PreparedQuery, Scorer};
pub use tokenizer::{char_ngrams, tokenize};
