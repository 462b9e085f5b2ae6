//! Ranking Comprehensive Test Suite
//!
//! End-to-end guarantees of the jokerank facade.
//!
//! ## Test Tier Structure
//!
//! - **Tier 1: Ranking Correctness** (signals, ordering, truncation)
//! - **Tier 2: Evaluation** (MAP@K, submission rows)
//! - **Tier 3: Tuning** (split, grid enumeration, selection)
//! - **Tier 4: Pipeline** (JSON rows, configuration files, full runs)
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test ranking_comprehensive
//!
//! # Run one tier
//! cargo test --test ranking_comprehensive tier3
//! ```

mod test_utils;

// Tier 1: Ranking Correctness
mod tier1_ranking;

// Tier 2: Evaluation
mod tier2_evaluation;

// Tier 3: Tuning
mod tier3_tuning;
