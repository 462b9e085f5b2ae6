//! Tier 3: Tuning
//!
//! Split determinism, grid enumeration and winner selection.

use super::test_utils::*;
use jokerank::{
    split_qrels_by_query, tune_params, tune_params_with, Error, HybridParams, NoProgress,
    TuneConfig, TuningGrid,
};
use std::collections::HashSet;

/// The default split is stable across calls and loses no rows
#[test]
fn test_tier3_default_split() {
    let qrels = joke_qrels();
    let (train, valid) = split_qrels_by_query(&qrels, 0.2, 13);
    let (train2, valid2) = split_qrels_by_query(&qrels, 0.2, 13);

    assert_eq!(train, train2);
    assert_eq!(valid, valid2);
    assert_eq!(train.len() + valid.len(), qrels.len());

    // 6 queries * 0.2 -> one validation query
    let valid_qids: HashSet<&str> = valid.iter().map(|r| r.qid.as_str()).collect();
    assert_eq!(valid_qids.len(), 1);
}

/// The default grid has 243 candidates and one fit
#[test]
fn test_tier3_default_grid() {
    init_tracing();
    let config = TuneConfig::default().with_top_k(10);
    let outcome = tune_params_with(
        &joke_corpus(),
        &joke_queries(),
        &joke_qrels(),
        &config,
        &NoProgress,
    )
    .unwrap();

    assert_eq!(outcome.trials.len(), 243);
    assert_eq!(outcome.fits, 1);
    assert!(outcome.trials.iter().all(|t| t.map <= outcome.best_map));
    let winner = outcome
        .trials
        .iter()
        .position(|t| t.map == outcome.best_map)
        .unwrap();
    assert_eq!(outcome.trials[winner].params, outcome.best);
}

/// tune_params and tune_params_with agree on the defaults
#[test]
fn test_tier3_entry_points_agree() {
    let (best, map) = tune_params(&joke_corpus(), &joke_queries(), &joke_qrels(), 10).unwrap();
    let outcome = tune_params_with(
        &joke_corpus(),
        &joke_queries(),
        &joke_qrels(),
        &TuneConfig::default().with_top_k(10),
        &NoProgress,
    )
    .unwrap();

    assert_eq!(best, outcome.best);
    assert_eq!(map, outcome.best_map);
}

/// A single-candidate grid returns that candidate
#[test]
fn test_tier3_single_candidate() {
    let params = HybridParams::default()
        .with_bm25(1.3, 0.4)
        .with_char_weight(0.1)
        .with_humor_weight(0.0)
        .with_match_boost(0.3);
    let config = TuneConfig::default().with_grid(TuningGrid::single(params));
    let outcome = tune_params_with(
        &joke_corpus(),
        &joke_queries(),
        &joke_qrels(),
        &config,
        &NoProgress,
    )
    .unwrap();

    assert_eq!(outcome.best, params);
    assert_eq!(outcome.trials.len(), 1);
    assert_eq!(outcome.fits, 1);
}

/// Different seeds may pick different validation queries but always one
#[test]
fn test_tier3_seed_controls_split() {
    let qrels = joke_qrels();
    for seed in 0..16 {
        let (_, valid) = split_qrels_by_query(&qrels, 0.2, seed);
        let qids: HashSet<&str> = valid.iter().map(|r| r.qid.as_str()).collect();
        assert_eq!(qids.len(), 1);
    }
}

/// Invalid tuning settings are rejected before any work
#[test]
fn test_tier3_invalid_settings() {
    let mut grid = TuningGrid::default();
    grid.match_boost.clear();
    let err = tune_params_with(
        &joke_corpus(),
        &joke_queries(),
        &joke_qrels(),
        &TuneConfig::default().with_grid(grid),
        &NoProgress,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));

    let err = tune_params_with(
        &joke_corpus(),
        &joke_queries(),
        &joke_qrels(),
        &TuneConfig::default().with_split(0.0, 13),
        &NoProgress,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}
