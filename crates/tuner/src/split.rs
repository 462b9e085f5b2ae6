//! Seeded train/validation split of judgment rows by query

use jokerank_core::QrelRow;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeSet, HashSet};

/// Split judgment rows into `(train, valid)` by query
///
/// Distinct qids are sorted, shuffled with a PRNG seeded by `seed`, and
/// the first `max(1, floor(n * valid_ratio))` (at most `n`) become the
/// validation queries. Every row lands on exactly one side, and rows keep
/// their input order within each side.
///
/// The same `(qrels, valid_ratio, seed)` always yields the same split.
pub fn split_qrels_by_query(
    qrels: &[QrelRow],
    valid_ratio: f64,
    seed: u64,
) -> (Vec<QrelRow>, Vec<QrelRow>) {
    let mut qids: Vec<&str> = qrels
        .iter()
        .map(|r| r.qid.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    qids.shuffle(&mut rng);

    let cut = ((qids.len() as f64 * valid_ratio).floor() as usize)
        .max(1)
        .min(qids.len());
    let valid_qids: HashSet<&str> = qids[..cut].iter().copied().collect();

    qrels
        .iter()
        .cloned()
        .partition(|r| !valid_qids.contains(r.qid.as_str()))
}
