//! Min-max score normalization

use jokerank_core::RetrievedDoc;

/// Rescale scores into `[0, 1]` with min-max normalization
///
/// Order and docids are preserved. When every score is equal (including a
/// single row) all scores become 1.0. An empty input stays empty.
///
/// # Example
///
/// ```
/// use jokerank_core::RetrievedDoc;
/// use jokerank_search::normalize_scores;
///
/// let rows = vec![RetrievedDoc::new("a", 4.0), RetrievedDoc::new("b", 2.0)];
/// let scores: Vec<f64> = normalize_scores(&rows).iter().map(|r| r.score).collect();
/// assert_eq!(scores, vec![1.0, 0.0]);
/// ```
pub fn normalize_scores(rows: &[RetrievedDoc]) -> Vec<RetrievedDoc> {
    if rows.is_empty() {
        return Vec::new();
    }

    let (min, max) = rows
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.score), hi.max(r.score))
        });

    if max == min {
        return rows
            .iter()
            .map(|r| RetrievedDoc::new(r.docid.clone(), 1.0))
            .collect();
    }

    let span = max - min;
    rows.iter()
        .map(|r| RetrievedDoc::new(r.docid.clone(), (r.score - min) / span))
        .collect()
}
