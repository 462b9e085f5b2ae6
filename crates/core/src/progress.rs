//! Progress observer for long-running operations
//!
//! Fitting, ranking a query collection and grid search accept a
//! `&dyn Progress`. Observers only watch: they cannot alter control flow
//! or results, and they are called at coarse intervals, never per document.

/// Receives a human-readable message and a completion fraction in `[0, 1]`
pub trait Progress: Sync {
    /// Report progress
    fn report(&self, message: &str, fraction: f64);
}

impl<F> Progress for F
where
    F: Fn(&str, f64) + Sync,
{
    fn report(&self, message: &str, fraction: f64) {
        self(message, fraction)
    }
}

/// Observer that discards every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&self, _message: &str, _fraction: f64) {}
}

/// Whether the `done`-th of `total` steps should be reported when
/// reporting every `every` steps plus the final one
pub fn should_report(done: usize, total: usize, every: usize) -> bool {
    done == total || (every > 0 && done % every == 0)
}
