//! Configuration via `jokerank.toml`
//!
//! Every field has a default, so an empty file is a valid configuration.
//! The defaults reproduce the reference runs of the benchmark pipeline.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "jokerank.toml";

/// Default number of results kept per query.
pub const DEFAULT_TOP_K: usize = 1000;

// ============================================================================
// HybridParams
// ============================================================================

/// Scorer hyperparameters and hybrid combination weights
///
/// `k1` and `b` shape BM25; the weights scale the four signals of the
/// hybrid score. `bm25_weight` is fixed during tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridParams {
    /// BM25 term-frequency saturation
    pub k1: f64,
    /// BM25 length normalization
    pub b: f64,
    /// Weight of the BM25 signal
    pub bm25_weight: f64,
    /// Weight of the char n-gram cosine signal
    pub char_weight: f64,
    /// Weight of the relevance prior
    pub humor_weight: f64,
    /// Bonus when the whole query occurs verbatim in the document
    pub match_boost: f64,
}

impl Default for HybridParams {
    fn default() -> Self {
        HybridParams {
            k1: 1.5,
            b: 0.75,
            bm25_weight: 1.0,
            char_weight: 0.35,
            humor_weight: 0.2,
            match_boost: 0.1,
        }
    }
}

impl HybridParams {
    /// Builder: set BM25 parameters
    pub fn with_bm25(mut self, k1: f64, b: f64) -> Self {
        self.k1 = k1;
        self.b = b;
        self
    }

    /// Builder: set the BM25 signal weight
    pub fn with_bm25_weight(mut self, weight: f64) -> Self {
        self.bm25_weight = weight;
        self
    }

    /// Builder: set the char n-gram cosine weight
    pub fn with_char_weight(mut self, weight: f64) -> Self {
        self.char_weight = weight;
        self
    }

    /// Builder: set the relevance prior weight
    pub fn with_humor_weight(mut self, weight: f64) -> Self {
        self.humor_weight = weight;
        self
    }

    /// Builder: set the exact-match bonus
    pub fn with_match_boost(mut self, boost: f64) -> Self {
        self.match_boost = boost;
        self
    }
}

// ============================================================================
// NgramRange
// ============================================================================

/// Inclusive range of character n-gram lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NgramRange {
    /// Shortest n-gram length
    pub min_n: usize,
    /// Longest n-gram length
    pub max_n: usize,
}

impl Default for NgramRange {
    fn default() -> Self {
        NgramRange { min_n: 3, max_n: 5 }
    }
}

impl NgramRange {
    /// Create a new range
    pub fn new(min_n: usize, max_n: usize) -> Self {
        NgramRange { min_n, max_n }
    }

    /// Check `1 <= min_n <= max_n`
    pub fn validate(&self) -> Result<()> {
        if self.min_n == 0 || self.min_n > self.max_n {
            return Err(Error::invalid_config(format!(
                "n-gram range {}..={} must satisfy 1 <= min_n <= max_n",
                self.min_n, self.max_n
            )));
        }
        Ok(())
    }
}

// ============================================================================
// TuningGrid
// ============================================================================

/// Candidate values searched for each tunable parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningGrid {
    /// Candidates for `k1`
    pub k1: Vec<f64>,
    /// Candidates for `b`
    pub b: Vec<f64>,
    /// Candidates for `char_weight`
    pub char_weight: Vec<f64>,
    /// Candidates for `humor_weight`
    pub humor_weight: Vec<f64>,
    /// Candidates for `match_boost`
    pub match_boost: Vec<f64>,
}

impl Default for TuningGrid {
    fn default() -> Self {
        TuningGrid {
            k1: vec![1.2, 1.5, 1.8],
            b: vec![0.6, 0.75, 0.9],
            char_weight: vec![0.2, 0.35, 0.5],
            humor_weight: vec![0.1, 0.2, 0.4],
            match_boost: vec![0.05, 0.1, 0.2],
        }
    }
}

impl TuningGrid {
    /// A grid holding exactly one candidate
    pub fn single(params: HybridParams) -> Self {
        TuningGrid {
            k1: vec![params.k1],
            b: vec![params.b],
            char_weight: vec![params.char_weight],
            humor_weight: vec![params.humor_weight],
            match_boost: vec![params.match_boost],
        }
    }

    fn axes(&self) -> [(&'static str, &[f64]); 5] {
        [
            ("k1", self.k1.as_slice()),
            ("b", self.b.as_slice()),
            ("char_weight", self.char_weight.as_slice()),
            ("humor_weight", self.humor_weight.as_slice()),
            ("match_boost", self.match_boost.as_slice()),
        ]
    }

    /// Number of candidates (product of the axis sizes)
    pub fn len(&self) -> usize {
        self.axes().iter().map(|(_, values)| values.len()).product()
    }

    /// Whether the grid has no candidates
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reject grids with an empty axis
    pub fn validate(&self) -> Result<()> {
        for (name, values) in self.axes() {
            if values.is_empty() {
                return Err(Error::invalid_config(format!("grid axis '{}' is empty", name)));
            }
        }
        Ok(())
    }

    /// Enumerate the Cartesian product
    ///
    /// `k1` varies slowest and `match_boost` fastest. Fields outside the
    /// grid (`bm25_weight`) are copied from `base`.
    pub fn candidates(&self, base: HybridParams) -> Vec<HybridParams> {
        let mut out = Vec::with_capacity(self.len());
        for &k1 in &self.k1 {
            for &b in &self.b {
                for &char_weight in &self.char_weight {
                    for &humor_weight in &self.humor_weight {
                        for &match_boost in &self.match_boost {
                            out.push(HybridParams {
                                k1,
                                b,
                                char_weight,
                                humor_weight,
                                match_boost,
                                ..base
                            });
                        }
                    }
                }
            }
        }
        out
    }
}

// ============================================================================
// TuneConfig
// ============================================================================

/// Settings for the train/validation grid search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuneConfig {
    /// Fraction of distinct queries held out for validation
    pub valid_ratio: f64,
    /// Seed for the query shuffle
    pub seed: u64,
    /// Results kept per validation query; also the K of MAP@K
    pub top_k: usize,
    /// Evaluate grid candidates on a worker pool
    pub parallel: bool,
    /// Candidate values
    pub grid: TuningGrid,
}

impl Default for TuneConfig {
    fn default() -> Self {
        TuneConfig {
            valid_ratio: 0.2,
            seed: 13,
            top_k: DEFAULT_TOP_K,
            parallel: true,
            grid: TuningGrid::default(),
        }
    }
}

impl TuneConfig {
    /// Builder: set the grid
    pub fn with_grid(mut self, grid: TuningGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Builder: set the validation split
    pub fn with_split(mut self, valid_ratio: f64, seed: u64) -> Self {
        self.valid_ratio = valid_ratio;
        self.seed = seed;
        self
    }

    /// Builder: set top-k
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Builder: enable or disable parallel trials
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the split ratio and the grid
    pub fn validate(&self) -> Result<()> {
        if !(self.valid_ratio > 0.0 && self.valid_ratio <= 1.0) {
            return Err(Error::invalid_config(format!(
                "valid_ratio must be in (0, 1], got {}",
                self.valid_ratio
            )));
        }
        self.grid.validate()
    }
}

// ============================================================================
// JokerankConfig
// ============================================================================

/// Top-level configuration loaded from `jokerank.toml`
///
/// # Example
///
/// ```toml
/// top_k = 1000
///
/// [params]
/// k1 = 1.5
/// b = 0.75
///
/// [tuning]
/// seed = 13
///
/// [tuning.grid]
/// k1 = [1.2, 1.5]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JokerankConfig {
    /// Results kept per query when producing predictions
    pub top_k: usize,
    /// Scorer parameters used when not auto-tuning
    pub params: HybridParams,
    /// Character n-gram lengths used by the index
    pub ngram: NgramRange,
    /// Grid search settings
    pub tuning: TuneConfig,
}

impl Default for JokerankConfig {
    fn default() -> Self {
        JokerankConfig {
            top_k: DEFAULT_TOP_K,
            params: HybridParams::default(),
            ngram: NgramRange::default(),
            tuning: TuneConfig::default(),
        }
    }
}

impl JokerankConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# jokerank configuration
#
# Results kept per query in the prediction file.
top_k = 1000

# Scorer parameters used when auto-tuning is off.
[params]
k1 = 1.5
b = 0.75
bm25_weight = 1.0
char_weight = 0.35
humor_weight = 0.2
match_boost = 0.1

# Character n-gram lengths (inclusive).
[ngram]
min_n = 3
max_n = 5

# Grid search over a query-level train/validation split.
[tuning]
valid_ratio = 0.2
seed = 13
top_k = 1000
parallel = true

[tuning.grid]
k1 = [1.2, 1.5, 1.8]
b = [0.6, 0.75, 0.9]
char_weight = [0.2, 0.35, 0.5]
humor_weight = [0.1, 0.2, 0.4]
match_boost = [0.05, 0.1, 0.2]
"#
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: JokerankConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.ngram.validate()?;
        self.tuning.validate()
    }
}
