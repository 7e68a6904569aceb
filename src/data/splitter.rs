//! Data Splitter Module
//! Separates features from the label and partitions rows into train/test sets.

use super::Dataset;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

pub const DEFAULT_TEST_FRACTION: f64 = 0.3;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("test_fraction must be in (0, 1), got {0}")]
    InvalidFraction(f64),
    #[error("Need at least 2 rows to split, got {0}")]
    TooFewRows(usize),
    #[error("Need at least one feature column and a label column, got {0} column(s)")]
    TooFewColumns(usize),
}

/// Split settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOptions {
    /// Fraction of rows held out for testing
    pub test_fraction: f64,
    /// Shuffle seed
    pub seed: u64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

/// Train/test views of a dataset. Row `i` of each features frame lines up
/// with element `i` of the matching labels series.
#[derive(Debug, Clone)]
pub struct Split {
    pub train_features: DataFrame,
    pub test_features: DataFrame,
    pub train_labels: Series,
    pub test_labels: Series,
    /// Source-row index of each training row
    pub train_indices: Vec<usize>,
    /// Source-row index of each testing row
    pub test_indices: Vec<usize>,
}

impl Split {
    /// (train_X, test_X, train_y, test_y)
    pub fn into_parts(self) -> (DataFrame, DataFrame, Series, Series) {
        (
            self.train_features,
            self.test_features,
            self.train_labels,
            self.test_labels,
        )
    }
}

/// Split a dataset into features/label and train/test rows.
pub fn split_data(dataset: &Dataset, options: SplitOptions) -> Result<Split, SplitError> {
    let fraction = options.test_fraction;
    if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 {
        return Err(SplitError::InvalidFraction(fraction));
    }
    let (n_rows, n_cols) = dataset.shape();
    if n_rows < 2 {
        return Err(SplitError::TooFewRows(n_rows));
    }
    if n_cols < 2 {
        return Err(SplitError::TooFewColumns(n_cols));
    }

    let (train_indices, test_indices) = shuffle_indices(n_rows, fraction, options.seed);

    let features = dataset.features()?;
    let label = dataset.label().ok_or(SplitError::TooFewColumns(n_cols))?;

    let train_idx = to_idx_ca(&train_indices);
    let test_idx = to_idx_ca(&test_indices);

    let split = Split {
        train_features: features.take(&train_idx)?,
        test_features: features.take(&test_idx)?,
        train_labels: label.take(&train_idx)?,
        test_labels: label.take(&test_idx)?,
        train_indices,
        test_indices,
    };

    log::info!(
        "Split {} rows into {} train / {} test (seed {})",
        n_rows,
        split.train_indices.len(),
        split.test_indices.len(),
        options.seed
    );
    Ok(split)
}

/// Number of held-out rows: round(n * fraction), keeping both sides non-empty.
fn test_count(n_rows: usize, fraction: f64) -> usize {
    let n_test = (n_rows as f64 * fraction).round() as usize;
    n_test.clamp(1, n_rows - 1)
}

/// Seeded permutation of 0..n_rows; the first `n_test` go to the test side.
fn shuffle_indices(n_rows: usize, fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = test_count(n_rows, fraction);
    let train = indices.split_off(n_test);
    (train, indices)
}

fn to_idx_ca(indices: &[usize]) -> IdxCa {
    IdxCa::from_vec(
        "idx".into(),
        indices.iter().map(|&i| i as IdxSize).collect(),
    )
}
