//! Seeded shuffle split into train and test row indices.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::error::{ForecastError, Result};

/// Row indices of a train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    /// Rows used for fitting.
    pub train: Vec<usize>,
    /// Held-out rows used for evaluation.
    pub test: Vec<usize>,
}

/// Number of test rows for `rows` observations: `ceil(test_fraction * rows)`.
pub fn test_rows(rows: usize, test_fraction: f64) -> usize {
    (test_fraction * rows as f64).ceil() as usize
}

/// Splits `rows` indices into train and test sets.
///
/// A seeded permutation of `0..rows` is drawn; its first
/// `ceil(test_fraction * rows)` entries form the test set and the remainder
/// the train set. The seed affects only the split.
///
/// # Errors
///
/// Returns [`ForecastError::DegenerateSplit`] if either side would be empty.
pub fn train_test_split(rows: usize, test_fraction: f64, seed: u64) -> Result<SplitIndices> {
    let n_test = test_rows(rows, test_fraction);
    if !(test_fraction > 0.0 && test_fraction < 1.0) || n_test == 0 || n_test >= rows {
        return Err(ForecastError::DegenerateSplit {
            rows,
            test_fraction,
        });
    }

    let mut perm: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    perm.shuffle(&mut rng);

    let train = perm.split_off(n_test);
    Ok(SplitIndices { train, test: perm })
}
