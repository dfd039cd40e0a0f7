//! Error types for the forecasting pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors raised while synthesizing, encoding, fitting, or extrapolating.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No observations were available to encode or fit.
    #[error("dataset is empty")]
    EmptyDataset,

    /// One-hot encoding needs a reference plus at least one indicator.
    #[error("need at least 2 distinct localities, found {found}")]
    TooFewLocalities {
        /// Number of distinct localities seen.
        found: usize,
    },

    /// Forecast horizon outside the supported range.
    #[error("horizon {days} is out of range (expected {min}..={max})")]
    HorizonOutOfRange {
        /// Requested horizon in days.
        days: usize,
        /// Smallest accepted horizon.
        min: usize,
        /// Largest accepted horizon.
        max: usize,
    },

    /// Locality label not seen during encoding.
    #[error("unknown locality \"{0}\"")]
    UnknownLocality(String),

    /// Feature matrix and target or coefficient dimensions disagree.
    #[error("dimension mismatch: expected {expected} {what}, got {actual}")]
    DimensionMismatch {
        /// What was being compared (rows, columns).
        what: &'static str,
        /// Expected size.
        expected: usize,
        /// Actual size.
        actual: usize,
    },

    /// The train/test split would leave one side empty.
    #[error("split of {rows} rows with test fraction {test_fraction} leaves an empty side")]
    DegenerateSplit {
        /// Total number of rows.
        rows: usize,
        /// Requested test fraction.
        test_fraction: f64,
    },

    /// Input file could not be opened or read.
    #[error("cannot read \"{}\": {source}", path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// CSV parse or write failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
