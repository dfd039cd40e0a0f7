//! File input/output.

/// CSV export of forecasts and held-out predictions.
pub mod export;
