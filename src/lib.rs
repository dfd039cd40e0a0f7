//! Demand forecasting over synthetic locality observations.
//!
//! The pipeline synthesizes a year of daily demand, one-hot encodes the
//! locality, fits an ordinary least squares model on a seeded 80/20 split,
//! and extrapolates demand for a short future horizon.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
/// Synthetic observations and neighborhood projections.
pub mod data;
pub mod error;
pub mod features;
pub mod forecast;
/// CSV export.
pub mod io;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod reporting;
pub mod split;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::{ForecastError, Result};
pub use forecast::{ForecastRow, Horizon};
pub use pipeline::ForecastRun;
