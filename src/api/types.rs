//! API response and query types.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::data::Observation;
use crate::metrics::EvaluationReport;

/// Evaluation metrics plus the fitted model.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    /// Held-out MAE/RMSE and split sizes.
    pub evaluation: EvaluationReport,
    /// Fitted intercept.
    pub intercept: f64,
    /// Coefficient per feature column, in fit order.
    pub coefficients: Vec<CoefficientRecord>,
    /// Locality represented by all-zero indicators.
    pub reference_locality: String,
}

/// One named coefficient.
#[derive(Debug, Serialize)]
pub struct CoefficientRecord {
    /// Feature column name.
    pub column: String,
    /// Fitted value.
    pub value: f64,
}

/// One observation with its encoded feature row.
#[derive(Debug, Serialize)]
pub struct ObservationRecord {
    /// Observation date.
    pub date: NaiveDate,
    /// Locality label.
    pub locality: String,
    /// Observed demand.
    pub demand: f64,
    /// Day-of-year feature.
    pub day_of_year: u32,
    /// Encoded feature values keyed by training column name.
    pub encoded: BTreeMap<String, f64>,
}

impl ObservationRecord {
    /// Pairs an observation with its row of the training feature matrix.
    pub fn encoded(o: &Observation, columns: &[String], row: ArrayView1<'_, f64>) -> Self {
        Self {
            date: o.date,
            locality: o.locality.clone(),
            demand: o.demand,
            day_of_year: o.date.ordinal(),
            encoded: columns.iter().cloned().zip(row.iter().copied()).collect(),
        }
    }
}

/// Row limit for the observation preview.
#[derive(Debug, Deserialize)]
pub struct ObservationQuery {
    /// Maximum rows to return (default 5).
    pub limit: Option<usize>,
}

/// Horizon and locality for an on-demand forecast.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Days ahead (default 7).
    pub days: Option<usize>,
    /// Locality to forecast for (default: reference locality).
    pub locality: Option<String>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
