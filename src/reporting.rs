//! Plain-text tables for the command-line report.

use std::fmt::Write;

use crate::forecast::ForecastRow;
use crate::pipeline::ForecastRun;

/// Renders the first `limit` encoded observations, one row per line.
pub fn raw_preview(run: &ForecastRun, limit: usize) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<12}{:>10}", "Date", "Demand");
    for col in &run.features.columns {
        let _ = write!(out, "  {col}");
    }
    out.push('\n');

    let rows = limit.min(run.features.rows());
    for i in 0..rows {
        let _ = write!(
            out,
            "{:<12}{:>10.2}",
            run.features.dates[i].to_string(),
            run.features.target[i]
        );
        for (j, col) in run.features.columns.iter().enumerate() {
            let _ = write!(out, "  {:>w$}", run.features.features[[i, j]], w = col.len());
        }
        out.push('\n');
    }
    out
}

/// Renders the intercept and every fitted coefficient.
pub fn coefficient_table(run: &ForecastRun) -> String {
    let mut out = String::from("--- Coefficients ---\n");
    let width = run
        .model
        .columns
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("(intercept)".len());
    let _ = writeln!(out, "{:<width$}  {:>12.4}", "(intercept)", run.model.intercept);
    for (name, coef) in run.model.columns.iter().zip(&run.model.coefficients) {
        let _ = writeln!(out, "{name:<width$}  {coef:>12.4}");
    }
    let _ = write!(out, "reference locality: {}", run.encoder.reference());
    out
}

/// Renders forecast rows as a date / demand table.
pub fn forecast_table(rows: &[ForecastRow]) -> String {
    let mut out = String::from("--- Future Demand ---\n");
    let _ = writeln!(out, "{:<12}{:>18}", "Date", "Predicted Demand");
    for r in rows {
        let _ = writeln!(out, "{:<12}{:>18.2}", r.date.to_string(), r.predicted_demand);
    }
    out
}
