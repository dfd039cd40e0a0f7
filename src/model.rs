//! Ordinary least squares linear regression with an intercept.

use ndarray::{Array1, Array2, Axis};
use serde::Serialize;
use tracing::debug;

use crate::error::{ForecastError, Result};

/// Relative pivot threshold below which a direction is treated as degenerate.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// A fitted linear model `y = intercept + x · coefficients`.
///
/// Immutable once fitted. Coefficients are stored in column order alongside
/// the column names they were fitted on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearModel {
    /// Fitted intercept.
    pub intercept: f64,
    /// One coefficient per feature column.
    pub coefficients: Vec<f64>,
    /// Feature column names in fit order.
    pub columns: Vec<String>,
}

impl LinearModel {
    /// Fits OLS coefficients of `y` on `x`.
    ///
    /// Features and target are centered, the normal equations are solved by
    /// Gauss-Jordan elimination with partial pivoting, and the intercept is
    /// recovered from the means. Columns whose pivot collapses (constant or
    /// collinear features) get a zero coefficient.
    ///
    /// # Arguments
    ///
    /// * `x` - Feature matrix, one row per observation
    /// * `y` - Target vector with one entry per row of `x`
    /// * `columns` - Names of the columns of `x`
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::EmptyDataset`] for zero rows and
    /// [`ForecastError::DimensionMismatch`] if the shapes disagree.
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>, columns: &[String]) -> Result<Self> {
        let (n, p) = x.dim();
        if n == 0 {
            return Err(ForecastError::EmptyDataset);
        }
        if y.len() != n {
            return Err(ForecastError::DimensionMismatch {
                what: "target rows",
                expected: n,
                actual: y.len(),
            });
        }
        if columns.len() != p {
            return Err(ForecastError::DimensionMismatch {
                what: "column names",
                expected: p,
                actual: columns.len(),
            });
        }

        let x_mean = x.mean_axis(Axis(0)).ok_or(ForecastError::EmptyDataset)?;
        let y_mean = y.mean().ok_or(ForecastError::EmptyDataset)?;
        let xc = x - &x_mean;
        let yc = y - y_mean;

        let xtx = xc.t().dot(&xc);
        let xty = xc.t().dot(&yc);
        let beta = solve_normal_equations(xtx, xty);
        let intercept = y_mean - x_mean.dot(&beta);

        debug!(rows = n, features = p, intercept, "fitted linear model");
        Ok(Self {
            intercept,
            coefficients: beta.to_vec(),
            columns: columns.to_vec(),
        })
    }

    /// Predicts the target for each row of `x`.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::DimensionMismatch`] if `x` does not have one
    /// column per coefficient.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.coefficients.len() {
            return Err(ForecastError::DimensionMismatch {
                what: "feature columns",
                expected: self.coefficients.len(),
                actual: x.ncols(),
            });
        }
        let beta = Array1::from(self.coefficients.clone());
        Ok(x.dot(&beta) + self.intercept)
    }

    /// Coefficient fitted for the named column.
    pub fn coefficient(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.coefficients[i])
    }
}

/// Solves the symmetric system `a · beta = b`, zeroing degenerate directions.
fn solve_normal_equations(mut a: Array2<f64>, mut b: Array1<f64>) -> Array1<f64> {
    let p = b.len();
    let scale = a.diag().iter().fold(1.0_f64, |m, v| m.max(v.abs()));
    let tol = PIVOT_TOLERANCE * scale;

    let mut pivot_cols = Vec::with_capacity(p);
    let mut row = 0;
    for col in 0..p {
        if row == p {
            break;
        }
        let (best, best_abs) = (row..p)
            .map(|r| (r, a[[r, col]].abs()))
            .fold((row, -1.0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });
        if best_abs <= tol {
            continue;
        }
        if best != row {
            for k in 0..p {
                a.swap([row, k], [best, k]);
            }
            b.swap(row, best);
        }

        let inv = 1.0 / a[[row, col]];
        for k in 0..p {
            a[[row, k]] *= inv;
        }
        b[row] *= inv;

        for r in 0..p {
            if r == row {
                continue;
            }
            let factor = a[[r, col]];
            if factor == 0.0 {
                continue;
            }
            for k in 0..p {
                a[[r, k]] -= factor * a[[row, k]];
            }
            b[r] -= factor * b[row];
        }
        pivot_cols.push(col);
        row += 1;
    }

    let mut beta = Array1::<f64>::zeros(p);
    for (r, &col) in pivot_cols.iter().enumerate() {
        beta[col] = b[r];
    }
    beta
}
