//! Held-out error metrics.

use std::fmt;

use serde::Serialize;

/// Error metrics computed on the held-out test split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Mean absolute error.
    pub mae: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Rows used for fitting.
    pub train_rows: usize,
    /// Rows used for evaluation.
    pub test_rows: usize,
}

impl EvaluationReport {
    /// Computes MAE and RMSE between paired actual and predicted values.
    ///
    /// Pairs beyond the shorter slice are ignored. Both metrics are 0 for an
    /// empty input.
    ///
    /// # Arguments
    ///
    /// * `actual` - Observed values
    /// * `predicted` - Model predictions for the same rows
    /// * `train_rows` - Size of the training split, carried for reporting
    pub fn from_predictions(actual: &[f64], predicted: &[f64], train_rows: usize) -> Self {
        let n = actual.len().min(predicted.len());
        if n == 0 {
            return Self {
                mae: 0.0,
                rmse: 0.0,
                train_rows,
                test_rows: 0,
            };
        }

        let mut abs_sum = 0.0_f64;
        let mut sq_sum = 0.0_f64;
        for (a, p) in actual.iter().zip(predicted) {
            let err = a - p;
            abs_sum += err.abs();
            sq_sum += err * err;
        }

        Self {
            mae: abs_sum / n as f64,
            rmse: (sq_sum / n as f64).sqrt(),
            train_rows,
            test_rows: n,
        }
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Model Performance ---")?;
        writeln!(f, "Mean Absolute Error (MAE):      {:.2}", self.mae)?;
        writeln!(f, "Root Mean Squared Error (RMSE): {:.2}", self.rmse)?;
        write!(
            f,
            "Rows:                           {} train / {} test",
            self.train_rows, self.test_rows
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn mae_and_rmse() {
        // errors: [1, -1, 2, -2] -> mae = 1.5, rmse = sqrt(2.5)
        let actual = [1.0, 1.0, 2.0, 2.0];
        let predicted = [0.0, 2.0, 0.0, 4.0];
        let r = EvaluationReport::from_predictions(&actual, &predicted, 10);
        assert_abs_diff_eq!(r.mae, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(r.rmse, 2.5_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(r.test_rows, 4);
        assert_eq!(r.train_rows, 10);
    }

    #[test]
    fn perfect_predictions_have_zero_error() {
        let v = [3.0, 4.0, 5.0];
        let r = EvaluationReport::from_predictions(&v, &v, 0);
        assert_eq!(r.mae, 0.0);
        assert_eq!(r.rmse, 0.0);
    }

    #[test]
    fn rmse_is_at_least_mae() {
        let r = EvaluationReport::from_predictions(&[0.0, 0.0, 0.0], &[1.0, 5.0, -2.0], 3);
        assert!(r.rmse >= r.mae);
    }

    #[test]
    fn empty_input() {
        let r = EvaluationReport::from_predictions(&[], &[], 5);
        assert_eq!(r.mae, 0.0);
        assert_eq!(r.test_rows, 0);
    }

    #[test]
    fn display_does_not_panic() {
        let r = EvaluationReport::from_predictions(&[1.0], &[2.0], 1);
        let s = format!("{r}");
        assert!(s.contains("MAE"));
        assert!(s.contains("RMSE"));
    }
}
