//! Feature encoding: day-of-year trend plus one-hot locality indicators.
//!
//! Categories are sorted and the first one is dropped as the reference, so an
//! all-zero indicator block denotes the reference locality. Prediction frames
//! are aligned onto the training column list by name; missing columns are
//! zero-filled.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use crate::data::Observation;
use crate::error::{ForecastError, Result};

/// Name of the numeric trend column.
pub const DAY_OF_YEAR: &str = "DayOfYear";

/// Prefix of locality indicator columns.
pub const LOCALITY_PREFIX: &str = "Locality_";

/// Encoded observations: named feature columns, targets, and row dates.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    /// Column names, `DayOfYear` first.
    pub columns: Vec<String>,
    /// Date of each row.
    pub dates: Vec<NaiveDate>,
    /// Row-major feature values, one row per observation.
    pub features: Array2<f64>,
    /// Demand per row.
    pub target: Array1<f64>,
}

impl FeatureMatrix {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.features.nrows()
    }

    /// Returns a new matrix holding only the given rows, in the given order.
    pub fn select(&self, rows: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            dates: rows.iter().map(|&i| self.dates[i]).collect(),
            features: self.features.select(Axis(0), rows),
            target: self.target.select(Axis(0), rows),
        }
    }

    /// Largest day-of-year present, or `None` when empty.
    pub fn max_day_of_year(&self) -> Option<u32> {
        self.features
            .column(0)
            .iter()
            .map(|&d| d as u32)
            .max()
    }

    /// Date of the final row in observation order.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

/// One-hot encoder fitted on a set of observations.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use demand_forecast::data::Observation;
/// use demand_forecast::features::FeatureEncoder;
///
/// let day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let obs = vec![
///     Observation { date: day, locality: "Kothrud".into(), demand: 10.0 },
///     Observation { date: day, locality: "Baner".into(), demand: 12.0 },
/// ];
/// let encoder = FeatureEncoder::fit(&obs).unwrap();
/// assert_eq!(encoder.reference(), "Baner");
/// assert_eq!(encoder.columns(), ["DayOfYear", "Locality_Kothrud"]);
/// ```
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    categories: Vec<String>,
    columns: Vec<String>,
}

impl FeatureEncoder {
    /// Learns the sorted locality categories from the observations.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::EmptyDataset`] for no observations and
    /// [`ForecastError::TooFewLocalities`] when fewer than two distinct
    /// localities occur.
    pub fn fit(observations: &[Observation]) -> Result<Self> {
        if observations.is_empty() {
            return Err(ForecastError::EmptyDataset);
        }
        let categories: Vec<String> = observations
            .iter()
            .map(|o| o.locality.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if categories.len() < 2 {
            return Err(ForecastError::TooFewLocalities {
                found: categories.len(),
            });
        }

        let mut columns = Vec::with_capacity(categories.len());
        columns.push(DAY_OF_YEAR.to_string());
        columns.extend(
            categories[1..]
                .iter()
                .map(|c| format!("{LOCALITY_PREFIX}{c}")),
        );
        debug!(reference = %categories[0], columns = columns.len(), "fitted feature encoder");
        Ok(Self {
            categories,
            columns,
        })
    }

    /// The dropped reference category.
    pub fn reference(&self) -> &str {
        &self.categories[0]
    }

    /// All categories in sorted order, reference first.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Training column names, `DayOfYear` first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of feature columns.
    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    /// Index of the indicator column for `locality`, `None` for the reference.
    fn indicator_index(&self, locality: &str) -> Result<Option<usize>> {
        match self.categories.iter().position(|c| c == locality) {
            Some(0) => Ok(None),
            Some(i) => Ok(Some(i)),
            None => Err(ForecastError::UnknownLocality(locality.to_string())),
        }
    }

    /// Encodes observations into a feature matrix and target vector.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::UnknownLocality`] if an observation carries a
    /// label the encoder was not fitted on.
    pub fn encode(&self, observations: &[Observation]) -> Result<FeatureMatrix> {
        let n = observations.len();
        let mut features = Array2::<f64>::zeros((n, self.n_features()));
        let mut target = Array1::<f64>::zeros(n);
        let mut dates = Vec::with_capacity(n);

        for (row, o) in observations.iter().enumerate() {
            features[[row, 0]] = f64::from(o.date.ordinal());
            if let Some(col) = self.indicator_index(&o.locality)? {
                features[[row, col]] = 1.0;
            }
            target[row] = o.demand;
            dates.push(o.date);
        }

        Ok(FeatureMatrix {
            columns: self.columns.clone(),
            dates,
            features,
            target,
        })
    }

    /// Builds prediction rows for the given day-of-year values.
    ///
    /// With `locality = None` every indicator is zero, which places each row
    /// in the reference locality.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::UnknownLocality`] for an unseen label.
    pub fn encode_future(&self, days_of_year: &[u32], locality: Option<&str>) -> Result<Array2<f64>> {
        let mut columns = vec![DAY_OF_YEAR.to_string()];
        let indicator = match locality {
            Some(label) => self.indicator_index(label)?,
            None => None,
        };
        if let Some(i) = indicator {
            columns.push(format!("{LOCALITY_PREFIX}{}", self.categories[i]));
        }

        let mut frame = Array2::<f64>::zeros((days_of_year.len(), columns.len()));
        for (row, &doy) in days_of_year.iter().enumerate() {
            frame[[row, 0]] = f64::from(doy);
            if indicator.is_some() {
                frame[[row, 1]] = 1.0;
            }
        }
        self.align(&columns, &frame)
    }

    /// Reorders a named-column frame onto the training columns.
    ///
    /// Training columns absent from `columns` are zero-filled; columns the
    /// encoder does not know are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::DimensionMismatch`] when `columns` does not
    /// name every column of `frame`.
    pub fn align(&self, columns: &[String], frame: &Array2<f64>) -> Result<Array2<f64>> {
        if columns.len() != frame.ncols() {
            return Err(ForecastError::DimensionMismatch {
                what: "column names",
                expected: frame.ncols(),
                actual: columns.len(),
            });
        }

        let mut out = Array2::<f64>::zeros((frame.nrows(), self.n_features()));
        for (dst, name) in self.columns.iter().enumerate() {
            match columns.iter().position(|c| c == name) {
                Some(src) => out.column_mut(dst).assign(&frame.column(src)),
                None => debug!(column = %name, "zero-filling missing column"),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(day: u32, locality: &str, demand: f64) -> Observation {
        Observation {
            date: NaiveDate::from_yo_opt(2023, day).unwrap(),
            locality: locality.to_string(),
            demand,
        }
    }

    fn sample() -> Vec<Observation> {
        vec![
            obs(1, "Kothrud", 100.0),
            obs(2, "Baner", 110.0),
            obs(3, "Magarpatta", 120.0),
            obs(4, "Kothrud", 130.0),
        ]
    }

    #[test]
    fn drops_first_sorted_category() {
        let enc = FeatureEncoder::fit(&sample()).unwrap();
        assert_eq!(enc.reference(), "Baner");
        assert_eq!(
            enc.columns(),
            ["DayOfYear", "Locality_Kothrud", "Locality_Magarpatta"]
        );
    }

    #[test]
    fn encodes_day_of_year_and_indicators() {
        let enc = FeatureEncoder::fit(&sample()).unwrap();
        let m = enc.encode(&sample()).unwrap();
        assert_eq!(m.rows(), 4);
        assert_eq!(m.features.row(0).to_vec(), vec![1.0, 1.0, 0.0]);
        assert_eq!(m.features.row(1).to_vec(), vec![2.0, 0.0, 0.0]);
        assert_eq!(m.features.row(2).to_vec(), vec![3.0, 0.0, 1.0]);
        assert_eq!(m.target.to_vec(), vec![100.0, 110.0, 120.0, 130.0]);
        assert_eq!(m.max_day_of_year(), Some(4));
    }

    #[test]
    fn single_locality_is_rejected() {
        let one = vec![obs(1, "Baner", 1.0), obs(2, "Baner", 2.0)];
        assert!(matches!(
            FeatureEncoder::fit(&one),
            Err(ForecastError::TooFewLocalities { found: 1 })
        ));
    }

    #[test]
    fn empty_is_rejected() {
        assert!(matches!(
            FeatureEncoder::fit(&[]),
            Err(ForecastError::EmptyDataset)
        ));
    }

    #[test]
    fn encode_rejects_unseen_locality() {
        let enc = FeatureEncoder::fit(&sample()).unwrap();
        let err = enc.encode(&[obs(5, "Aundh", 1.0)]).unwrap_err();
        assert!(matches!(err, ForecastError::UnknownLocality(l) if l == "Aundh"));
    }

    #[test]
    fn future_rows_zero_fill_indicators() {
        let enc = FeatureEncoder::fit(&sample()).unwrap();
        let f = enc.encode_future(&[366, 367], None).unwrap();
        assert_eq!(f.ncols(), 3);
        assert_eq!(f.row(0).to_vec(), vec![366.0, 0.0, 0.0]);
        assert_eq!(f.row(1).to_vec(), vec![367.0, 0.0, 0.0]);
    }

    #[test]
    fn future_rows_for_named_locality_set_its_indicator() {
        let enc = FeatureEncoder::fit(&sample()).unwrap();
        let f = enc.encode_future(&[10], Some("Magarpatta")).unwrap();
        assert_eq!(f.row(0).to_vec(), vec![10.0, 0.0, 1.0]);
        let r = enc.encode_future(&[10], Some("Baner")).unwrap();
        assert_eq!(r.row(0).to_vec(), vec![10.0, 0.0, 0.0]);
    }

    #[test]
    fn align_reorders_and_drops_unknown_columns() {
        let enc = FeatureEncoder::fit(&sample()).unwrap();
        let columns = vec![
            "Locality_Magarpatta".to_string(),
            "Extra".to_string(),
            "DayOfYear".to_string(),
        ];
        let frame = ndarray::array![[1.0, 9.0, 40.0]];
        let out = enc.align(&columns, &frame).unwrap();
        assert_eq!(out.row(0).to_vec(), vec![40.0, 0.0, 1.0]);
    }

    #[test]
    fn align_rejects_mismatched_names() {
        let enc = FeatureEncoder::fit(&sample()).unwrap();
        let frame = ndarray::array![[1.0, 2.0]];
        assert!(matches!(
            enc.align(&["DayOfYear".to_string()], &frame),
            Err(ForecastError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn select_keeps_requested_rows() {
        let enc = FeatureEncoder::fit(&sample()).unwrap();
        let m = enc.encode(&sample()).unwrap();
        let s = m.select(&[3, 0]);
        assert_eq!(s.rows(), 2);
        assert_eq!(s.target.to_vec(), vec![130.0, 100.0]);
        assert_eq!(s.dates[0], NaiveDate::from_yo_opt(2023, 4).unwrap());
    }
}
