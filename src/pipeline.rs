//! End-to-end forecasting run: synthesize, encode, split, fit, evaluate.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::{ForecastConfig, SplitConfig};
use crate::data::{DemandSynthesizer, Observation};
use crate::error::{ForecastError, Result};
use crate::features::{FeatureEncoder, FeatureMatrix};
use crate::forecast::{ForecastRow, FuturePredictor, Horizon};
use crate::metrics::EvaluationReport;
use crate::model::LinearModel;
use crate::split::{SplitIndices, train_test_split};

/// Actual and predicted demand for one held-out row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestPrediction {
    /// Observation date.
    pub date: NaiveDate,
    /// Observed demand.
    pub actual_demand: f64,
    /// Model prediction.
    pub predicted_demand: f64,
}

/// Everything produced by one forecasting run.
#[derive(Debug, Clone)]
pub struct ForecastRun {
    /// Observations the model was trained and evaluated on.
    pub observations: Vec<Observation>,
    /// Encoder fitted on all observations.
    pub encoder: FeatureEncoder,
    /// Encoded observations in date order.
    pub features: FeatureMatrix,
    /// Train/test row partition.
    pub split: SplitIndices,
    /// Model fitted on the train rows.
    pub model: LinearModel,
    /// Held-out error metrics.
    pub evaluation: EvaluationReport,
    /// Held-out predictions sorted by date.
    pub test_predictions: Vec<TestPrediction>,
}

impl ForecastRun {
    /// Synthesizes observations from `cfg` and trains on them.
    ///
    /// # Errors
    ///
    /// Propagates any encoding, split, or fitting error.
    pub fn from_config(cfg: &ForecastConfig) -> Result<Self> {
        let observations = DemandSynthesizer::new(&cfg.synthesis).generate();
        info!(
            rows = observations.len(),
            seeded = cfg.synthesis.seed.is_some(),
            "synthesized demand"
        );
        Self::from_observations(observations, &cfg.split)
    }

    /// Encodes, splits, fits, and evaluates the given observations.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::EmptyDataset`], [`ForecastError::TooFewLocalities`],
    /// or [`ForecastError::DegenerateSplit`] for unusable input.
    pub fn from_observations(observations: Vec<Observation>, split: &SplitConfig) -> Result<Self> {
        let encoder = FeatureEncoder::fit(&observations)?;
        let features = encoder.encode(&observations)?;

        let split_idx = train_test_split(features.rows(), split.test_fraction, split.seed)?;
        let train = features.select(&split_idx.train);
        let test = features.select(&split_idx.test);
        info!(
            train = train.rows(),
            test = test.rows(),
            features = encoder.n_features(),
            "split dataset"
        );

        let model = LinearModel::fit(&train.features, &train.target, &train.columns)?;
        let predicted = model.predict(&test.features)?;
        let actual = test.target.to_vec();
        let predicted = predicted.to_vec();
        let evaluation = EvaluationReport::from_predictions(&actual, &predicted, train.rows());
        info!(mae = evaluation.mae, rmse = evaluation.rmse, "evaluated model");

        let mut test_predictions: Vec<TestPrediction> = test
            .dates
            .iter()
            .zip(actual.iter().zip(&predicted))
            .map(|(&date, (&actual_demand, &predicted_demand))| TestPrediction {
                date,
                actual_demand,
                predicted_demand,
            })
            .collect();
        test_predictions.sort_by_key(|p| p.date);

        Ok(Self {
            observations,
            encoder,
            features,
            split: split_idx,
            model,
            evaluation,
            test_predictions,
        })
    }

    /// Returns a predictor anchored after the last observation.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::EmptyDataset`] if there are no observations.
    pub fn predictor(&self) -> Result<FuturePredictor<'_>> {
        let last_date = self.features.last_date().ok_or(ForecastError::EmptyDataset)?;
        let last_doy = self
            .features
            .max_day_of_year()
            .ok_or(ForecastError::EmptyDataset)?;
        Ok(FuturePredictor::new(
            &self.model,
            &self.encoder,
            last_date,
            last_doy,
        ))
    }

    /// Forecasts demand for `horizon` days after the last observation.
    ///
    /// # Errors
    ///
    /// See [`FuturePredictor::predict`].
    pub fn forecast(&self, horizon: Horizon, locality: Option<&str>) -> Result<Vec<ForecastRow>> {
        let rows = self.predictor()?.predict(horizon, locality)?;
        info!(
            days = horizon.days(),
            locality = locality.unwrap_or(self.encoder.reference()),
            "forecast future demand"
        );
        Ok(rows)
    }
}
