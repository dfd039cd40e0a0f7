//! Future-horizon demand extrapolation.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::{ForecastError, Result};
use crate::features::FeatureEncoder;
use crate::model::LinearModel;

/// Number of days to forecast, bounded to `1..=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Horizon(usize);

impl Horizon {
    /// Smallest accepted horizon.
    pub const MIN_DAYS: usize = 1;
    /// Largest accepted horizon.
    pub const MAX_DAYS: usize = 30;
    /// Horizon used when none is chosen.
    pub const DEFAULT_DAYS: usize = 7;

    /// Validates a horizon in days.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::HorizonOutOfRange`] outside `1..=30`.
    pub fn new(days: usize) -> Result<Self> {
        if (Self::MIN_DAYS..=Self::MAX_DAYS).contains(&days) {
            Ok(Self(days))
        } else {
            Err(ForecastError::HorizonOutOfRange {
                days,
                min: Self::MIN_DAYS,
                max: Self::MAX_DAYS,
            })
        }
    }

    /// Horizon length in days.
    pub fn days(self) -> usize {
        self.0
    }

    /// One day longer, capped at the maximum.
    pub fn increment(self) -> Self {
        Self((self.0 + 1).min(Self::MAX_DAYS))
    }

    /// One day shorter, floored at the minimum.
    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN_DAYS))
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}

/// Predicted demand for one future date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    /// Future calendar date.
    pub date: NaiveDate,
    /// Day-of-year feature used for the prediction (may exceed 366).
    pub day_of_year: u32,
    /// Model output for this date.
    pub predicted_demand: f64,
}

/// Extrapolates a fitted model past the last observed date.
///
/// Day-of-year keeps counting from the largest observed value without
/// wrapping at year end.
#[derive(Debug, Clone, Copy)]
pub struct FuturePredictor<'a> {
    model: &'a LinearModel,
    encoder: &'a FeatureEncoder,
    last_date: NaiveDate,
    last_day_of_year: u32,
}

impl<'a> FuturePredictor<'a> {
    /// Creates a predictor anchored at the last observed date.
    ///
    /// # Arguments
    ///
    /// * `model` - Model fitted on the encoder's columns
    /// * `encoder` - Encoder the model's features came from
    /// * `last_date` - Final observed date; forecasts start the day after
    /// * `last_day_of_year` - Largest observed day-of-year
    pub fn new(
        model: &'a LinearModel,
        encoder: &'a FeatureEncoder,
        last_date: NaiveDate,
        last_day_of_year: u32,
    ) -> Self {
        Self {
            model,
            encoder,
            last_date,
            last_day_of_year,
        }
    }

    /// Predicts demand for each day of the horizon.
    ///
    /// With `locality = None` the locality indicators are zero-filled, so the
    /// prediction is for the reference locality.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::UnknownLocality`] for an unseen label or
    /// [`ForecastError::DimensionMismatch`] if the model and encoder disagree.
    pub fn predict(&self, horizon: Horizon, locality: Option<&str>) -> Result<Vec<ForecastRow>> {
        let n = horizon.days();
        let days: Vec<u32> = (1..=n as u32).map(|k| self.last_day_of_year + k).collect();
        let frame = self.encoder.encode_future(&days, locality)?;
        let predicted = self.model.predict(&frame)?;

        let mut rows = Vec::with_capacity(n);
        let mut date = self.last_date;
        for (doy, &value) in days.into_iter().zip(predicted.iter()) {
            date = date.checked_add_days(Days::new(1)).unwrap_or(date);
            rows.push(ForecastRow {
                date,
                day_of_year: doy,
                predicted_demand: value,
            });
        }
        Ok(rows)
    }
}
