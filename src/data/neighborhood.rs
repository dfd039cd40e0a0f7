use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ForecastError, Result};

/// Projected population and online order volume for one neighborhood.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NeighborhoodProjection {
    /// Neighborhood name.
    #[serde(rename = "Neighborhood")]
    pub neighborhood: String,
    /// Projected resident population.
    #[serde(rename = "Projected Population")]
    pub projected_population: f64,
    /// Predicted online order volume.
    #[serde(rename = "Predicted Online Order Volume")]
    pub predicted_order_volume: f64,
}

impl NeighborhoodProjection {
    /// Orders per resident, or 0 for an empty neighborhood.
    pub fn orders_per_capita(&self) -> f64 {
        if self.projected_population > 0.0 {
            self.predicted_order_volume / self.projected_population
        } else {
            0.0
        }
    }
}

/// Loads neighborhood projections from a CSV file with a header row.
///
/// # Errors
///
/// Returns [`ForecastError::Io`] if the file cannot be opened and
/// [`ForecastError::Csv`] if a row does not match the expected columns.
pub fn load_neighborhoods(path: &Path) -> Result<Vec<NeighborhoodProjection>> {
    let file = File::open(path).map_err(|source| ForecastError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = read_neighborhoods(file)?;
    info!(path = %path.display(), rows = rows.len(), "loaded neighborhood projections");
    Ok(rows)
}

/// Reads neighborhood projections from any CSV source.
///
/// # Errors
///
/// Returns [`ForecastError::Csv`] on malformed input.
pub fn read_neighborhoods(reader: impl Read) -> Result<Vec<NeighborhoodProjection>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
