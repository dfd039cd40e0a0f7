//! Shared test fixtures for integration tests.

use chrono::NaiveDate;
use demand_forecast::ForecastRun;
use demand_forecast::config::ForecastConfig;
use demand_forecast::data::Observation;

/// Full-year Pune configuration with a fixed synthesis seed.
pub fn seeded_config(seed: u64) -> ForecastConfig {
    let mut cfg = ForecastConfig::pune();
    cfg.synthesis.seed = Some(seed);
    cfg
}

/// Runs the pipeline for [`seeded_config`].
pub fn seeded_run(seed: u64) -> ForecastRun {
    ForecastRun::from_config(&seeded_config(seed)).expect("seeded run should succeed")
}

/// Noise-free observations: `demand = 10 + 0.5 * day + offset(locality)`.
///
/// Localities cycle through `A`, `B`, `C` with offsets 0, 20, -5.
pub fn linear_observations(days: u32) -> Vec<Observation> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
    let localities = [("A", 0.0), ("B", 20.0), ("C", -5.0)];
    (0..days)
        .map(|i| {
            let (locality, offset) = localities[i as usize % localities.len()];
            let date = start + chrono::Days::new(u64::from(i));
            Observation {
                date,
                locality: locality.to_string(),
                demand: 10.0 + 0.5 * f64::from(i + 1) + offset,
            }
        })
        .collect()
}
