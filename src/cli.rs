use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, ForecastConfig};

/// Demand forecasting over synthetic locality data.
#[derive(Debug, Parser)]
#[command(name = "demand-forecast", version, about)]
pub struct CliOptions {
    /// Load configuration from a TOML file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Use a built-in preset (pune, compact, reproducible)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Seed the synthetic demand draw (default: unseeded)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seed for the train/test split
    #[arg(long)]
    pub split_seed: Option<u64>,

    /// Days ahead to forecast (1-30)
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Forecast for this locality instead of the reference one
    #[arg(long)]
    pub locality: Option<String>,

    /// Write the forecast table to CSV
    #[arg(long, value_name = "PATH")]
    pub forecast_out: Option<PathBuf>,

    /// Write held-out actual vs predicted demand to CSV
    #[arg(long, value_name = "PATH")]
    pub predictions_out: Option<PathBuf>,

    /// Neighborhood projection CSV to load
    #[arg(long, value_name = "PATH")]
    pub neighborhoods: Option<PathBuf>,

    /// Print the first N encoded rows
    #[arg(long, value_name = "ROWS", num_args = 0..=1, default_missing_value = "5")]
    pub show_raw: Option<usize>,

    /// Open the interactive terminal dashboard
    #[cfg(feature = "tui")]
    #[arg(long)]
    pub tui: bool,

    /// Serve the REST API after the run
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

impl CliOptions {
    /// Resolves the configuration source, applies overrides, and validates.
    ///
    /// `--config` takes priority, then `--preset`, then the `pune` preset.
    ///
    /// # Errors
    ///
    /// Returns every configuration error found.
    pub fn load_config(&self) -> Result<ForecastConfig, Vec<ConfigError>> {
        let mut cfg = if let Some(path) = &self.config {
            ForecastConfig::from_toml_file(path).map_err(|e| vec![e])?
        } else if let Some(name) = &self.preset {
            ForecastConfig::from_preset(name).map_err(|e| vec![e])?
        } else {
            ForecastConfig::pune()
        };

        if let Some(seed) = self.seed {
            cfg.synthesis.seed = Some(seed);
        }
        if let Some(seed) = self.split_seed {
            cfg.split.seed = seed;
        }
        if let Some(days) = self.horizon {
            cfg.forecast.horizon = days;
        }

        let errors = cfg.validate();
        if errors.is_empty() { Ok(cfg) } else { Err(errors) }
    }
}
