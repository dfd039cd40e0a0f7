//! TOML-based forecast configuration and preset definitions.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::forecast::Horizon;

/// Localities used by the built-in presets.
pub const DEFAULT_LOCALITIES: &[&str] = &["Hinjewadi", "Baner", "Viman Nagar", "Kothrud", "Magarpatta"];

/// Top-level forecast configuration parsed from TOML.
///
/// All fields have defaults matching the `pune` preset. Load from TOML with
/// [`ForecastConfig::from_toml_file`] or use [`ForecastConfig::pune`] for
/// the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastConfig {
    /// Synthetic observation parameters.
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    /// Train/test split parameters.
    #[serde(default)]
    pub split: SplitConfig,
    /// Future prediction parameters.
    #[serde(default)]
    pub forecast: HorizonConfig,
}

/// Synthetic observation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthesisConfig {
    /// First observed date.
    pub start_date: NaiveDate,
    /// Number of consecutive days to generate (must be > 0).
    pub days: usize,
    /// Inclusive lower bound of the uniform base demand.
    pub base_min: i64,
    /// Exclusive upper bound of the uniform base demand.
    pub base_max: i64,
    /// Amplitude of the seasonal sine component.
    pub amplitude: f64,
    /// End of the sine argument range; the argument runs from 0 to this value.
    pub phase_span: f64,
    /// Locality labels drawn uniformly per day.
    pub localities: Vec<String>,
    /// Seed for the demand and locality draws. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            days: 365,
            base_min: 50,
            base_max: 500,
            amplitude: 50.0,
            phase_span: 10.0,
            localities: DEFAULT_LOCALITIES.iter().map(|s| (*s).to_string()).collect(),
            seed: None,
        }
    }
}

/// Train/test split parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    /// Fraction of rows held out for evaluation (0.0–1.0, exclusive).
    pub test_fraction: f64,
    /// Seed for the split permutation.
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Future prediction parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HorizonConfig {
    /// Days ahead to predict.
    pub horizon: usize,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            horizon: Horizon::DEFAULT_DAYS,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"synthesis.days"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ForecastConfig {
    /// Returns the default scenario: one year over five Pune localities.
    pub fn pune() -> Self {
        Self {
            synthesis: SynthesisConfig::default(),
            split: SplitConfig::default(),
            forecast: HorizonConfig::default(),
        }
    }

    /// Returns a one-quarter scenario over three localities.
    pub fn compact() -> Self {
        Self {
            synthesis: SynthesisConfig {
                days: 90,
                localities: DEFAULT_LOCALITIES[..3]
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect(),
                ..SynthesisConfig::default()
            },
            split: SplitConfig::default(),
            forecast: HorizonConfig::default(),
        }
    }

    /// Returns the default scenario with a fixed synthesis seed.
    pub fn reproducible() -> Self {
        Self {
            synthesis: SynthesisConfig {
                seed: Some(7),
                ..SynthesisConfig::default()
            },
            ..Self::pune()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["pune", "compact", "reproducible"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "pune" => Ok(Self::pune()),
            "compact" => Ok(Self::compact()),
            "reproducible" => Ok(Self::reproducible()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Localities are
    /// checked as configured, not as drawn: a short run can still pick a
    /// single label for every day, in which case
    /// [`ForecastRun::from_config`](crate::pipeline::ForecastRun::from_config)
    /// fails with [`TooFewLocalities`](crate::error::ForecastError::TooFewLocalities).
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.synthesis;

        if s.days == 0 {
            errors.push(ConfigError {
                field: "synthesis.days".into(),
                message: "must be > 0".into(),
            });
        }
        if s.base_min >= s.base_max {
            errors.push(ConfigError {
                field: "synthesis.base_min".into(),
                message: "must be < synthesis.base_max".into(),
            });
        }
        if !s.amplitude.is_finite() {
            errors.push(ConfigError {
                field: "synthesis.amplitude".into(),
                message: "must be finite".into(),
            });
        }
        if s.amplitude.is_finite() && (s.base_min as f64) - s.amplitude.abs() < 0.0 {
            errors.push(ConfigError {
                field: "synthesis.amplitude".into(),
                message: format!(
                    "|amplitude| {} exceeds base_min {}, demand could go negative",
                    s.amplitude.abs(),
                    s.base_min
                ),
            });
        }
        if !s.phase_span.is_finite() {
            errors.push(ConfigError {
                field: "synthesis.phase_span".into(),
                message: "must be finite".into(),
            });
        }
        let distinct: BTreeSet<&str> = s.localities.iter().map(String::as_str).collect();
        if distinct.len() < 2 {
            errors.push(ConfigError {
                field: "synthesis.localities".into(),
                message: format!("need at least 2 distinct labels, got {}", distinct.len()),
            });
        }

        let sp = &self.split;
        if !(sp.test_fraction > 0.0 && sp.test_fraction < 1.0) {
            errors.push(ConfigError {
                field: "split.test_fraction".into(),
                message: "must be in (0.0, 1.0)".into(),
            });
        } else if s.days > 0 {
            let n_test = crate::split::test_rows(s.days, sp.test_fraction);
            if n_test == 0 || n_test >= s.days {
                errors.push(ConfigError {
                    field: "split.test_fraction".into(),
                    message: format!("leaves an empty train or test side for {} days", s.days),
                });
            }
        }

        if Horizon::new(self.forecast.horizon).is_err() {
            errors.push(ConfigError {
                field: "forecast.horizon".into(),
                message: format!(
                    "must be in [{}, {}], got {}",
                    Horizon::MIN_DAYS,
                    Horizon::MAX_DAYS,
                    self.forecast.horizon
                ),
            });
        }

        errors
    }
}
