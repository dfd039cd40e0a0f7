//! Dashboard application state.

use tracing::warn;

use crate::config::ForecastConfig;
use crate::data::NeighborhoodProjection;
use crate::error::Result;
use crate::forecast::{ForecastRow, Horizon};
use crate::pipeline::ForecastRun;

/// Which lower panel the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Future demand chart and table.
    Forecast,
    /// Neighborhood projection table.
    Neighborhoods,
}

/// TUI application state.
pub struct App {
    /// Configuration the current run was built from.
    config: ForecastConfig,
    /// Current forecasting run.
    pub run: ForecastRun,
    /// Selected forecast horizon (the slider value).
    pub horizon: Horizon,
    /// Forecast rows for the selected horizon.
    pub forecast: Vec<ForecastRow>,
    /// Neighborhood projections, empty when no CSV was loaded.
    pub neighborhoods: Vec<NeighborhoodProjection>,
    /// Whether the raw data preview replaces the forecast table.
    pub show_raw: bool,
    /// Active lower panel.
    pub view: View,
    /// Number of times the data has been regenerated.
    pub generation: u64,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Runs the pipeline once and builds the initial state.
    ///
    /// # Errors
    ///
    /// Propagates any error from the forecasting run.
    pub fn new(config: ForecastConfig, neighborhoods: Vec<NeighborhoodProjection>) -> Result<Self> {
        let horizon = Horizon::new(config.forecast.horizon)?;
        let run = ForecastRun::from_config(&config)?;
        let forecast = run.forecast(horizon, None)?;
        Ok(Self {
            config,
            run,
            horizon,
            forecast,
            neighborhoods,
            show_raw: false,
            view: View::Forecast,
            generation: 0,
            quit: false,
        })
    }

    /// Lengthens the horizon by one day.
    pub fn horizon_up(&mut self) {
        self.set_horizon(self.horizon.increment());
    }

    /// Shortens the horizon by one day.
    pub fn horizon_down(&mut self) {
        self.set_horizon(self.horizon.decrement());
    }

    fn set_horizon(&mut self, horizon: Horizon) {
        if horizon == self.horizon {
            return;
        }
        match self.run.forecast(horizon, None) {
            Ok(rows) => {
                self.horizon = horizon;
                self.forecast = rows;
            }
            Err(e) => warn!(days = horizon.days(), "forecast failed: {e}"),
        }
    }

    /// Synthesizes fresh data and refits.
    ///
    /// A seeded configuration advances its seed so each regeneration differs
    /// but stays reproducible; an unseeded one draws from entropy.
    pub fn regenerate(&mut self) {
        let mut cfg = self.config.clone();
        let generation = self.generation + 1;
        cfg.synthesis.seed = cfg.synthesis.seed.map(|s| s.wrapping_add(generation));
        let horizon = self.horizon;
        let result = ForecastRun::from_config(&cfg)
            .and_then(|run| run.forecast(horizon, None).map(|rows| (run, rows)));
        let (run, forecast) = match result {
            Ok(pair) => pair,
            Err(e) => {
                warn!(generation, "regeneration failed, keeping previous run: {e}");
                return;
            }
        };
        self.run = run;
        self.forecast = forecast;
        self.generation = generation;
    }

    /// Toggles the raw data preview.
    pub fn toggle_raw(&mut self) {
        self.show_raw = !self.show_raw;
    }

    /// Switches between the forecast and neighborhood panels.
    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Forecast if !self.neighborhoods.is_empty() => View::Neighborhoods,
            _ => View::Forecast,
        };
    }
}
