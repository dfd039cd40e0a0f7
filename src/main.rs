//! Demand forecaster entry point: CLI wiring, logging, and output.

use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use demand_forecast::cli::CliOptions;
use demand_forecast::data::load_neighborhoods;
use demand_forecast::io::export::{export_forecast_csv, export_predictions_csv};
use demand_forecast::reporting::{coefficient_table, forecast_table, raw_preview};
use demand_forecast::{ForecastRun, Horizon};

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = CliOptions::parse();

    #[cfg(feature = "tui")]
    let default_level = if cli.tui { "warn" } else { "info" };
    #[cfg(not(feature = "tui"))]
    let default_level = "info";
    init_logging(default_level);

    let cfg = match cli.load_config() {
        Ok(cfg) => cfg,
        Err(errors) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
    };

    let neighborhoods = match cli.neighborhoods.as_deref().map(load_neighborhoods) {
        Some(Ok(rows)) => rows,
        Some(Err(e)) => {
            error!("{e}");
            process::exit(1);
        }
        None => Vec::new(),
    };

    #[cfg(feature = "tui")]
    if cli.tui {
        demand_forecast::tui::run(cfg, neighborhoods);
        return;
    }

    let run = ForecastRun::from_config(&cfg).unwrap_or_else(|e| {
        error!("forecast run failed: {e}");
        process::exit(1);
    });

    // Horizon was validated with the rest of the config
    let horizon = Horizon::new(cfg.forecast.horizon).unwrap_or_default();
    let forecast = run
        .forecast(horizon, cli.locality.as_deref())
        .unwrap_or_else(|e| {
            error!("forecast failed: {e}");
            process::exit(1);
        });

    if let Some(rows) = cli.show_raw {
        println!("{}", raw_preview(&run, rows));
    }
    println!("{}\n", run.evaluation);
    println!("{}\n", coefficient_table(&run));
    print!("{}", forecast_table(&forecast));

    if !neighborhoods.is_empty() {
        println!("\n--- Neighborhood Projections ---");
        for n in &neighborhoods {
            println!(
                "{:<20}{:>14.0}{:>14.0}",
                n.neighborhood, n.projected_population, n.predicted_order_volume
            );
        }
    }

    if let Some(ref path) = cli.forecast_out {
        if let Err(e) = export_forecast_csv(&forecast, path) {
            error!("failed to write forecast CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "forecast written");
    }
    if let Some(ref path) = cli.predictions_out {
        if let Err(e) = export_predictions_csv(&run.test_predictions, path) {
            error!("failed to write predictions CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "held-out predictions written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(demand_forecast::api::AppState { run, neighborhoods });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            error!("failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(demand_forecast::api::serve(state, addr)) {
            error!("API server error: {e}");
            process::exit(1);
        }
    }
}
