//! REST API over one completed forecasting run.
//!
//! Endpoints (all GET):
//! - `/metrics`: evaluation report and fitted coefficients
//! - `/predictions`: held-out actual vs predicted demand
//! - `/observations`: encoded observation preview
//! - `/forecast`: future demand for a horizon of 1-30 days
//! - `/neighborhoods`: loaded neighborhood projections

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::data::NeighborhoodProjection;
use crate::pipeline::ForecastRun;

/// Immutable application state shared across all request handlers.
///
/// Built once after the run completes and wrapped in `Arc`; handlers only
/// read from it.
pub struct AppState {
    /// Completed forecasting run.
    pub run: ForecastRun,
    /// Neighborhood projections, empty when none were loaded.
    pub neighborhoods: Vec<NeighborhoodProjection>,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/metrics", get(handlers::get_metrics))
        .route("/predictions", get(handlers::get_predictions))
        .route("/observations", get(handlers::get_observations))
        .route("/forecast", get(handlers::get_forecast))
        .route("/neighborhoods", get(handlers::get_neighborhoods))
        .with_state(state)
}

/// Binds to the given address and serves the API until shutdown.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
