//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{
    CoefficientRecord, ErrorResponse, ForecastQuery, MetricsResponse, ObservationQuery,
    ObservationRecord,
};
use crate::data::NeighborhoodProjection;
use crate::forecast::{ForecastRow, Horizon};
use crate::pipeline::TestPrediction;

/// Rows returned by `/observations` when no limit is given.
const DEFAULT_PREVIEW_ROWS: usize = 5;

/// `GET /metrics` → 200 + `MetricsResponse` JSON
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsResponse> {
    let model = &state.run.model;
    Json(MetricsResponse {
        evaluation: state.run.evaluation.clone(),
        intercept: model.intercept,
        coefficients: model
            .columns
            .iter()
            .zip(&model.coefficients)
            .map(|(column, &value)| CoefficientRecord {
                column: column.clone(),
                value,
            })
            .collect(),
        reference_locality: state.run.encoder.reference().to_string(),
    })
}

/// `GET /predictions` → 200 + held-out rows sorted by date
pub async fn get_predictions(State(state): State<Arc<AppState>>) -> Json<Vec<TestPrediction>> {
    Json(state.run.test_predictions.clone())
}

/// `GET /observations?limit=N` → first N encoded observations (default 5)
pub async fn get_observations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ObservationQuery>,
) -> Json<Vec<ObservationRecord>> {
    let limit = query.limit.unwrap_or(DEFAULT_PREVIEW_ROWS);
    let features = &state.run.features;
    Json(
        state
            .run
            .observations
            .iter()
            .zip(features.features.rows())
            .take(limit)
            .map(|(o, row)| ObservationRecord::encoded(o, &features.columns, row))
            .collect(),
    )
}

/// Returns forecast rows for the requested horizon.
///
/// `GET /forecast` → 7 days for the reference locality
/// `GET /forecast?days=N&locality=L` → N days for locality L
/// `GET /forecast?days=31` → 400 + `ErrorResponse`
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<Vec<ForecastRow>>, (StatusCode, Json<ErrorResponse>)> {
    let bad_request = |error: String| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }));

    let horizon = match query.days {
        Some(days) => Horizon::new(days).map_err(|e| bad_request(e.to_string()))?,
        None => Horizon::default(),
    };
    let rows = state
        .run
        .forecast(horizon, query.locality.as_deref())
        .map_err(|e| bad_request(e.to_string()))?;
    Ok(Json(rows))
}

/// `GET /neighborhoods` → loaded projections, empty when none
pub async fn get_neighborhoods(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<NeighborhoodProjection>> {
    Json(state.neighborhoods.clone())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::ForecastConfig;
    use crate::pipeline::ForecastRun;

    fn make_test_state() -> Arc<AppState> {
        let cfg = ForecastConfig::reproducible();
        let run = ForecastRun::from_config(&cfg).unwrap();
        Arc::new(AppState {
            run,
            neighborhoods: vec![NeighborhoodProjection {
                neighborhood: "Baner".into(),
                projected_population: 120_000.0,
                predicted_order_volume: 5_400.0,
            }],
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn metrics_returns_200() {
        let (status, json) = get_json("/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["evaluation"]["mae"].is_number());
        assert!(json["evaluation"]["rmse"].is_number());
        assert_eq!(json["coefficients"].as_array().map(Vec::len), Some(5));
        assert_eq!(json["reference_locality"], "Baner");
    }

    #[tokio::test]
    async fn predictions_cover_test_split() {
        let (status, json) = get_json("/predictions").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(73));
    }

    #[tokio::test]
    async fn observations_default_to_five_rows() {
        let (_, json) = get_json("/observations").await;
        assert_eq!(json.as_array().map(Vec::len), Some(5));
        assert_eq!(json[0]["date"], "2023-01-01");
        assert_eq!(json[0]["day_of_year"], 1);
        assert_eq!(json[0]["encoded"]["DayOfYear"], 1.0);
        let encoded = json[0]["encoded"].as_object().unwrap();
        assert_eq!(encoded.len(), 5);
        let indicators: f64 = encoded
            .iter()
            .filter(|(k, _)| k.starts_with("Locality_"))
            .filter_map(|(_, v)| v.as_f64())
            .sum();
        assert!(indicators == 0.0 || indicators == 1.0);

        let (_, json) = get_json("/observations?limit=20").await;
        assert_eq!(json.as_array().map(Vec::len), Some(20));
    }

    #[tokio::test]
    async fn forecast_defaults_to_seven_days() {
        let (status, json) = get_json("/forecast").await;
        assert_eq!(status, StatusCode::OK);
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0]["date"], "2024-01-01");
    }

    #[tokio::test]
    async fn forecast_horizon_out_of_range_returns_400() {
        let (status, json) = get_json("/forecast?days=31").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn forecast_unknown_locality_returns_400() {
        let (status, _) = get_json("/forecast?locality=Atlantis").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn neighborhoods_are_listed() {
        let (status, json) = get_json("/neighborhoods").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["Neighborhood"], "Baner");
    }
}
