// ABOUTME: Race-time prediction route handlers
// ABOUTME: Authenticates the caller, fetches their history, and runs the predictor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Prediction routes
//!
//! Every handler resolves the caller's credential first, then validates
//! parameters, then awaits the activity source exactly once before running
//! the synchronous predictor on the blocking pool.

use crate::auth::credential_from_headers;
use crate::errors::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use chrono::Utc;
use racecast_core::constants::race_distances;
use racecast_core::models::ActivityRecord;
use racecast_intelligence::predictor::validate_target;
use racecast_intelligence::{Prediction, PredictionError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Query parameters for `GET /api/predict`
///
/// Kept as a raw string so a malformed number produces our own
/// `INVALID_INPUT` body instead of the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PredictQuery {
    /// Target distance in kilometers
    #[serde(default)]
    pub distance_km: Option<String>,
}

/// One standard race distance and its prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardDistancePrediction {
    /// Race label, e.g. `10K`
    pub race: String,
    /// Prediction for the race distance
    #[serde(flatten)]
    pub prediction: Prediction,
}

/// Response body for `GET /api/predict/standard`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardDistancesResponse {
    /// Runs that entered the fit
    pub used_points: usize,
    /// 5K, 10K, half marathon and marathon, in that order
    pub predictions: Vec<StandardDistancePrediction>,
}

/// Prediction routes
pub struct PredictionRoutes;

impl PredictionRoutes {
    /// Create all prediction routes
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/api/predict", get(Self::handle_predict))
            .route("/api/predict/standard", get(Self::handle_predict_standard))
            .with_state(state)
    }

    async fn handle_predict(
        State(state): State<Arc<AppState>>,
        Extension(request_id): Extension<RequestId>,
        headers: HeaderMap,
        Query(query): Query<PredictQuery>,
    ) -> Response {
        Self::predict(&state, &headers, &query)
            .await
            .map_err(|e| e.with_request_id(request_id.as_str()))
            .into_response()
    }

    async fn handle_predict_standard(
        State(state): State<Arc<AppState>>,
        Extension(request_id): Extension<RequestId>,
        headers: HeaderMap,
    ) -> Response {
        Self::predict_standard(&state, &headers)
            .await
            .map_err(|e| e.with_request_id(request_id.as_str()))
            .into_response()
    }

    async fn predict(
        state: &AppState,
        headers: &HeaderMap,
        query: &PredictQuery,
    ) -> AppResult<Json<Prediction>> {
        let credential = credential_from_headers(headers)?;
        let target_km = parse_distance(query.distance_km.as_deref(), state.default_distance_km)?;

        let records = Self::fetch_history(state, &credential).await?;
        let predictor = state.predictor.clone();
        let now = Utc::now();
        let task = move || predictor.predict(&records, target_km, now);
        let prediction = run_predictor(task).await?;
        Ok(Json(prediction))
    }

    async fn predict_standard(
        state: &AppState,
        headers: &HeaderMap,
    ) -> AppResult<Json<StandardDistancesResponse>> {
        let credential = credential_from_headers(headers)?;

        let records = Self::fetch_history(state, &credential).await?;
        let predictor = state.predictor.clone();
        let now = Utc::now();
        let task = move || predictor.predict_standard_distances(&records, now);
        let predictions = run_predictor(task).await?;

        let used_points = predictions.first().map_or(0, |p| p.used_points);
        let predictions = race_distances::STANDARD
            .iter()
            .zip(predictions)
            .map(|((race, _), prediction)| StandardDistancePrediction {
                race: (*race).to_owned(),
                prediction,
            })
            .collect();

        Ok(Json(StandardDistancesResponse {
            used_points,
            predictions,
        }))
    }

    async fn fetch_history(state: &AppState, credential: &str) -> AppResult<Vec<ActivityRecord>> {
        let records = state.source.fetch_activities(credential).await?;
        debug!(
            source = state.source.name(),
            records = records.len(),
            "activity history fetched"
        );
        Ok(records)
    }
}

/// Run a predictor call on the blocking thread pool
///
/// # Errors
///
/// Returns the prediction error converted to an `AppError`, or `InternalError`
/// if the task panicked or was cancelled
pub async fn run_predictor<T, F>(task: F) -> AppResult<T>
where
    F: FnOnce() -> Result<T, PredictionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::internal(format!("Prediction task failed: {e}")))?
        .map_err(AppError::from)
}

/// Parse the `distance_km` query value, falling back to `default_km` when absent
///
/// # Errors
///
/// Returns `InvalidInput` for a value that is not a finite positive number
pub fn parse_distance(raw: Option<&str>, default_km: f64) -> AppResult<f64> {
    let target_km = match raw.map(str::trim) {
        None | Some("") => default_km,
        Some(value) => value.parse::<f64>().map_err(|_| {
            AppError::invalid_input(format!(
                "distance_km must be a number of kilometers, got '{value}'"
            ))
        })?,
    };
    validate_target(target_km)?;
    Ok(target_km)
}
