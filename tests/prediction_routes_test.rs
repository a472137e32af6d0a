// ABOUTME: HTTP integration tests for the prediction routes
// ABOUTME: Exercises auth, validation, error mapping, and predictions through the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::{self, FLAT_TOKEN, GOOD_TOKEN, SHORT_TOKEN};
use racecast::server::{build_router, AppState};
use racecast_intelligence::{PerformancePredictor, PredictorConfig};
use racecast_providers::InMemoryActivitySource;
use serde_json::Value;
use std::sync::Arc;

fn app() -> axum::Router {
    let source = InMemoryActivitySource::new()
        .with_user(GOOD_TOKEN, fixtures::steady_history())
        .with_user(SHORT_TOKEN, fixtures::short_history())
        .with_user(FLAT_TOKEN, fixtures::flat_history());
    let state = AppState::new(
        Arc::new(source),
        PerformancePredictor::new(PredictorConfig::default()),
        5.0,
    );
    build_router(Arc::new(state))
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_missing_authorization_is_401() {
    let response = AxumTestRequest::get("/api/predict").send(app()).await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert_eq!(body["code"], "AUTH_REQUIRED");
    assert!(body["request_id"].as_str().unwrap().starts_with("req_"));
}

#[tokio::test]
async fn test_unknown_credential_is_401() {
    let response = AxumTestRequest::get("/api/predict")
        .bearer("someone-else")
        .send(app())
        .await;

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_identity_is_checked_before_distance() {
    let response = AxumTestRequest::get("/api/predict?distance_km=abc")
        .send(app())
        .await;

    assert_eq!(response.status(), 401);
}

// ============================================================================
// Validation and pipeline errors
// ============================================================================

#[tokio::test]
async fn test_invalid_distances_are_400() {
    for query in ["distance_km=abc", "distance_km=0", "distance_km=-3"] {
        let response = AxumTestRequest::get(&format!("/api/predict?{query}"))
            .bearer(GOOD_TOKEN)
            .send(app())
            .await;

        assert_eq!(response.status(), 400, "query {query}");
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_short_history_is_insufficient_data() {
    let response = AxumTestRequest::get("/api/predict")
        .bearer(SHORT_TOKEN)
        .send(app())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INSUFFICIENT_DATA");
    assert!(body["error"].as_str().unwrap().contains("Not enough runs"));
}

#[tokio::test]
async fn test_identical_distances_fail_the_fit() {
    let response = AxumTestRequest::get("/api/predict")
        .bearer(FLAT_TOKEN)
        .send(app())
        .await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "MODEL_FIT_FAILED");
}

// ============================================================================
// Successful predictions
// ============================================================================

#[tokio::test]
async fn test_default_distance_prediction() {
    let response = AxumTestRequest::get("/api/predict")
        .bearer(GOOD_TOKEN)
        .send(app())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert!((body["distance_km"].as_f64().unwrap() - 5.0).abs() < f64::EPSILON);
    assert_eq!(body["prediction_time"], "25:00");
    assert_eq!(body["pace_per_km"], "5:00/km");
    assert_eq!(body["used_points"], 5);
    assert!((body["prediction_seconds"].as_f64().unwrap() - 1500.0).abs() < 0.11);
    assert!((body["model"]["b"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert!(body["model"]["rmse_log"].as_f64().unwrap() < 1e-9);

    let low = body["confidence_low_seconds"].as_f64().unwrap();
    let high = body["confidence_high_seconds"].as_f64().unwrap();
    let predicted = body["prediction_seconds"].as_f64().unwrap();
    assert!(low <= predicted && predicted <= high);
}

#[tokio::test]
async fn test_explicit_distance_prediction() {
    let response = AxumTestRequest::get("/api/predict?distance_km=10")
        .bearer(GOOD_TOKEN)
        .send(app())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["prediction_time"], "50:00");
    assert_eq!(body["confidence_low_time"], "50:00");
    assert_eq!(body["confidence_high_time"], "50:00");
}

#[tokio::test]
async fn test_standard_distances() {
    let response = AxumTestRequest::get("/api/predict/standard")
        .bearer(GOOD_TOKEN)
        .send(app())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["used_points"], 5);

    let predictions = body["predictions"].as_array().unwrap();
    let races: Vec<&str> = predictions
        .iter()
        .map(|p| p["race"].as_str().unwrap())
        .collect();
    assert_eq!(races, ["5K", "10K", "Half Marathon", "Marathon"]);
    assert_eq!(predictions[0]["prediction_time"], "25:00");
    assert_eq!(predictions[1]["prediction_time"], "50:00");
    assert_eq!(predictions[2]["prediction_time"], "1:45:29");
}

#[tokio::test]
async fn test_standard_distances_require_auth() {
    let response = AxumTestRequest::get("/api/predict/standard")
        .send(app())
        .await;

    assert_eq!(response.status(), 401);
}

// ============================================================================
// Request correlation and health
// ============================================================================

#[tokio::test]
async fn test_inbound_request_id_is_echoed() {
    let response = AxumTestRequest::get("/api/predict?distance_km=abc")
        .bearer(GOOD_TOKEN)
        .header("x-request-id", "trace-42")
        .send(app())
        .await;

    assert_eq!(response.header("x-request-id").as_deref(), Some("trace-42"));
    let body: Value = response.json();
    assert_eq!(body["request_id"], "trace-42");
}

#[tokio::test]
async fn test_request_id_generated_on_success() {
    let response = AxumTestRequest::get("/api/predict")
        .bearer(GOOD_TOKEN)
        .send(app())
        .await;

    assert!(response.header("x-request-id").unwrap().starts_with("req_"));
}

#[tokio::test]
async fn test_health_and_ready() {
    let health = AxumTestRequest::get("/health").send(app()).await;
    assert_eq!(health.status(), 200);
    let body: Value = health.json();
    assert_eq!(body["status"], "healthy");

    let ready = AxumTestRequest::get("/ready").send(app()).await;
    assert_eq!(ready.status(), 200);
    let body: Value = ready.json();
    assert_eq!(body["activity_source"], "memory");
    assert_eq!(body["predictor"]["min_points"], 4);
    assert_eq!(body["predictor"]["recency_half_life_days"], 60.0);
}
