// ABOUTME: HTTP server assembly for the Racecast API
// ABOUTME: Builds shared state, the axum router with middleware, and the serve loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server
//!
//! State is built once at startup and never mutated afterwards, so handlers
//! share it through an `Arc` without locks.

use crate::config::{ActivitySourceConfig, ServerConfig};
use crate::errors::AppResult;
use crate::middleware::request_id_middleware;
use crate::routes::{HealthRoutes, PredictionRoutes};
use anyhow::{Context, Result};
use axum::{middleware, Router};
use racecast_intelligence::PerformancePredictor;
use racecast_providers::http_client::initialize_shared_client;
use racecast_providers::{ActivitySource, InMemoryActivitySource, StravaActivitySource};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared, immutable per-process state
pub struct AppState {
    /// Where user histories come from
    pub source: Arc<dyn ActivitySource>,
    /// Predictor with its tunables
    pub predictor: PerformancePredictor,
    /// Distance used when a request omits `distance_km`
    pub default_distance_km: f64,
}

impl AppState {
    /// Create state from explicit parts
    #[must_use]
    pub fn new(
        source: Arc<dyn ActivitySource>,
        predictor: PerformancePredictor,
        default_distance_km: f64,
    ) -> Self {
        Self {
            source,
            predictor,
            default_distance_km,
        }
    }

    /// Build state from server configuration
    ///
    /// Initializes the shared HTTP client before constructing a Strava source.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the memory fixture cannot be loaded
    pub fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let source: Arc<dyn ActivitySource> = match &config.activity_source {
            ActivitySourceConfig::Strava(strava) => {
                initialize_shared_client(config.http_client);
                Arc::new(StravaActivitySource::new(strava.clone()))
            }
            ActivitySourceConfig::Memory {
                fixture_path: Some(path),
            } => Arc::new(InMemoryActivitySource::from_json_file(path)?),
            ActivitySourceConfig::Memory { fixture_path: None } => {
                warn!("memory activity source has no fixture; every credential will be rejected");
                Arc::new(InMemoryActivitySource::new())
            }
        };

        Ok(Self::new(
            source,
            PerformancePredictor::new(config.predictor.clone()),
            config.default_distance_km,
        ))
    }
}

/// Build the application router with request-id and HTTP tracing layers
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&state)))
        .merge(PredictionRoutes::routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http()),
        )
}

/// Bind the listener and serve until Ctrl+C
///
/// # Errors
///
/// Returns an error if state cannot be built, the address cannot be bound,
/// or the server fails
pub async fn run(config: &ServerConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(config).context("Failed to build server state")?);
    let router = build_router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(
        %address,
        activity_source = config.activity_source.name(),
        "racecast server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("racecast server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
