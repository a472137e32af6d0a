// ABOUTME: Route module organization for the Racecast HTTP API
// ABOUTME: Groups health and prediction endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Liveness and readiness endpoints
pub mod health;
/// Race-time prediction endpoints
pub mod prediction;

pub use health::HealthRoutes;
pub use prediction::PredictionRoutes;
