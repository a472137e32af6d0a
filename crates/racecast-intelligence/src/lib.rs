// ABOUTME: Race-time prediction engine for the Racecast service
// ABOUTME: Exposes the predictor pipeline and its configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Racecast Intelligence
//!
//! Recency-weighted power-law race-time prediction over a runner's history.
//! All computation is synchronous and free of I/O; callers fetch activity
//! records first and pass an explicit `now`.

/// Predictor tunables
pub mod config;

/// Prediction pipeline
pub mod predictor;

pub use config::{ConfigError, PredictorConfig};
pub use predictor::{
    FitResult, FittedModel, ModelParameters, PerformancePredictor, Prediction, PredictionError,
    RunPoint,
};
