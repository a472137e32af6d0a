// ABOUTME: Race-time predictor pipeline from raw activity history to a formatted prediction
// ABOUTME: Normalize, pause filter, outlier filter, weighted power-law fit, predict, format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Performance Predictor
//!
//! Estimates a finishing time for a target distance from a runner's own
//! history. Only steady-effort runs are used: non-runs and malformed records
//! are dropped, heavily paused runs are discarded, and runs whose pace is far
//! from the median are treated as outliers. The remaining runs are fitted to
//! `time = a · distance^b` with recency-weighted least squares in log space,
//! and the weighted residual RMSE becomes a multiplicative confidence band.
//!
//! Every call is a pure function of its inputs, including the `now` used for
//! recency weighting, so identical inputs give bit-identical output.

/// Prediction failure taxonomy
pub mod error;
/// Steady-effort filters
pub mod filters;
/// Time and pace formatting
pub mod format;
/// Cleaned run observations
pub mod point;
/// Weighted power-law regression
pub mod regression;

pub use error::PredictionError;
pub use point::RunPoint;
pub use regression::FitResult;

use crate::config::PredictorConfig;
use chrono::{DateTime, Utc};
use racecast_core::constants::race_distances;
use racecast_core::constants::units::METERS_PER_KM;
use racecast_core::models::ActivityRecord;
use regression::Observation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fit parameters reported alongside a prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Intercept `ln(a)`
    pub log_a: f64,
    /// Fatigue exponent
    pub b: f64,
    /// Weighted RMS residual in log space
    pub rmse_log: f64,
}

impl From<FitResult> for ModelParameters {
    fn from(fit: FitResult) -> Self {
        Self {
            log_a: fit.log_a,
            b: fit.b,
            rmse_log: fit.rmse_log,
        }
    }
}

/// A race-time prediction for one target distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Target distance in kilometers
    pub distance_km: f64,
    /// Predicted finishing time in seconds, rounded to 0.1 s
    pub prediction_seconds: f64,
    /// Predicted finishing time as `H:MM:SS` / `M:SS`
    pub prediction_time: String,
    /// Predicted average pace as `M:SS/km`
    pub pace_per_km: String,
    /// Lower confidence bound in seconds, rounded to 0.1 s
    pub confidence_low_seconds: f64,
    /// Upper confidence bound in seconds, rounded to 0.1 s
    pub confidence_high_seconds: f64,
    /// Lower confidence bound, formatted
    pub confidence_low_time: String,
    /// Upper confidence bound, formatted
    pub confidence_high_time: String,
    /// Fit parameters
    pub model: ModelParameters,
    /// Runs that survived every filter and entered the fit
    pub used_points: usize,
}

/// A fitted model and the number of runs behind it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedModel {
    /// Fit parameters
    pub fit: FitResult,
    /// Runs used in the fit
    pub used_points: usize,
}

impl FittedModel {
    /// Produce a prediction for `target_km`
    ///
    /// # Errors
    ///
    /// Returns `PredictionError::InvalidTarget` for a non-finite or
    /// non-positive target, or `PredictionError::ModelFitFailed` if the model
    /// yields a non-finite or non-positive time
    pub fn predict(&self, target_km: f64) -> Result<Prediction, PredictionError> {
        validate_target(target_km)?;

        let seconds = self.fit.predict_seconds(target_km * METERS_PER_KM);
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(PredictionError::ModelFitFailed(format!(
                "model produced an unusable time for {target_km} km"
            )));
        }
        let (low, high) = self.fit.confidence_bounds(seconds);

        Ok(Prediction {
            distance_km: target_km,
            prediction_seconds: format::round_tenths(seconds),
            prediction_time: format::format_time(seconds),
            pace_per_km: format::format_pace_per_km(seconds / target_km),
            confidence_low_seconds: format::round_tenths(low),
            confidence_high_seconds: format::round_tenths(high),
            confidence_low_time: format::format_time(low),
            confidence_high_time: format::format_time(high),
            model: self.fit.into(),
            used_points: self.used_points,
        })
    }
}

/// Check that a target distance is a finite positive number of kilometers
///
/// # Errors
///
/// Returns `PredictionError::InvalidTarget` otherwise
pub fn validate_target(target_km: f64) -> Result<(), PredictionError> {
    if target_km.is_finite() && target_km > 0.0 {
        Ok(())
    } else {
        Err(PredictionError::InvalidTarget(target_km))
    }
}

/// Race-time predictor
#[derive(Debug, Clone, Default)]
pub struct PerformancePredictor {
    config: PredictorConfig,
}

impl PerformancePredictor {
    /// Create a predictor with the given tunables
    #[must_use]
    pub const fn new(config: PredictorConfig) -> Self {
        Self { config }
    }

    /// The tunables in use
    #[must_use]
    pub const fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Clean and filter raw records down to the runs used for fitting
    ///
    /// # Errors
    ///
    /// Returns one of the insufficient-data variants when fewer than
    /// `min_points` runs remain after normalization, after the pause filter,
    /// or after the outlier filter
    pub fn prepare_points(
        &self,
        records: &[ActivityRecord],
    ) -> Result<Vec<RunPoint>, PredictionError> {
        let required = self.config.min_points;

        let points = point::normalize(records);
        if points.len() < required {
            return Err(PredictionError::InsufficientRuns {
                required,
                found: points.len(),
            });
        }

        let points = filters::filter_paused(points, self.config.pause_ratio_threshold);
        if points.len() < required {
            return Err(PredictionError::InsufficientAfterFiltering {
                required,
                found: points.len(),
            });
        }

        let points = filters::filter_pace_outliers(
            points,
            self.config.outlier_low_factor,
            self.config.outlier_high_factor,
        );
        if points.len() < required {
            return Err(PredictionError::TooManyOutliers {
                required,
                found: points.len(),
            });
        }

        Ok(points)
    }

    /// Run the cleaning pipeline and fit the weighted power law
    ///
    /// # Errors
    ///
    /// Returns an insufficient-data variant from [`Self::prepare_points`] or
    /// `PredictionError::ModelFitFailed` for a degenerate regression
    pub fn fit(
        &self,
        records: &[ActivityRecord],
        now: DateTime<Utc>,
    ) -> Result<FittedModel, PredictionError> {
        let points = self.prepare_points(records)?;
        let observations: Vec<Observation> = points
            .iter()
            .map(|p| Observation::from_point(p, now, self.config.recency_half_life_days))
            .collect();

        let fit = regression::fit_power_law(&observations, self.config.min_determinant)?;
        debug!(log_a = fit.log_a, b = fit.b, rmse_log = fit.rmse_log, "fitted power law");

        Ok(FittedModel {
            fit,
            used_points: points.len(),
        })
    }

    /// Predict the finishing time for `target_km` from a run history
    ///
    /// # Errors
    ///
    /// Returns `PredictionError::InvalidTarget` for a bad target before any
    /// fitting, otherwise any error from [`Self::fit`] or [`FittedModel::predict`]
    pub fn predict(
        &self,
        records: &[ActivityRecord],
        target_km: f64,
        now: DateTime<Utc>,
    ) -> Result<Prediction, PredictionError> {
        validate_target(target_km)?;
        let model = self.fit(records, now)?;
        let prediction = model.predict(target_km)?;

        info!(
            distance_km = target_km,
            used_points = prediction.used_points,
            b = prediction.model.b,
            rmse_log = prediction.model.rmse_log,
            prediction_time = %prediction.prediction_time,
            "race time predicted"
        );
        Ok(prediction)
    }

    /// Predict 5K, 10K, half marathon and marathon times from a single fit
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::fit`] or [`FittedModel::predict`]
    pub fn predict_standard_distances(
        &self,
        records: &[ActivityRecord],
        now: DateTime<Utc>,
    ) -> Result<Vec<Prediction>, PredictionError> {
        let model = self.fit(records, now)?;
        let predictions = race_distances::STANDARD
            .iter()
            .map(|(_, km)| model.predict(*km))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            used_points = model.used_points,
            b = model.fit.b,
            "standard distance predictions computed"
        );
        Ok(predictions)
    }
}
