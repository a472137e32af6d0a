// ABOUTME: Predictor tunables with defaults, environment overrides, and validation
// ABOUTME: Pause ratio, outlier band, recency half-life, and regression guards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Predictor Configuration
//!
//! The filtering thresholds have no physiological derivation behind them; they
//! are empirical cut-offs, so each one can be overridden per deployment.

/// Configuration error types
pub mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Default tunable values
pub mod defaults {
    /// Minimum usable runs at every filtering stage
    pub const MIN_POINTS: usize = 4;
    /// Minimum moving/elapsed ratio for a run to count as steady effort
    pub const PAUSE_RATIO_THRESHOLD: f64 = 0.8;
    /// Lower bound of the accepted pace band, as a multiple of the median pace
    pub const OUTLIER_LOW_FACTOR: f64 = 0.5;
    /// Upper bound of the accepted pace band, as a multiple of the median pace
    pub const OUTLIER_HIGH_FACTOR: f64 = 2.0;
    /// Age at which a run counts half as much as one recorded today
    pub const RECENCY_HALF_LIFE_DAYS: f64 = 60.0;
    /// Normal-equation determinants below this magnitude are treated as singular
    pub const MIN_DETERMINANT: f64 = 1e-12;
}

/// Environment variable names for predictor tunables
pub mod env_keys {
    /// Minimum usable runs
    pub const MIN_POINTS: &str = "PREDICTOR_MIN_POINTS";
    /// Pause ratio threshold
    pub const PAUSE_RATIO_THRESHOLD: &str = "PREDICTOR_PAUSE_RATIO_THRESHOLD";
    /// Outlier band lower factor
    pub const OUTLIER_LOW_FACTOR: &str = "PREDICTOR_OUTLIER_LOW_FACTOR";
    /// Outlier band upper factor
    pub const OUTLIER_HIGH_FACTOR: &str = "PREDICTOR_OUTLIER_HIGH_FACTOR";
    /// Recency half-life in days
    pub const RECENCY_HALF_LIFE_DAYS: &str = "PREDICTOR_RECENCY_HALF_LIFE_DAYS";
    /// Minimum determinant magnitude
    pub const MIN_DETERMINANT: &str = "PREDICTOR_MIN_DETERMINANT";
}

/// Tunables for the race-time predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Minimum usable runs required at each filtering stage
    pub min_points: usize,
    /// Runs with `moving / elapsed` below this ratio are discarded
    pub pause_ratio_threshold: f64,
    /// Runs faster than `median_pace * outlier_low_factor` are discarded
    pub outlier_low_factor: f64,
    /// Runs slower than `median_pace * outlier_high_factor` are discarded
    pub outlier_high_factor: f64,
    /// Half-life of the exponential recency weight, in days
    pub recency_half_life_days: f64,
    /// Singularity threshold for the regression determinant
    pub min_determinant: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            min_points: defaults::MIN_POINTS,
            pause_ratio_threshold: defaults::PAUSE_RATIO_THRESHOLD,
            outlier_low_factor: defaults::OUTLIER_LOW_FACTOR,
            outlier_high_factor: defaults::OUTLIER_HIGH_FACTOR,
            recency_half_life_days: defaults::RECENCY_HALF_LIFE_DAYS,
            min_determinant: defaults::MIN_DETERMINANT,
        }
    }
}

impl PredictorConfig {
    /// Load predictor configuration from environment, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if a variable is set but unparsable, or
    /// `ConfigError::InvalidRange` if the resulting configuration is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            min_points: env_or(env_keys::MIN_POINTS, defaults::MIN_POINTS)?,
            pause_ratio_threshold: env_or(
                env_keys::PAUSE_RATIO_THRESHOLD,
                defaults::PAUSE_RATIO_THRESHOLD,
            )?,
            outlier_low_factor: env_or(env_keys::OUTLIER_LOW_FACTOR, defaults::OUTLIER_LOW_FACTOR)?,
            outlier_high_factor: env_or(
                env_keys::OUTLIER_HIGH_FACTOR,
                defaults::OUTLIER_HIGH_FACTOR,
            )?,
            recency_half_life_days: env_or(
                env_keys::RECENCY_HALF_LIFE_DAYS,
                defaults::RECENCY_HALF_LIFE_DAYS,
            )?,
            min_determinant: env_or(env_keys::MIN_DETERMINANT, defaults::MIN_DETERMINANT)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every tunable is inside its meaningful range
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` naming the first offending tunable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_points < 2 {
            return Err(ConfigError::InvalidRange(
                "min_points must be at least 2 for a two-parameter fit",
            ));
        }
        if !(self.pause_ratio_threshold > 0.0 && self.pause_ratio_threshold <= 1.0) {
            return Err(ConfigError::InvalidRange(
                "pause_ratio_threshold must be in (0, 1]",
            ));
        }
        if !(self.outlier_low_factor > 0.0 && self.outlier_low_factor <= 1.0) {
            return Err(ConfigError::InvalidRange(
                "outlier_low_factor must be in (0, 1]",
            ));
        }
        if !(self.outlier_high_factor >= 1.0 && self.outlier_high_factor.is_finite()) {
            return Err(ConfigError::InvalidRange(
                "outlier_high_factor must be finite and at least 1",
            ));
        }
        if !(self.recency_half_life_days > 0.0 && self.recency_half_life_days.is_finite()) {
            return Err(ConfigError::InvalidRange(
                "recency_half_life_days must be finite and positive",
            ));
        }
        if !(self.min_determinant >= 0.0 && self.min_determinant.is_finite()) {
            return Err(ConfigError::InvalidRange(
                "min_determinant must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("{key}={raw}"))),
        Err(_) => Ok(default),
    }
}
