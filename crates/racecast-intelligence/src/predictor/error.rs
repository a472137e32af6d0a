// ABOUTME: Prediction failure taxonomy with one variant per terminating pipeline stage
// ABOUTME: Converts into the service-wide AppError with the matching error code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use racecast_core::errors::AppError;
use thiserror::Error;

/// Reasons a prediction cannot be produced
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictionError {
    /// Target distance is not a finite positive number
    #[error("Distance must be a finite positive number of kilometers, got {0}")]
    InvalidTarget(f64),

    /// Too few valid runs before any filtering
    #[error("Not enough runs to predict: need at least {required}, found {found}")]
    InsufficientRuns {
        /// Minimum required
        required: usize,
        /// Valid runs available
        found: usize,
    },

    /// Too few runs left after discarding heavily paused activities
    #[error(
        "Not enough runs after filtering paused activities: need at least {required}, found {found}"
    )]
    InsufficientAfterFiltering {
        /// Minimum required
        required: usize,
        /// Runs remaining after the pause filter
        found: usize,
    },

    /// Too few runs left after discarding pace outliers
    #[error("Too many outliers: need at least {required} consistent runs, found {found}")]
    TooManyOutliers {
        /// Minimum required
        required: usize,
        /// Runs remaining after the outlier filter
        found: usize,
    },

    /// The weighted regression is singular or produced non-finite parameters
    #[error("Model fit failed: {0}")]
    ModelFitFailed(String),
}

impl PredictionError {
    /// True for the three insufficient-data variants
    #[must_use]
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            Self::InsufficientRuns { .. }
                | Self::InsufficientAfterFiltering { .. }
                | Self::TooManyOutliers { .. }
        )
    }
}

impl From<PredictionError> for AppError {
    fn from(error: PredictionError) -> Self {
        let message = error.to_string();
        match error {
            PredictionError::InvalidTarget(_) => Self::invalid_input(message),
            PredictionError::InsufficientRuns { .. }
            | PredictionError::InsufficientAfterFiltering { .. }
            | PredictionError::TooManyOutliers { .. } => Self::insufficient_data(message),
            PredictionError::ModelFitFailed(_) => Self::model_fit_failed(message),
        }
    }
}
