// ABOUTME: Recency-weighted least-squares fit of a power law in log-log space
// ABOUTME: Closed-form two-parameter solve with an explicit singular-determinant guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weighted power-law regression
//!
//! Models `time = a · distance^b` by fitting `ln(time) = ln(a) + b · ln(distance)`
//! with weighted least squares. No matrix routine is involved: the 2×2 normal
//! equations are solved directly and a near-zero determinant is reported as a
//! failure instead of being divided by.

use super::error::PredictionError;
use super::point::RunPoint;
use chrono::{DateTime, Utc};
use racecast_core::constants::units::SECONDS_PER_DAY;
use serde::{Deserialize, Serialize};

/// One regression input in log space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// `ln(distance_meters)`
    pub x: f64,
    /// `ln(moving_seconds)`
    pub y: f64,
    /// Recency weight
    pub w: f64,
}

impl Observation {
    /// Project a run into log space with its recency weight as of `now`
    #[must_use]
    pub fn from_point(point: &RunPoint, now: DateTime<Utc>, half_life_days: f64) -> Self {
        Self {
            x: point.distance_meters.ln(),
            y: point.moving_seconds.ln(),
            w: recency_weight(age_days(point.start, now), half_life_days),
        }
    }
}

/// Fractional days between `start` and `now`; runs dated after `now` have age 0
#[must_use]
pub fn age_days(start: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - start).num_milliseconds().max(0) as f64;
    millis / 1_000.0 / SECONDS_PER_DAY
}

/// Exponential decay `0.5^(age / half_life)`
#[must_use]
pub fn recency_weight(age_days: f64, half_life_days: f64) -> f64 {
    0.5_f64.powf(age_days.max(0.0) / half_life_days)
}

/// Weighted sums of the normal equations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedSums {
    /// Σw
    pub sum_w: f64,
    /// Σwx
    pub sum_wx: f64,
    /// Σwy
    pub sum_wy: f64,
}

impl WeightedSums {
    /// Accumulate the sums over all observations
    #[must_use]
    pub fn accumulate(observations: &[Observation]) -> Self {
        observations.iter().fold(Self::default(), |acc, o| Self {
            sum_w: acc.sum_w + o.w,
            sum_wx: o.w.mul_add(o.x, acc.sum_wx),
            sum_wy: o.w.mul_add(o.y, acc.sum_wy),
        })
    }
}

/// Fitted power-law parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Intercept `ln(a)`
    pub log_a: f64,
    /// Slope, the fatigue exponent
    pub b: f64,
    /// Weighted RMS residual in log space
    pub rmse_log: f64,
}

impl FitResult {
    /// Predicted seconds for a distance in meters: `exp(log_a) · meters^b`
    #[must_use]
    pub fn predict_seconds(&self, meters: f64) -> f64 {
        self.log_a.exp() * meters.powf(self.b)
    }

    /// Bounds one residual RMSE either side of `seconds` in log space
    ///
    /// `seconds · e^(∓rmse)` equals `exp(ln(seconds) ∓ rmse)` but keeps
    /// `low ≤ seconds ≤ high` exact under rounding.
    #[must_use]
    pub fn confidence_bounds(&self, seconds: f64) -> (f64, f64) {
        (
            seconds * (-self.rmse_log).exp(),
            seconds * self.rmse_log.exp(),
        )
    }
}

/// Solve the weighted least-squares fit of `y = log_a + b · x`
///
/// The determinant `Σw·Σwx² − (Σwx)²` is evaluated as `Σw · Σw(x − x̄)²`,
/// which is the same quantity without the subtraction of two large, nearly
/// equal products; identical distances therefore give a determinant of
/// (essentially) zero rather than rounding noise.
///
/// # Errors
///
/// Returns `PredictionError::ModelFitFailed` when fewer than two observations
/// are supplied, the total weight is zero or non-finite, the determinant is
/// non-finite or below `min_determinant` in magnitude, or the solution is not
/// finite.
pub fn fit_power_law(
    observations: &[Observation],
    min_determinant: f64,
) -> Result<FitResult, PredictionError> {
    if observations.len() < 2 {
        return Err(PredictionError::ModelFitFailed(format!(
            "need at least 2 points for regression, got {}",
            observations.len()
        )));
    }

    let sums = WeightedSums::accumulate(observations);
    if !sums.sum_w.is_finite() || sums.sum_w <= 0.0 {
        return Err(PredictionError::ModelFitFailed(
            "total recency weight is zero".to_owned(),
        ));
    }

    let mean_x = sums.sum_wx / sums.sum_w;
    let mean_y = sums.sum_wy / sums.sum_w;
    let (centered_xx, centered_xy) = observations.iter().fold((0.0, 0.0), |(sxx, sxy), o| {
        let dx = o.x - mean_x;
        let dy = o.y - mean_y;
        ((o.w * dx).mul_add(dx, sxx), (o.w * dx).mul_add(dy, sxy))
    });

    let det = sums.sum_w * centered_xx;
    if !det.is_finite() || det.abs() < min_determinant {
        return Err(PredictionError::ModelFitFailed(format!(
            "regression is singular (determinant {det:e}); runs need a spread of distances"
        )));
    }

    // Cramer's rule on the normal equations, both sides scaled by 1/Σw²
    let b = sums.sum_w * centered_xy / det;
    let log_a = b.mul_add(-mean_x, mean_y);

    let weighted_sse = observations.iter().fold(0.0, |acc, o| {
        let residual = o.y - b.mul_add(o.x, log_a);
        (o.w * residual).mul_add(residual, acc)
    });
    let rmse_log = (weighted_sse / sums.sum_w).sqrt();

    if !(log_a.is_finite() && b.is_finite() && rmse_log.is_finite()) {
        return Err(PredictionError::ModelFitFailed(
            "regression produced non-finite parameters".to_owned(),
        ));
    }

    Ok(FitResult { log_a, b, rmse_log })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn obs(distance: f64, seconds: f64, w: f64) -> Observation {
        Observation {
            x: distance.ln(),
            y: seconds.ln(),
            w,
        }
    }

    #[test]
    fn test_sixty_day_old_run_has_half_weight() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let today = recency_weight(age_days(now, now), 60.0);
        let sixty = recency_weight(age_days(now - Duration::days(60), now), 60.0);

        assert!((today - 1.0).abs() < f64::EPSILON);
        assert!((sixty - 0.5).abs() < f64::EPSILON);
        assert!((today / sixty - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_weights_strictly_decrease_with_age() {
        let weights: Vec<f64> = [0.0, 1.0, 15.0, 60.0, 120.0, 365.0]
            .iter()
            .map(|age| recency_weight(*age, 60.0))
            .collect();
        assert!(weights.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_future_runs_are_clamped_to_age_zero() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let tomorrow = now + Duration::days(1);
        assert!(age_days(tomorrow, now).abs() < f64::EPSILON);
        assert!((recency_weight(age_days(tomorrow, now), 60.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exact_power_law_is_recovered() {
        // time = 0.2 · d^1.06
        let observations: Vec<Observation> = [3000.0, 5000.0, 10_000.0, 21_097.5]
            .iter()
            .zip([1.0, 0.7, 0.4, 0.25])
            .map(|(d, w)| obs(*d, 0.2 * d.powf(1.06), w))
            .collect();

        let fit = fit_power_law(&observations, 1e-12).unwrap();
        assert!((fit.b - 1.06).abs() < 1e-9);
        assert!((fit.log_a - 0.2_f64.ln()).abs() < 1e-8);
        assert!(fit.rmse_log < 1e-9);
    }

    #[test]
    fn test_identical_distances_are_singular() {
        let observations: Vec<Observation> = (0..5)
            .map(|i| obs(5000.0, 1500.0, 0.5_f64.powi(i)))
            .collect();

        let result = fit_power_law(&observations, 1e-12);
        assert!(matches!(result, Err(PredictionError::ModelFitFailed(_))));
    }

    #[test]
    fn test_zero_weight_is_rejected() {
        let observations = vec![obs(3000.0, 900.0, 0.0), obs(5000.0, 1500.0, 0.0)];
        let result = fit_power_law(&observations, 1e-12);
        assert!(matches!(result, Err(PredictionError::ModelFitFailed(_))));
    }

    #[test]
    fn test_single_point_is_rejected() {
        let result = fit_power_law(&[obs(5000.0, 1500.0, 1.0)], 1e-12);
        assert!(matches!(result, Err(PredictionError::ModelFitFailed(_))));
    }

    #[test]
    fn test_weighted_sums_accumulate() {
        let observations = vec![obs(3000.0, 900.0, 1.0), obs(10_000.0, 3150.0, 0.5)];
        let sums = WeightedSums::accumulate(&observations);

        let expected_wx = 3000.0_f64.ln() + 0.5 * 10_000.0_f64.ln();
        let expected_wy = 900.0_f64.ln() + 0.5 * 3150.0_f64.ln();
        assert!((sums.sum_w - 1.5).abs() < 1e-12);
        assert!((sums.sum_wx - expected_wx).abs() < 1e-9);
        assert!((sums.sum_wy - expected_wy).abs() < 1e-9);
    }

    #[test]
    fn test_recent_runs_dominate_the_fit() {
        // Two clusters at different fitness levels; the recent cluster carries most weight
        let recent = [(3000.0, 840.0), (5000.0, 1450.0), (10_000.0, 3030.0)];
        let old = [(3000.0, 1020.0), (5000.0, 1760.0), (10_000.0, 3700.0)];
        let mut observations: Vec<Observation> =
            recent.iter().map(|(d, t)| obs(*d, *t, 1.0)).collect();
        observations.extend(old.iter().map(|(d, t)| obs(*d, *t, 0.01)));

        let fit = fit_power_law(&observations, 1e-12).unwrap();
        let five_k = fit.predict_seconds(5000.0);
        assert!((five_k - 1450.0).abs() < (five_k - 1760.0).abs());
    }

    #[test]
    fn test_confidence_bounds_bracket_prediction() {
        for rmse_log in [0.0, 1e-300, 0.01, 0.2, 3.0] {
            let fit = FitResult {
                log_a: -1.2,
                b: 1.05,
                rmse_log,
            };
            let seconds = fit.predict_seconds(5000.0);
            let (low, high) = fit.confidence_bounds(seconds);
            assert!(low <= seconds && seconds <= high, "rmse_log = {rmse_log}");
        }
    }

    #[test]
    fn test_zero_rmse_collapses_bounds() {
        let fit = FitResult {
            log_a: 0.3_f64.ln(),
            b: 1.0,
            rmse_log: 0.0,
        };
        let seconds = fit.predict_seconds(5000.0);
        assert_eq!(fit.confidence_bounds(seconds), (seconds, seconds));
    }
}
