// ABOUTME: Steady-effort filters applied to cleaned runs before regression
// ABOUTME: Pause-ratio filter and median-relative pace outlier filter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::point::RunPoint;
use tracing::debug;

/// Discard runs whose moving/elapsed ratio is below `threshold`
///
/// Runs without a known elapsed time always pass.
#[must_use]
pub fn filter_paused(points: Vec<RunPoint>, threshold: f64) -> Vec<RunPoint> {
    let before = points.len();
    let kept: Vec<RunPoint> = points
        .into_iter()
        .filter(|point| point.moving_ratio().is_none_or(|ratio| ratio >= threshold))
        .collect();
    debug!(before, kept = kept.len(), threshold, "applied pause filter");
    kept
}

/// Discard runs whose pace falls outside `[low × median, high × median]`
#[must_use]
pub fn filter_pace_outliers(
    points: Vec<RunPoint>,
    low_factor: f64,
    high_factor: f64,
) -> Vec<RunPoint> {
    let paces: Vec<f64> = points.iter().map(RunPoint::pace).collect();
    let Some(median) = median(&paces) else {
        return points;
    };

    let lower = median * low_factor;
    let upper = median * high_factor;
    let before = points.len();
    let kept: Vec<RunPoint> = points
        .into_iter()
        .filter(|point| (lower..=upper).contains(&point.pace()))
        .collect();
    debug!(before, kept = kept.len(), median_pace = median, "applied pace outlier filter");
    kept
}

/// Median of the values; mean of the two middle values for even counts
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let len = sorted.len();
    if len % 2 == 0 {
        Some(f64::midpoint(sorted[len / 2 - 1], sorted[len / 2]))
    } else {
        Some(sorted[len / 2])
    }
}
