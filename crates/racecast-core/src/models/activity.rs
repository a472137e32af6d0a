// ABOUTME: Raw activity record model as delivered by fitness providers
// ABOUTME: Deserializes the Strava activity summary shape without validating it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A single activity as reported by a provider, before any cleaning
///
/// Every numeric field is optional and unvalidated: providers routinely omit
/// distance for indoor workouts or report zero moving time for manual entries.
/// The predictor decides what is usable; this type only carries the data.
///
/// Field names follow the Strava `SummaryActivity` JSON so a page from
/// `/athlete/activities` deserializes directly into `Vec<ActivityRecord>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Provider activity type label (e.g. "Run", "Ride")
    #[serde(rename = "type", default)]
    pub activity_type: String,
    /// Distance in meters
    #[serde(default)]
    pub distance: Option<f64>,
    /// Moving time in seconds (excludes stopped time)
    #[serde(default)]
    pub moving_time: Option<f64>,
    /// Elapsed wall-clock time in seconds
    #[serde(default)]
    pub elapsed_time: Option<f64>,
    /// Start timestamp, RFC 3339
    #[serde(default)]
    pub start_date: Option<String>,
}

impl ActivityRecord {
    /// Build a record with every field present
    #[must_use]
    pub fn new(
        activity_type: impl Into<String>,
        distance: f64,
        moving_time: f64,
        elapsed_time: Option<f64>,
        start_date: impl Into<String>,
    ) -> Self {
        Self {
            activity_type: activity_type.into(),
            distance: Some(distance),
            moving_time: Some(moving_time),
            elapsed_time,
            start_date: Some(start_date.into()),
        }
    }
}
