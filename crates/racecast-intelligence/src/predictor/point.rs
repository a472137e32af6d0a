// ABOUTME: Cleaned run observations and normalization from raw provider records
// ABOUTME: Drops non-run activities and records with unusable distance, time, or start date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use racecast_core::models::ActivityRecord;
use tracing::debug;

/// Activity type label accepted as a run (compared case-insensitively)
const RUN_LABEL: &str = "run";

/// A single cleaned run observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunPoint {
    /// Distance in meters, finite and > 0
    pub distance_meters: f64,
    /// Moving time in seconds, finite and > 0
    pub moving_seconds: f64,
    /// Elapsed time in seconds, when the provider reported a usable value
    pub elapsed_seconds: Option<f64>,
    /// Activity start
    pub start: DateTime<Utc>,
}

impl RunPoint {
    /// Build a point, rejecting non-finite or non-positive distance and moving time
    #[must_use]
    pub fn new(
        distance_meters: f64,
        moving_seconds: f64,
        elapsed_seconds: Option<f64>,
        start: DateTime<Utc>,
    ) -> Option<Self> {
        if !is_positive_finite(distance_meters) || !is_positive_finite(moving_seconds) {
            return None;
        }
        Some(Self {
            distance_meters,
            moving_seconds,
            elapsed_seconds: elapsed_seconds.filter(|e| is_positive_finite(*e)),
            start,
        })
    }

    /// Pace in moving seconds per meter
    #[must_use]
    pub fn pace(&self) -> f64 {
        self.moving_seconds / self.distance_meters
    }

    /// Fraction of elapsed time spent moving, if elapsed time is known
    #[must_use]
    pub fn moving_ratio(&self) -> Option<f64> {
        self.elapsed_seconds.map(|elapsed| self.moving_seconds / elapsed)
    }

    /// Convert a raw record, returning `None` if it is not a usable run
    #[must_use]
    pub fn from_record(record: &ActivityRecord) -> Option<Self> {
        if !record.activity_type.trim().eq_ignore_ascii_case(RUN_LABEL) {
            return None;
        }
        let start = record
            .start_date
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())?
            .with_timezone(&Utc);

        Self::new(record.distance?, record.moving_time?, record.elapsed_time, start)
    }
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Keep only records that describe a run with usable measurements
#[must_use]
pub fn normalize(records: &[ActivityRecord]) -> Vec<RunPoint> {
    let points: Vec<RunPoint> = records.iter().filter_map(RunPoint::from_record).collect();
    debug!(
        total = records.len(),
        kept = points.len(),
        "normalized activity records"
    );
    points
}
