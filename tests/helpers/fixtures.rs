// ABOUTME: Activity history fixtures for integration tests
// ABOUTME: Builds run histories dated relative to the current time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Duration, Utc};
use racecast::models::ActivityRecord;

/// Credential registered with a usable history
pub const GOOD_TOKEN: &str = "runner-good";
/// Credential registered with too few runs
pub const SHORT_TOKEN: &str = "runner-short";
/// Credential registered with runs that all share one distance
pub const FLAT_TOKEN: &str = "runner-flat";

/// A run `days_ago` days before now at `pace` seconds per km
pub fn run(distance_km: f64, pace_seconds_per_km: f64, days_ago: i64) -> ActivityRecord {
    let moving = distance_km * pace_seconds_per_km;
    ActivityRecord::new(
        "Run",
        distance_km * 1000.0,
        moving,
        Some(moving),
        (Utc::now() - Duration::days(days_ago)).to_rfc3339(),
    )
}

/// 3, 4, 5, 6 and 8 km at a steady 5:00/km, plus a ride that must be ignored
pub fn steady_history() -> Vec<ActivityRecord> {
    let mut records: Vec<ActivityRecord> = [3.0, 4.0, 5.0, 6.0, 8.0]
        .iter()
        .zip(1..)
        .map(|(km, days)| run(*km, 300.0, days))
        .collect();
    records.push(ActivityRecord::new(
        "Ride",
        40_000.0,
        4_800.0,
        Some(5_000.0),
        Utc::now().to_rfc3339(),
    ));
    records
}

/// Only three runs
pub fn short_history() -> Vec<ActivityRecord> {
    steady_history().into_iter().take(3).collect()
}

/// Four 5 km runs, which cannot determine a slope
pub fn flat_history() -> Vec<ActivityRecord> {
    (1..=4).map(|days| run(5.0, 300.0, days)).collect()
}
