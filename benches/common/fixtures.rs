// ABOUTME: Benchmark test fixtures for generating realistic activity histories
// ABOUTME: Provides deterministic data generation for reproducible performance measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for generating activity histories.
//!
//! Histories are mostly steady runs with a sprinkling of rides, heavily
//! paused runs and pace outliers, so every pipeline stage has work to do.

use chrono::{DateTime, Duration, TimeZone, Utc};
use racecast::models::ActivityRecord;

/// Predefined history sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum HistorySize {
    /// One Strava page
    Page,
    /// The default page cap
    Full,
    /// Stress size
    Large,
}

impl HistorySize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Page => 200,
            Self::Full => 1_000,
            Self::Large => 10_000,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Full => "full",
            Self::Large => "large",
        }
    }
}

/// Fixed reference time so benchmark inputs do not drift between runs
#[must_use]
pub fn bench_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Generate `count` activities going back one day at a time from [`bench_now`]
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn generate_history(count: usize) -> Vec<ActivityRecord> {
    let now = bench_now();
    (0..count)
        .map(|index| {
            let distance_km = 3.0 + ((index * 37) % 180) as f64 / 10.0;
            let pace = 290.0 + ((index * 13) % 40) as f64 + distance_km * 1.5;
            let moving = distance_km * pace;
            let meters = distance_km * 1_000.0;
            let start = (now - Duration::days(index as i64)).to_rfc3339();

            match index % 20 {
                0 => ActivityRecord::new("Ride", distance_km * 4_000.0, moving, None, start),
                7 => ActivityRecord::new("Run", meters, moving, Some(moving * 2.0), start),
                13 => ActivityRecord::new("Run", meters, moving * 3.0, None, start),
                _ => ActivityRecord::new("Run", meters, moving, Some(moving * 1.05), start),
            }
        })
        .collect()
}
