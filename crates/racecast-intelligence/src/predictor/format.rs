// ABOUTME: Human-readable race time and pace formatting
// ABOUTME: Renders durations as H:MM:SS (hour omitted when zero) and pace as M:SS/km
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use racecast_core::constants::units::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Format a duration as `H:MM:SS`, or `M:SS` when under an hour
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    let hours = total / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = total % SECONDS_PER_MINUTE;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Format a pace given in seconds per kilometer as `M:SS/km`
#[must_use]
pub fn format_pace_per_km(seconds_per_km: f64) -> String {
    let total = whole_seconds(seconds_per_km);
    let minutes = total / SECONDS_PER_MINUTE;
    let secs = total % SECONDS_PER_MINUTE;
    format!("{minutes}:{secs:02}/km")
}

/// Round to one decimal place
#[must_use]
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// Rounding before splitting avoids "4:60" style output
fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    }
}
