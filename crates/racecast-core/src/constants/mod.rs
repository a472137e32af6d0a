// ABOUTME: Application-wide constants organized by domain
// ABOUTME: Unit conversions, standard race distances, and service identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Unit conversion factors
pub mod units {
    /// Meters in one kilometer
    pub const METERS_PER_KM: f64 = 1_000.0;
    /// Seconds in one day
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Seconds in one hour
    pub const SECONDS_PER_HOUR: u64 = 3_600;
    /// Seconds in one minute
    pub const SECONDS_PER_MINUTE: u64 = 60;
}

/// Standard road race distances in kilometers
pub mod race_distances {
    /// 5K
    pub const FIVE_K: f64 = 5.0;
    /// 10K
    pub const TEN_K: f64 = 10.0;
    /// Half marathon
    pub const HALF_MARATHON: f64 = 21.0975;
    /// Marathon
    pub const MARATHON: f64 = 42.195;

    /// Named standard distances, shortest first
    pub const STANDARD: [(&str, f64); 4] = [
        ("5K", FIVE_K),
        ("10K", TEN_K),
        ("Half Marathon", HALF_MARATHON),
        ("Marathon", MARATHON),
    ];
}

/// Service identifiers for structured logging
pub mod service_names {
    /// Server binary / service name
    pub const RACECAST_SERVER: &str = "racecast-server";
}
