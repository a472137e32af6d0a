// ABOUTME: Activity history sources for the Racecast service
// ABOUTME: One async trait with Strava and in-memory implementations plus a shared HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Racecast Providers
//!
//! The predictor never performs I/O; the HTTP layer awaits an
//! [`ActivitySource`] once per request and hands the records over.

/// Shared HTTP client with configured timeouts
pub mod http_client;

/// In-memory source for tests, benches and demo mode
pub mod memory;

/// Strava REST source
pub mod strava;

use async_trait::async_trait;
use racecast_core::errors::AppResult;
use racecast_core::models::ActivityRecord;

pub use memory::InMemoryActivitySource;
pub use strava::{StravaActivitySource, StravaConfig};

/// A place a user's activity history can be fetched from
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Source name for logging
    fn name(&self) -> &'static str;

    /// Fetch the user's activities
    ///
    /// `credential` is the opaque identity supplied by the caller's auth
    /// layer (for Strava, the athlete's access token).
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when the credential is rejected and
    /// `ExternalServiceError` when the source fails
    async fn fetch_activities(&self, credential: &str) -> AppResult<Vec<ActivityRecord>>;
}
