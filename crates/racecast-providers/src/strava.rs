// ABOUTME: Strava activity history source using the athlete activities REST endpoint
// ABOUTME: Pages through /athlete/activities with the caller's bearer token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::http_client::shared_client;
use crate::ActivitySource;
use async_trait::async_trait;
use racecast_core::errors::{AppError, AppResult};
use racecast_core::models::ActivityRecord;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// Public Strava API root
pub const DEFAULT_STRAVA_API_BASE: &str = "https://www.strava.com/api/v3";
/// Strava's maximum page size
pub const MAX_PER_PAGE: usize = 200;

const PROVIDER_NAME: &str = "strava";

/// Configuration for the Strava activity source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StravaConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Activities requested per page (1-200)
    pub per_page: usize,
    /// Upper bound on pages fetched per request
    pub max_pages: usize,
}

impl Default for StravaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STRAVA_API_BASE.to_owned(),
            per_page: MAX_PER_PAGE,
            max_pages: 5,
        }
    }
}

/// Fetches a user's recent activities from Strava
pub struct StravaActivitySource {
    client: Client,
    config: StravaConfig,
}

impl StravaActivitySource {
    /// Create a source using the shared HTTP client
    #[must_use]
    pub fn new(config: StravaConfig) -> Self {
        Self::with_client(shared_client().clone(), config)
    }

    /// Create a source with an explicit client
    #[must_use]
    pub fn with_client(client: Client, mut config: StravaConfig) -> Self {
        config.per_page = config.per_page.clamp(1, MAX_PER_PAGE);
        config.max_pages = config.max_pages.max(1);
        config.base_url = config.base_url.trim_end_matches('/').to_owned();
        Self { client, config }
    }

    /// Source configuration
    #[must_use]
    pub const fn config(&self) -> &StravaConfig {
        &self.config
    }

    async fn fetch_page(&self, token: &str, page: usize) -> AppResult<Vec<ActivityRecord>> {
        let url = format!("{}/athlete/activities", self.config.base_url);
        let query = [
            ("per_page", self.config.per_page.to_string()),
            ("page", page.to_string()),
        ];
        debug!(%url, page, "fetching Strava activities page");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::external_service("Strava", format!("request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::auth_invalid("Strava rejected the access token"));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                warn!("Failed to read Strava error response body: {e}");
                String::new()
            });
            warn!(%status, %body, "Strava API returned an error");
            return Err(AppError::external_service(
                "Strava",
                format!("API returned {status}"),
            ));
        }

        response
            .json::<Vec<ActivityRecord>>()
            .await
            .map_err(|e| AppError::external_service("Strava", format!("invalid response: {e}")))
    }
}

#[async_trait]
impl ActivitySource for StravaActivitySource {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn fetch_activities(&self, credential: &str) -> AppResult<Vec<ActivityRecord>> {
        let mut activities = Vec::new();

        for page in 1..=self.config.max_pages {
            let batch = self.fetch_page(credential, page).await?;
            let short_page = batch.len() < self.config.per_page;
            activities.extend(batch);
            if short_page {
                break;
            }
        }

        info!(count = activities.len(), "fetched Strava activities");
        Ok(activities)
    }
}
