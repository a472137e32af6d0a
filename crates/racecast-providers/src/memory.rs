// ABOUTME: In-memory activity source keyed by credential, for tests, benches, and demo mode
// ABOUTME: Can be loaded from a JSON fixture mapping credentials to activity lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::ActivitySource;
use async_trait::async_trait;
use racecast_core::errors::{AppError, AppResult};
use racecast_core::models::ActivityRecord;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Activity histories held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivitySource {
    activities: HashMap<String, Vec<ActivityRecord>>,
}

impl InMemoryActivitySource {
    /// Create an empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the history returned for `credential`
    #[must_use]
    pub fn with_user(
        mut self,
        credential: impl Into<String>,
        records: Vec<ActivityRecord>,
    ) -> Self {
        self.activities.insert(credential.into(), records);
        self
    }

    /// Load `{ "<credential>": [<activity>, ...], ... }` from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read activity fixture {}: {e}", path.display()))
        })?;
        let activities = serde_json::from_str(&raw).map_err(|e| {
            AppError::config(format!("invalid activity fixture {}: {e}", path.display()))
        })?;
        Ok(Self { activities })
    }

    /// Number of registered users
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.activities.len()
    }
}

#[async_trait]
impl ActivitySource for InMemoryActivitySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_activities(&self, credential: &str) -> AppResult<Vec<ActivityRecord>> {
        self.activities
            .get(credential)
            .cloned()
            .ok_or_else(|| AppError::auth_invalid("Unknown user credential"))
    }
}
