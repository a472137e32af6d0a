// ABOUTME: Shared HTTP client with connection pooling for activity source API calls
// ABOUTME: Process-wide singleton whose timeouts are fixed once at server startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

/// Timeouts applied to every outbound provider request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// TCP/TLS connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

static CLIENT_CONFIG: OnceLock<HttpClientConfig> = OnceLock::new();
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Fix the shared client's timeouts
///
/// Only the first call has any effect, and only if it happens before the
/// first [`shared_client`] call; later calls are ignored.
pub fn initialize_shared_client(config: HttpClientConfig) {
    let _ = CLIENT_CONFIG.set(config);
}

/// Get the shared HTTP client for provider API calls
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let config = CLIENT_CONFIG.get().copied().unwrap_or_default();

        ClientBuilder::new()
            .user_agent(concat!("racecast/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}
