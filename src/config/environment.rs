// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses listener, activity source, HTTP client, and predictor settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management
//!
//! Configuration is environment-only; the server binary may override the
//! listener address from the command line.

use anyhow::{bail, Context, Result};
use racecast_core::constants::race_distances;
use racecast_intelligence::PredictorConfig;
use racecast_providers::http_client::HttpClientConfig;
use racecast_providers::strava::{StravaConfig, DEFAULT_STRAVA_API_BASE};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable names
pub mod env_keys {
    /// Listener host
    pub const HOST: &str = "HOST";
    /// Listener port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// `strava` or `memory`
    pub const ACTIVITY_SOURCE: &str = "ACTIVITY_SOURCE";
    /// JSON fixture for the memory source
    pub const ACTIVITY_FIXTURE_PATH: &str = "ACTIVITY_FIXTURE_PATH";
    /// Strava API root
    pub const STRAVA_API_BASE: &str = "STRAVA_API_BASE";
    /// Strava page size
    pub const STRAVA_PER_PAGE: &str = "STRAVA_PER_PAGE";
    /// Strava page cap
    pub const STRAVA_MAX_PAGES: &str = "STRAVA_MAX_PAGES";
    /// Outbound request timeout
    pub const HTTP_CLIENT_TIMEOUT_SECS: &str = "HTTP_CLIENT_TIMEOUT_SECS";
    /// Outbound connect timeout
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: &str = "HTTP_CLIENT_CONNECT_TIMEOUT_SECS";
    /// Distance used when the request omits `distance_km`
    pub const DEFAULT_DISTANCE_KM: &str = "DEFAULT_DISTANCE_KM";
}

/// Default values
pub mod defaults {
    /// Listener host
    pub const HOST: &str = "127.0.0.1";
    /// Listener port
    pub const HTTP_PORT: u16 = 8081;
    /// Strava page cap
    pub const STRAVA_MAX_PAGES: usize = 5;
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Where activity histories come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivitySourceConfig {
    /// Strava REST API, credential is the athlete's access token
    Strava(StravaConfig),
    /// In-memory histories, optionally loaded from a JSON fixture
    Memory {
        /// Fixture mapping credentials to activity lists
        fixture_path: Option<PathBuf>,
    },
}

impl ActivitySourceConfig {
    /// Source name for logging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Strava(_) => "strava",
            Self::Memory { .. } => "memory",
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listener host
    pub host: String,
    /// Listener port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Activity history source
    pub activity_source: ActivitySourceConfig,
    /// Outbound HTTP timeouts
    pub http_client: HttpClientConfig,
    /// Predictor tunables
    pub predictor: PredictorConfig,
    /// Distance used when the request omits one
    pub default_distance_km: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            environment: Environment::default(),
            activity_source: ActivitySourceConfig::Strava(StravaConfig::default()),
            http_client: HttpClientConfig::default(),
            predictor: PredictorConfig::default(),
            default_distance_km: race_distances::FIVE_K,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to an unparsable or
    /// out-of-range value, or names an unknown activity source
    pub fn from_env() -> Result<Self> {
        let http_client_defaults = HttpClientConfig::default();

        let activity_source = match env::var(env_keys::ACTIVITY_SOURCE)
            .unwrap_or_else(|_| "strava".to_owned())
            .to_lowercase()
            .as_str()
        {
            "strava" => ActivitySourceConfig::Strava(StravaConfig {
                base_url: env::var(env_keys::STRAVA_API_BASE)
                    .unwrap_or_else(|_| DEFAULT_STRAVA_API_BASE.to_owned()),
                per_page: env_or(
                    env_keys::STRAVA_PER_PAGE,
                    racecast_providers::strava::MAX_PER_PAGE,
                )?,
                max_pages: env_or(env_keys::STRAVA_MAX_PAGES, defaults::STRAVA_MAX_PAGES)?,
            }),
            "memory" => ActivitySourceConfig::Memory {
                fixture_path: env::var(env_keys::ACTIVITY_FIXTURE_PATH).ok().map(PathBuf::from),
            },
            other => bail!(
                "{} must be 'strava' or 'memory', got '{other}'",
                env_keys::ACTIVITY_SOURCE
            ),
        };

        let config = Self {
            host: env::var(env_keys::HOST).unwrap_or_else(|_| defaults::HOST.to_owned()),
            http_port: env_or(env_keys::HTTP_PORT, defaults::HTTP_PORT)?,
            environment: Environment::from_str_or_default(
                &env::var(env_keys::ENVIRONMENT).unwrap_or_default(),
            ),
            activity_source,
            http_client: HttpClientConfig {
                timeout_secs: env_or(
                    env_keys::HTTP_CLIENT_TIMEOUT_SECS,
                    http_client_defaults.timeout_secs,
                )?,
                connect_timeout_secs: env_or(
                    env_keys::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
                    http_client_defaults.connect_timeout_secs,
                )?,
            },
            predictor: PredictorConfig::from_env().context("Invalid predictor configuration")?,
            default_distance_km: env_or(env_keys::DEFAULT_DISTANCE_KM, race_distances::FIVE_K)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if !(self.default_distance_km.is_finite() && self.default_distance_km > 0.0) {
            bail!(
                "{} must be a finite positive number",
                env_keys::DEFAULT_DISTANCE_KM
            );
        }
        if self.http_client.timeout_secs == 0 {
            bail!("{} must be at least 1", env_keys::HTTP_CLIENT_TIMEOUT_SECS);
        }
        self.predictor
            .validate()
            .context("Invalid predictor configuration")?;
        Ok(())
    }

    /// Listener address as `host:port`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// One-line human readable summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Racecast configuration: environment={}, listen={}, activity_source={}, default_distance_km={}, half_life_days={}",
            self.environment,
            self.bind_address(),
            self.activity_source.name(),
            self.default_distance_km,
            self.predictor.recency_half_life_days,
        )
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {key}: '{raw}'")),
        Err(_) => Ok(default),
    }
}
