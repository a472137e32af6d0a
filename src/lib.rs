// ABOUTME: Main library entry point for the Racecast race-time prediction API
// ABOUTME: Wires configuration, logging, activity sources, and the predictor into an HTTP service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Racecast
//!
//! An HTTP service that predicts a runner's finishing time for a target
//! distance from their own recent activity history.
//!
//! ## Architecture
//!
//! - **`racecast-core`**: errors, activity models, distance and unit constants
//! - **`racecast-intelligence`**: the synchronous prediction pipeline
//! - **`racecast-providers`**: activity sources (Strava REST, in-memory)
//! - **this crate**: configuration, logging, middleware, routes and the server
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use racecast::config::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     racecast::logging::init_from_env()?;
//!     racecast::server::run(&config).await
//! }
//! ```

/// Error taxonomy shared across the workspace
pub use racecast_core::errors;

/// Activity record model
pub use racecast_core::models;

/// Units, race distances and service names
pub use racecast_core::constants;

/// Bearer credential extraction
pub mod auth;

/// Environment configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// HTTP route handlers
pub mod routes;

/// Server state, router and serve loop
pub mod server;
