// ABOUTME: Configuration module for the Racecast server
// ABOUTME: Environment-only configuration of listener, activity source, and predictor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment-based server configuration
pub mod environment;

pub use environment::{ActivitySourceConfig, Environment, ServerConfig};
