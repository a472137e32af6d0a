// ABOUTME: Core types and constants for the Racecast race-time prediction service
// ABOUTME: Foundation crate with error handling, activity records, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Racecast Core
//!
//! Foundation crate providing shared types and constants. It changes
//! infrequently so the intelligence, provider and server crates compile
//! independently on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and HTTP mapping
//! - **models**: Raw activity records as delivered by providers
//! - **constants**: Unit conversions and standard race distances

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
