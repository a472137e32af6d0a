// ABOUTME: Data models shared between activity sources and the predictor
// ABOUTME: Raw provider-shaped activity records live here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Raw activity records as delivered by providers
pub mod activity;

pub use activity::ActivityRecord;
