// ABOUTME: Shared helpers for Racecast integration tests
// ABOUTME: HTTP request helpers and activity history fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod axum_test;
pub mod fixtures;
