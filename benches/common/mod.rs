// ABOUTME: Shared benchmark utilities
// ABOUTME: Re-exports deterministic activity history fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod fixtures;
