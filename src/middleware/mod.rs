// ABOUTME: HTTP middleware for request tracing and correlation
// ABOUTME: Provides request ID generation and propagation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Request ID generation and propagation
pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
