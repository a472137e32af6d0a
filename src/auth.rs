// ABOUTME: Caller identity extraction from the Authorization header
// ABOUTME: Resolves the opaque bearer credential handed to the activity source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Bearer credential extraction
//!
//! The service does not issue or verify tokens itself. The bearer value is
//! passed through to the activity source, which decides whether it is valid.

use crate::errors::{AppError, AppResult};
use axum::http::{header::AUTHORIZATION, HeaderMap};

const BEARER_SCHEME: &str = "Bearer";

/// Extract the bearer token from an Authorization header value
///
/// The scheme is matched case-insensitively and surrounding whitespace is
/// ignored.
///
/// # Errors
///
/// Returns `AuthRequired` if the header is not a bearer credential or the
/// token is blank
pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
    let (scheme, token) = auth_header
        .trim()
        .split_once(' ')
        .ok_or_else(AppError::auth_required)?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AppError::auth_required());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::auth_required());
    }
    Ok(token)
}

/// Resolve the caller's credential from request headers
///
/// # Errors
///
/// Returns `AuthRequired` when the header is missing, not valid UTF-8, or
/// not a non-empty bearer credential
pub fn credential_from_headers(headers: &HeaderMap) -> AppResult<String> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    extract_bearer_token(header).map(str::to_owned)
}
