// ABOUTME: Unified error handling with error codes, HTTP status mapping, and JSON error bodies
// ABOUTME: Every request-terminating failure in the service is expressed as an AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Defines the error taxonomy shared by the predictor, the activity sources and
//! the HTTP layer. Each [`ErrorCode`] maps to exactly one HTTP status; the
//! message carried by an [`AppError`] is surfaced verbatim to the end user.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    /// No resolvable user identity on the request
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,

    // Validation (3000-3999)
    /// Request parameter failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Not enough usable history to fit a model
    #[serde(rename = "INSUFFICIENT_DATA")]
    InsufficientData = 3100,

    // External Services (5000-5999)
    /// Activity source returned an error or was unreachable
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,

    // Configuration (6000-6999)
    /// Configuration value is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Regression could not be solved for the given points
    #[serde(rename = "MODEL_FIT_FAILED")]
    ModelFitFailed = 9100,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::InsufficientData => 400,
            Self::AuthRequired => 401,
            Self::ExternalServiceError => 502,
            Self::ModelFitFailed | Self::ConfigInvalid | Self::InternalError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::InvalidInput => "The provided input is invalid",
            Self::InsufficientData => "Not enough usable activity history",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
            Self::ModelFitFailed => "The performance model could not be fitted",
        }
    }

    /// Stable string form, identical to the serialized representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::InvalidInput => "INVALID_INPUT",
            Self::InsufficientData => "INSUFFICIENT_DATA",
            Self::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ModelFitFailed => "MODEL_FIT_FAILED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message, shown to the end user as-is
    pub message: String,
    /// Request ID for correlation, when known
    pub request_id: Option<String>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_id: None,
        }
    }

    /// Attach a request ID to the error
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Missing or unresolvable identity
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Identity present but rejected by the activity source
    #[must_use]
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthRequired, message)
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Not enough usable history
    #[must_use]
    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientData, message)
    }

    /// Degenerate regression
    #[must_use]
    pub fn model_fit_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModelFitFailed, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Message for the end user
    pub error: String,
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Correlation ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: error.message,
            code: error.code,
            request_id: error.request_id,
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        } else {
            tracing::debug!(code = %self.code, message = %self.message, "request rejected");
        }

        (status, axum::Json(ErrorResponse::from(self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::InsufficientData.http_status(), 400);
        assert_eq!(ErrorCode::AuthRequired.http_status(), 401);
        assert_eq!(ErrorCode::ModelFitFailed.http_status(), 500);
        assert_eq!(ErrorCode::ExternalServiceError.http_status(), 502);
    }

    #[test]
    fn test_error_code_string_matches_serde() {
        let json = serde_json::to_string(&ErrorCode::InsufficientData).unwrap();
        assert_eq!(json, format!("\"{}\"", ErrorCode::InsufficientData.as_str()));
    }

    #[test]
    fn test_error_response_carries_message_verbatim() {
        let error = AppError::insufficient_data("need at least 4 runs").with_request_id("req-1");
        let response = ErrorResponse::from(error);

        assert_eq!(response.error, "need at least 4 runs");
        assert_eq!(response.code, ErrorCode::InsufficientData);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "need at least 4 runs");
        assert_eq!(json["code"], "INSUFFICIENT_DATA");
        assert_eq!(json["request_id"], "req-1");
    }

    #[test]
    fn test_request_id_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::from(AppError::auth_required())).unwrap();
        assert!(json.get("request_id").is_none());
    }
}
