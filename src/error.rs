// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::StoreError;

/// A rejected workout submission.
///
/// The `Display` text is the message shown to the user in the form alert.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("The {0} must be a number")]
    NotANumber(&'static str),

    #[error("The distance must be a positive value")]
    NonPositiveDistance,

    #[error("The duration must be a positive value")]
    NonPositiveDuration,

    #[error("The cadence must be a positive value")]
    NonPositiveCadence,

    #[error("The elevation gain must be a positive value")]
    NonPositiveElevation,

    #[error("Select a location on the map first")]
    NoLocationSelected,

    #[error("The selected location is not a valid coordinate")]
    InvalidLocation,

    #[error("The {0} is out of range")]
    OutOfRange(&'static str),
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                Some(err.to_string()),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
