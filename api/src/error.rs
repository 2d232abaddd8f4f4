//! Unified error types for the Dambo underwriting API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core underwriting logic errors
//! - `NormalizerError`: Remote amount-normalization client errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure underwriting logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Region could not be classified: {0}")]
    UnclassifiedRegion(String),

    #[error("Unsupported combination: {0}")]
    Unsupported(String),
}

/// Remote amount-normalization client errors
///
/// These never reach HTTP callers: any failure degrades silently to the
/// local parsing grammar (logged only).
#[derive(Debug, Error)]
pub enum NormalizerError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Service error: {status} - {message}")]
    Service { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::UnclassifiedRegion(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Region not classified",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Unsupported(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Unsupported combination",
                Some(msg.clone()),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
