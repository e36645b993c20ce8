//! # HTTP API Errors
//!
//! Every failure is local to one request and rendered as a status code plus
//! a `{"error": "..."}` body.

use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Book API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request body does not match the book shape
    #[error("{0}")]
    MalformedInput(String),

    /// Path id segment is not an integer
    #[error("Invalid ID")]
    InvalidIdentifier,

    /// No book carries the requested id
    #[error("Book not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidIdentifier => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Poisoned => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedInput(err.to_string())
    }
}

/// A path segment that fails to decode is an unusable identifier
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::InvalidIdentifier
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
