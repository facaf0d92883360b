//! Typed error handling for the API
//!
//! Handlers return [`ApiError`] and never emit partial responses: every
//! failure is translated exactly once, at the HTTP boundary, into the JSON
//! envelope `{"error": {"message": ..., "status": ...}}`.
//!
//! # Error taxonomy
//!
//! - [`ApiError::NotFound`]: a path-parameter lookup matched no row → 404
//! - [`ApiError::BadRequest`]: a uniqueness or foreign-key violation
//!   surfaced by the database, or an unparseable path parameter → 400
//! - [`ApiError::Internal`]: anything else (connection failures,
//!   programming errors) → 500

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use crate::storage::StoreError;

/// The error type returned by every handler
#[derive(Debug)]
pub enum ApiError {
    /// The row identified by a path parameter does not exist
    NotFound(String),

    /// The request conflicts with a database constraint or is malformed
    BadRequest(String),

    /// Unclassified failure; the message is reported to the caller
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Standard not-found error for a resource identified by a path parameter
    pub fn not_found(resource: &str, key: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{resource} not found: {key}"))
    }

    /// Convert to the wire envelope
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: ErrorDetail {
                message: self.to_string(),
                status: self.status_code().as_u16(),
            },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Internal(msg) => {
                write!(f, "{}", msg)
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Wire shape of every failure: `{"error": {"message", "status"}}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.to_body())).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(msg) => ApiError::BadRequest(msg),
            StoreError::UnknownCompany(_) => ApiError::BadRequest(err.to_string()),
            StoreError::Backend(msg) => ApiError::Internal(msg),
            StoreError::Sqlx(e) => ApiError::Internal(e.to_string()),
        }
    }
}
