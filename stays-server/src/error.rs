//! API error type with status-code mapping.
//!
//! This module wraps library errors and maps each error kind to a distinct
//! HTTP status. Every kind surfaces to the caller unchanged in kind; nothing
//! is silently recovered.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use stays::Error as LibError;

/// API-facing error type.
#[derive(Debug)]
pub enum ApiError {
    /// Library error (wrapped).
    Library(LibError),

    /// The request is missing the authenticated requester identity.
    MissingIdentity,

    /// The requester identity header is present but not a valid id.
    InvalidIdentity,
}

impl ApiError {
    /// Maps this error to its HTTP status code.
    ///
    /// - `Validation` and identity problems are the caller's fault: 400
    /// - `NotFound`: 404
    /// - `DatesUnavailable` and `InvalidTransition` are business-state
    ///   conflicts: 409
    /// - Transient store faults are retryable: 503
    /// - Anything else inside the store: 500
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingIdentity | Self::InvalidIdentity => StatusCode::BAD_REQUEST,
            Self::Library(lib_err) => match lib_err {
                LibError::Validation { .. } => StatusCode::BAD_REQUEST,
                LibError::NotFound { .. } => StatusCode::NOT_FOUND,
                LibError::DatesUnavailable { .. } | LibError::InvalidTransition { .. } => {
                    StatusCode::CONFLICT
                }
                LibError::Database(_) | LibError::Io(_) | LibError::LockTimeout { .. } => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                LibError::Configuration(_)
                | LibError::DatabaseCorruption { .. }
                | LibError::UnsupportedSchemaVersion { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MissingIdentity => "missing x-user-id header".to_string(),
            Self::InvalidIdentity => "x-user-id header is not a valid id".to_string(),
            Self::Library(lib_err) => lib_err.to_string(),
        }
    }
}

impl From<LibError> for ApiError {
    fn from(err: LibError) -> Self {
        Self::Library(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
