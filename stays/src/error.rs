//! Error types for the stays library.
//!
//! This module provides the error hierarchy for all operations in the stays
//! library, using `thiserror` for ergonomic error handling.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::reservation::ReservationStatus;

/// Result type alias for operations that may fail with a stays error.
///
/// # Examples
///
/// ```
/// use stays::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the stays library.
///
/// The variants fall into two groups: business errors that reflect the
/// caller's request or the state of the world (`Validation`,
/// `DatesUnavailable`, `InvalidTransition`, `NotFound`) and store errors that
/// reflect infrastructure faults. Business errors are never retryable as-is;
/// store errors are transient and safe to retry with backoff.
#[derive(Debug, Error)]
pub enum Error {
    /// A validation error occurred (malformed or illegal request).
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested dates conflict with an existing reservation.
    #[error("dates unavailable for property {property_id}: [{check_in}, {check_out}) overlaps an active reservation")]
    DatesUnavailable {
        /// The property the request was made against.
        property_id: Uuid,
        /// The requested check-in date.
        check_in: NaiveDate,
        /// The requested check-out date.
        check_out: NaiveDate,
    },

    /// A reservation state-machine violation occurred.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        /// The current status of the reservation.
        from: ReservationStatus,
        /// The requested target status.
        to: ReservationStatus,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if the error indicates a missing resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use stays::Error;
    ///
    /// let err = Error::NotFound { resource: "property 42".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error is a business-state conflict.
    ///
    /// Conflicts may be retried by the caller with a different request
    /// (different dates); they are not transient infrastructure faults.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DatesUnavailable { .. } | Self::InvalidTransition { .. }
        )
    }

    /// Check if the error is a transient store fault, safe to retry with
    /// backoff.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Io(_) | Self::LockTimeout { .. }
        )
    }
}
