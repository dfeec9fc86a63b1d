//! HTTP routes for the stays API.
//!
//! The authenticated requester identity arrives in the `x-user-id` header;
//! verifying that identity is an upstream concern, this service only
//! requires it to be present and well-formed where an operation needs an
//! actor.

mod properties;
mod reservations;

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Builds the API router.
///
/// Routes:
/// - `POST /properties`, `GET /properties`, `GET /properties/:id`
/// - `GET /properties/:id/reservations` (availability view)
/// - `POST /reservations`, `GET /reservations`, `GET /reservations/:id`
/// - `PUT /reservations/:id` (status transition)
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/properties",
            post(properties::create).get(properties::list),
        )
        .route("/properties/:id", get(properties::show))
        .route(
            "/properties/:id/reservations",
            get(properties::reservations),
        )
        .route(
            "/reservations",
            post(reservations::create).get(reservations::list),
        )
        .route(
            "/reservations/:id",
            get(reservations::show).put(reservations::transition),
        )
        .with_state(state)
}

/// Extracts the authenticated requester identity from the headers.
pub(crate) fn require_identity(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let value = headers
        .get("x-user-id")
        .ok_or(ApiError::MissingIdentity)?
        .to_str()
        .map_err(|_| ApiError::InvalidIdentity)?;
    Uuid::parse_str(value).map_err(|_| ApiError::InvalidIdentity)
}
