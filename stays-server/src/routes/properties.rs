//! Property handlers.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stays::{Property, Reservation, ReservationStatus};

use super::require_identity;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct CreatePropertyRequest {
    title: String,
    #[serde(default)]
    location: Option<String>,
    price_per_night: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PropertyResponse {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    location: Option<String>,
    price_per_night: i64,
}

impl From<&Property> for PropertyResponse {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id(),
            owner_id: property.owner_id(),
            title: property.title().to_string(),
            location: property.location().map(ToString::to_string),
            price_per_night: property.price_per_night(),
        }
    }
}

/// Availability view of a reservation: dates and status only, no occupant
/// or pricing details.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookedDatesResponse {
    id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    status: ReservationStatus,
}

impl From<&Reservation> for BookedDatesResponse {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id(),
            check_in: reservation.check_in(),
            check_out: reservation.check_out(),
            status: reservation.status(),
        }
    }
}

/// `POST /properties`
pub(crate) async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreatePropertyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let owner_id = require_identity(&headers)?;

    let property = Property::builder(owner_id, body.title, body.price_per_night)
        .location(body.location)
        .build()
        .map_err(stays::Error::from)?;

    let mut db = state.db().await;
    db.create_property(&property)?;

    Ok((StatusCode::CREATED, Json(PropertyResponse::from(&property))))
}

/// `GET /properties`
pub(crate) async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<PropertyResponse>>, ApiError> {
    let db = state.db().await;
    let properties = db.list_properties()?;
    Ok(Json(properties.iter().map(PropertyResponse::from).collect()))
}

/// `GET /properties/:id`
pub(crate) async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PropertyResponse>, ApiError> {
    let db = state.db().await;
    let property = db.get_property(id)?.ok_or(stays::Error::NotFound {
        resource: format!("property {id}"),
    })?;
    Ok(Json(PropertyResponse::from(&property)))
}

/// `GET /properties/:id/reservations`
///
/// Lists the active (pending or confirmed) reservations on a property, as
/// clients need to render availability. Canceled reservations never appear.
pub(crate) async fn reservations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<BookedDatesResponse>>, ApiError> {
    let db = state.db().await;
    if db.get_property(id)?.is_none() {
        return Err(stays::Error::NotFound {
            resource: format!("property {id}"),
        }
        .into());
    }

    let active = db.list_reservations_for_property(id, &ReservationStatus::ACTIVE)?;
    Ok(Json(active.iter().map(BookedDatesResponse::from).collect()))
}
