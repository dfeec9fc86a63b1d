//! Reservation handlers.
//!
//! The creation handler is the HTTP face of the booking interval allocator:
//! it builds a reserve plan and executes it, and the store's conditional
//! write guarantees that two racing requests for overlapping intervals can
//! never both commit.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stays::{
    PlanExecutor, Reservation, ReservationStatus, ReserveOptions, ReservePlan, StayDates,
    TransitionOptions, TransitionPlan,
};

use super::require_identity;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct CreateReservationRequest {
    property_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct TransitionRequest {
    status: ReservationStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReservationResponse {
    id: Uuid,
    property_id: Uuid,
    occupant_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    status: ReservationStatus,
    total_price: i64,
}

impl From<&Reservation> for ReservationResponse {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id(),
            property_id: reservation.property_id(),
            occupant_id: reservation.occupant_id(),
            check_in: reservation.check_in(),
            check_out: reservation.check_out(),
            status: reservation.status(),
            total_price: reservation.total_price(),
        }
    }
}

/// `POST /reservations`
pub(crate) async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let occupant_id = require_identity(&headers)?;

    let dates = StayDates::new(body.check_in, body.check_out).map_err(stays::Error::from)?;
    let options = ReserveOptions::new(body.property_id, occupant_id, dates);

    let mut db = state.db().await;
    let plan = ReservePlan::new(options).build_plan(&db)?;
    let result = PlanExecutor::new(&mut db).execute(&plan)?;

    let reservation = result.reservation.ok_or(stays::Error::DatabaseCorruption {
        details: "reserve plan executed without yielding a reservation".to_string(),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from(&reservation)),
    ))
}

/// `GET /reservations`
///
/// Lists the requester's own reservations.
pub(crate) async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let occupant_id = require_identity(&headers)?;

    let db = state.db().await;
    let reservations = db.list_reservations_for_occupant(occupant_id)?;
    Ok(Json(
        reservations.iter().map(ReservationResponse::from).collect(),
    ))
}

/// `GET /reservations/:id`
pub(crate) async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let db = state.db().await;
    let reservation = db.get_reservation(id)?.ok_or(stays::Error::NotFound {
        resource: format!("reservation {id}"),
    })?;
    Ok(Json(ReservationResponse::from(&reservation)))
}

/// `PUT /reservations/:id`
///
/// Transitions a reservation's status: the property owner confirms or
/// declines, the occupant cancels. Transitions out of a terminal state are
/// conflicts.
pub(crate) async fn transition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<TransitionRequest>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let actor_id = require_identity(&headers)?;

    let options = TransitionOptions::new(id, actor_id, body.status);

    let mut db = state.db().await;
    let plan = TransitionPlan::new(options).build_plan(&db)?;
    let result = PlanExecutor::new(&mut db).execute(&plan)?;

    let reservation = result.reservation.ok_or(stays::Error::DatabaseCorruption {
        details: "transition plan executed without yielding a reservation".to_string(),
    })?;

    Ok(Json(ReservationResponse::from(&reservation)))
}
