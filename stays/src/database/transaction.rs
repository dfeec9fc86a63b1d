//! Transactional reservation writes.
//!
//! This module holds the two mutations that carry the correctness-critical
//! guarantees of the system: the conditional reservation insert and the
//! status transition. Both run inside `BEGIN IMMEDIATE` transactions, which
//! acquire the `SQLite` write lock up front and therefore serialize racing
//! writers; the decisive validity check is re-executed inside the
//! transaction, so a check made during planning can never be invalidated
//! between read and write.

use rusqlite::{params, TransactionBehavior};

use crate::error::{Error, Result};
use crate::{Reservation, ReservationStatus};
use uuid::Uuid;

use super::connection::Database;
use super::operations::{overlap_exists, row_to_reservation, systemtime_to_unix_secs};
use super::schema::INSERT_RESERVATION;

const SELECT_FOR_TRANSITION: &str = r"
    SELECT id, property_id, occupant_id, check_in, check_out, status, total_price, created_at
    FROM reservations
    WHERE id = ?
";

const UPDATE_STATUS: &str = r"
    UPDATE reservations
    SET status = ?
    WHERE id = ?
";

impl Database {
    /// Inserts a reservation if, and only if, its interval is still free.
    ///
    /// The availability check and the insert execute as one IMMEDIATE
    /// transaction. Under concurrent attempts for the same property the
    /// effective commit order decides the winner: the loser observes the
    /// winner's row when its own transaction acquires the lock and backs out
    /// without writing anything.
    ///
    /// Returns `true` if the reservation was inserted, `false` if an active
    /// reservation overlapped the requested interval.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction cannot be started
    /// - The insert fails
    /// - The transaction cannot be committed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use stays::database::{Database, DatabaseConfig};
    /// use stays::{Property, Reservation, StayDates};
    /// use chrono::NaiveDate;
    /// use uuid::Uuid;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/stays.db")).unwrap();
    /// let property = Property::builder(Uuid::new_v4(), "Loft", 100).build().unwrap();
    /// db.create_property(&property).unwrap();
    ///
    /// let dates = StayDates::new(
    ///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
    /// )
    /// .unwrap();
    /// let reservation = Reservation::builder(property.id(), Uuid::new_v4(), dates, 400)
    ///     .build()
    ///     .unwrap();
    /// assert!(db.try_create_reservation(&reservation).unwrap());
    /// ```
    pub fn try_create_reservation(&mut self, reservation: &Reservation) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if overlap_exists(&tx, reservation.property_id(), &reservation.dates())? {
            // Dropping the transaction rolls it back; nothing was written.
            log::debug!(
                "reservation conflict for property {} on {}",
                reservation.property_id(),
                reservation.dates()
            );
            return Ok(false);
        }

        tx.execute(
            INSERT_RESERVATION,
            params![
                reservation.id().to_string(),
                reservation.property_id().to_string(),
                reservation.occupant_id().to_string(),
                reservation.check_in().to_string(),
                reservation.check_out().to_string(),
                reservation.status().as_str(),
                reservation.total_price(),
                systemtime_to_unix_secs(reservation.created_at())?,
            ],
        )?;

        tx.commit()?;
        Ok(true)
    }

    /// Transitions a reservation's status, enforcing the state machine.
    ///
    /// The current-status read and the update execute as one IMMEDIATE
    /// transaction, so a reservation can never transition twice even under
    /// concurrent confirm/cancel attempts.
    ///
    /// Returns the updated reservation.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`Error::NotFound`] if no reservation has the given id
    /// - [`Error::InvalidTransition`] if the reservation is already in a
    ///   terminal state (or the target is not reachable from the current
    ///   status)
    /// - A database error if the transaction fails
    pub fn transition_reservation(
        &mut self,
        id: Uuid,
        target: ReservationStatus,
    ) -> Result<Reservation> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = match tx.query_row(
            SELECT_FOR_TRANSITION,
            params![id.to_string()],
            row_to_reservation,
        ) {
            Ok(reservation) => reservation,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(Error::NotFound {
                    resource: format!("reservation {id}"),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if !current.status().can_transition_to(target) {
            return Err(Error::InvalidTransition {
                from: current.status(),
                to: target,
            });
        }

        tx.execute(UPDATE_STATUS, params![target.as_str(), id.to_string()])?;
        tx.commit()?;

        Ok(current.with_status(target))
    }
}
