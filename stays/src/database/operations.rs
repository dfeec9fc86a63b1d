//! Database CRUD operations for properties and reservations.
//!
//! This module implements the read and write operations the allocator and
//! the HTTP boundary need. All mutations of reservation state that must be
//! atomic live in the transaction module; this module holds the plain
//! queries and the property writes.

use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection, TransactionBehavior};
use uuid::Uuid;

use crate::error::Result;
use crate::{Property, Reservation, ReservationStatus, StayDates};

use super::connection::Database;
use super::schema::{COUNT_OVERLAPPING, INSERT_PROPERTY};

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(super) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| crate::error::Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs as u64)
}

fn parse_uuid(value: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn parse_date(value: &str) -> rusqlite::Result<NaiveDate> {
    value
        .parse::<NaiveDate>()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Helper function to deserialize a property from a database row.
///
/// Expects row fields in this order: id, `owner_id`, title, location,
/// `price_per_night`, `created_at`.
fn row_to_property(row: &rusqlite::Row<'_>) -> rusqlite::Result<Property> {
    let id: String = row.get(0)?;
    let owner_id: String = row.get(1)?;
    let title: String = row.get(2)?;
    let location: Option<String> = row.get(3)?;
    let price_per_night: i64 = row.get(4)?;
    let created_secs: i64 = row.get(5)?;

    Property::builder(parse_uuid(&owner_id)?, title, price_per_night)
        .id(parse_uuid(&id)?)
        .location(location)
        .created_at(unix_secs_to_systemtime(created_secs))
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Helper function to deserialize a reservation from a database row.
///
/// Expects row fields in this order: id, `property_id`, `occupant_id`,
/// `check_in`, `check_out`, status, `total_price`, `created_at`.
pub(super) fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: String = row.get(0)?;
    let property_id: String = row.get(1)?;
    let occupant_id: String = row.get(2)?;
    let check_in: String = row.get(3)?;
    let check_out: String = row.get(4)?;
    let status: String = row.get(5)?;
    let total_price: i64 = row.get(6)?;
    let created_secs: i64 = row.get(7)?;

    let dates = StayDates::new(parse_date(&check_in)?, parse_date(&check_out)?)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let status: ReservationStatus = status
        .parse()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Reservation::builder(
        parse_uuid(&property_id)?,
        parse_uuid(&occupant_id)?,
        dates,
        total_price,
    )
    .id(parse_uuid(&id)?)
    .status(status)
    .created_at(unix_secs_to_systemtime(created_secs))
    .build()
    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Checks whether any active reservation on the property overlaps the
/// requested interval.
///
/// This is the store-side form of the half-open intersection predicate. It
/// runs both as the planning pre-check and, crucially, inside the
/// conditional-write transaction that serializes racing reservation
/// attempts.
pub(super) fn overlap_exists(
    conn: &Connection,
    property_id: Uuid,
    dates: &StayDates,
) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        COUNT_OVERLAPPING,
        params![
            property_id.to_string(),
            dates.check_in().to_string(),
            dates.check_out().to_string(),
        ],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

// SQL statements for CRUD operations
const SELECT_PROPERTY: &str = r"
    SELECT id, owner_id, title, location, price_per_night, created_at
    FROM properties
    WHERE id = ?
";

const LIST_PROPERTIES: &str = r"
    SELECT id, owner_id, title, location, price_per_night, created_at
    FROM properties
    ORDER BY created_at, id
";

const SELECT_RESERVATION: &str = r"
    SELECT id, property_id, occupant_id, check_in, check_out, status, total_price, created_at
    FROM reservations
    WHERE id = ?
";

const LIST_RESERVATIONS_FOR_OCCUPANT: &str = r"
    SELECT id, property_id, occupant_id, check_in, check_out, status, total_price, created_at
    FROM reservations
    WHERE occupant_id = ?
    ORDER BY check_in, id
";

impl Database {
    /// Creates a property in the database.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction cannot be started
    /// - The insert fails (including a duplicate id)
    /// - The transaction cannot be committed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use stays::database::{Database, DatabaseConfig};
    /// use stays::Property;
    /// use uuid::Uuid;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/stays.db")).unwrap();
    /// let property = Property::builder(Uuid::new_v4(), "Loft", 100).build().unwrap();
    /// db.create_property(&property).unwrap();
    /// ```
    pub fn create_property(&mut self, property: &Property) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_PROPERTY,
            params![
                property.id().to_string(),
                property.owner_id().to_string(),
                property.title(),
                property.location(),
                property.price_per_night(),
                systemtime_to_unix_secs(property.created_at())?,
            ],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Fetches a property by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_property(&self, id: Uuid) -> Result<Option<Property>> {
        match self
            .conn
            .query_row(SELECT_PROPERTY, params![id.to_string()], row_to_property)
        {
            Ok(property) => Ok(Some(property)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_properties(&self) -> Result<Vec<Property>> {
        let mut stmt = self.conn.prepare(LIST_PROPERTIES)?;
        let rows = stmt.query_map([], row_to_property)?;
        let mut properties = Vec::new();
        for row in rows {
            properties.push(row?);
        }
        Ok(properties)
    }

    /// Fetches a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(&self, id: Uuid) -> Result<Option<Reservation>> {
        match self.conn.query_row(
            SELECT_RESERVATION,
            params![id.to_string()],
            row_to_reservation,
        ) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists reservations for a property, filtered by a status set.
    ///
    /// Passing [`ReservationStatus::ACTIVE`] yields the reservations that
    /// block conflicting requests. An empty status set yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use stays::database::{Database, DatabaseConfig};
    /// use stays::ReservationStatus;
    /// use uuid::Uuid;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/stays.db")).unwrap();
    /// let active = db
    ///     .list_reservations_for_property(Uuid::new_v4(), &ReservationStatus::ACTIVE)
    ///     .unwrap();
    /// assert!(active.is_empty());
    /// ```
    pub fn list_reservations_for_property(
        &self,
        property_id: Uuid,
        statuses: &[ReservationStatus],
    ) -> Result<Vec<Reservation>> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; statuses.len()].join(", ");
        let sql = format!(
            "SELECT id, property_id, occupant_id, check_in, check_out, status, total_price, created_at
             FROM reservations
             WHERE property_id = ? AND status IN ({placeholders})
             ORDER BY check_in, id"
        );

        let mut values = Vec::with_capacity(statuses.len() + 1);
        values.push(property_id.to_string());
        values.extend(statuses.iter().map(|s| s.as_str().to_string()));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), row_to_reservation)?;
        let mut reservations = Vec::new();
        for row in rows {
            reservations.push(row?);
        }
        Ok(reservations)
    }

    /// Lists all reservations made by an occupant.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_occupant(&self, occupant_id: Uuid) -> Result<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(LIST_RESERVATIONS_FOR_OCCUPANT)?;
        let rows = stmt.query_map(params![occupant_id.to_string()], row_to_reservation)?;
        let mut reservations = Vec::new();
        for row in rows {
            reservations.push(row?);
        }
        Ok(reservations)
    }

    /// Checks whether any active reservation on the property overlaps the
    /// given interval.
    ///
    /// This is the planning-phase availability pre-check; the authoritative
    /// check re-runs inside the conditional write.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn has_overlapping_reservation(
        &self,
        property_id: Uuid,
        dates: &StayDates,
    ) -> Result<bool> {
        Ok(overlap_exists(&self.conn, property_id, dates)?)
    }
}
