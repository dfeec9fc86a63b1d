//! Reservation types for tracking property stays.
//!
//! This module provides the validated stay interval, the reservation status
//! state machine, and the reservation entity with its builder.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A validated half-open stay interval `[check_in, check_out)`.
///
/// The check-in date is inclusive and the check-out date is exclusive, so a
/// guest departing on the morning of `check_out` frees that night for the
/// next arrival. Construction enforces `check_in < check_out` strictly; a
/// `StayDates` value can never describe an empty or inverted interval.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use stays::StayDates;
///
/// let dates = StayDates::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(dates.nights(), 4);
///
/// // Inverted and empty intervals are rejected
/// let d = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert!(StayDates::new(d, d).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    /// Creates a new stay interval.
    ///
    /// # Errors
    ///
    /// Returns an error unless `check_in < check_out` strictly.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ValidationError> {
        if check_in >= check_out {
            return Err(ValidationError {
                field: "dates".into(),
                message: format!("check-in {check_in} must precede check-out {check_out}"),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the inclusive check-in date.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the exclusive check-out date.
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns the number of nights covered by the interval.
    ///
    /// Always at least 1, by the construction invariant.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Tests whether two stay intervals overlap.
    ///
    /// Intervals are half-open, so `[A, B)` and `[C, D)` conflict iff
    /// `A < D && C < B`. Touching endpoints (one stay's check-out equal to
    /// the other's check-in) are NOT an overlap: back-to-back stays are
    /// allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use stays::StayDates;
    ///
    /// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    /// let a = StayDates::new(d(2024, 5, 28), d(2024, 6, 1)).unwrap();
    /// let b = StayDates::new(d(2024, 6, 1), d(2024, 6, 5)).unwrap();
    /// assert!(!a.overlaps(&b));
    ///
    /// let c = StayDates::new(d(2024, 5, 30), d(2024, 6, 2)).unwrap();
    /// assert!(a.overlaps(&c));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

impl fmt::Display for StayDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

/// Status of a reservation within its lifecycle.
///
/// The state machine is:
///
/// ```text
/// Pending --(owner confirms)--------------------> Confirmed   [terminal]
/// Pending --(owner declines / occupant cancels)-> Canceled    [terminal]
/// ```
///
/// There is no transition out of `Confirmed` or `Canceled`. Reservations in
/// `Pending` or `Confirmed` block conflicting requests; `Canceled`
/// reservations are retained for history but never block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Awaiting the property owner's decision. Blocks conflicting requests.
    Pending,
    /// Accepted by the property owner. Terminal; blocks conflicting requests.
    Confirmed,
    /// Declined by the owner or withdrawn by the occupant. Terminal.
    Canceled,
}

impl ReservationStatus {
    /// Returns true if no further transition is permitted from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Canceled)
    }

    /// Returns true if reservations in this status block conflicting
    /// requests.
    #[must_use]
    pub const fn blocks_conflicts(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Tests whether the state machine permits a transition to `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stays::ReservationStatus;
    ///
    /// assert!(ReservationStatus::Pending.can_transition_to(ReservationStatus::Confirmed));
    /// assert!(ReservationStatus::Pending.can_transition_to(ReservationStatus::Canceled));
    /// assert!(!ReservationStatus::Confirmed.can_transition_to(ReservationStatus::Canceled));
    /// ```
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed | Self::Canceled)
        )
    }

    /// Returns the canonical string form, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Canceled => "Canceled",
        }
    }

    /// The set of statuses that block conflicting requests.
    pub const ACTIVE: [Self; 2] = [Self::Pending, Self::Confirmed];
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Confirmed" => Ok(Self::Confirmed),
            "Canceled" => Ok(Self::Canceled),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown reservation status: {s}"),
            }),
        }
    }
}

/// A reservation of a property for a stay interval.
///
/// Reservations are created in [`ReservationStatus::Pending`] by an occupant
/// request and transitioned exactly once by the owner (confirm or decline) or
/// the occupant (cancel). The total price is derived at creation time from
/// the interval length and the property's nightly rate, in minor currency
/// units.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use uuid::Uuid;
/// use stays::{Reservation, ReservationStatus, StayDates};
///
/// let dates = StayDates::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
/// )
/// .unwrap();
///
/// let reservation = Reservation::builder(Uuid::new_v4(), Uuid::new_v4(), dates, 300)
///     .build()
///     .unwrap();
/// assert_eq!(reservation.status(), ReservationStatus::Pending);
/// assert_eq!(reservation.total_price(), 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Uuid,
    property_id: Uuid,
    occupant_id: Uuid,
    dates: StayDates,
    status: ReservationStatus,
    total_price: i64,
    created_at: SystemTime,
}

impl Reservation {
    /// Creates a new reservation builder.
    ///
    /// The builder defaults to a fresh random id, `Pending` status, and the
    /// current time; the database layer overrides these when rehydrating
    /// stored rows.
    #[must_use]
    pub fn builder(
        property_id: Uuid,
        occupant_id: Uuid,
        dates: StayDates,
        total_price: i64,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            property_id,
            occupant_id,
            dates,
            status: ReservationStatus::Pending,
            total_price,
            created_at: None,
        }
    }

    /// Returns the reservation identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the reserved property's identifier.
    #[must_use]
    pub const fn property_id(&self) -> Uuid {
        self.property_id
    }

    /// Returns the requesting occupant's identifier.
    #[must_use]
    pub const fn occupant_id(&self) -> Uuid {
        self.occupant_id
    }

    /// Returns the stay interval.
    #[must_use]
    pub const fn dates(&self) -> StayDates {
        self.dates
    }

    /// Returns the inclusive check-in date.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.dates.check_in()
    }

    /// Returns the exclusive check-out date.
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.dates.check_out()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the derived total price in minor currency units.
    #[must_use]
    pub const fn total_price(&self) -> i64 {
        self.total_price
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Returns a copy of this reservation with the given status.
    ///
    /// This does not enforce the state machine; callers go through
    /// [`ReservationStatus::can_transition_to`] (or the store's transactional
    /// transition) before using it.
    #[must_use]
    pub fn with_status(&self, status: ReservationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Builder for creating `Reservation` instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<Uuid>,
    property_id: Uuid,
    occupant_id: Uuid,
    dates: StayDates,
    status: ReservationStatus,
    total_price: i64,
    created_at: Option<SystemTime>,
}

impl ReservationBuilder {
    /// Sets an explicit reservation id (used when loading stored rows).
    #[must_use]
    pub const fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the status (used when loading stored rows).
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp (used when loading stored rows).
    #[must_use]
    pub fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the total price is negative. The stay interval is
    /// already validated by [`StayDates::new`].
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if self.total_price < 0 {
            return Err(ValidationError {
                field: "total_price".into(),
                message: format!("total price must be non-negative, got {}", self.total_price),
            });
        }

        Ok(Reservation {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            property_id: self.property_id,
            occupant_id: self.occupant_id,
            dates: self.dates,
            status: self.status,
            total_price: self.total_price,
            created_at: self.created_at.unwrap_or_else(SystemTime::now),
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
