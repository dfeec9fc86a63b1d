//! Reserve operation planning.
//!
//! This module implements the planning half of the booking interval
//! allocator: validating a reservation request against the property, the
//! requester, and the existing active reservations, then emitting the plan
//! that the executor applies through the store's conditional write.

use uuid::Uuid;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::{Reservation, StayDates};

use super::plan::{OperationPlan, PlanAction};

/// Options for a reserve operation.
///
/// The stay interval arrives as a [`StayDates`], so the `check_in <
/// check_out` invariant is already established before planning begins; an
/// invalid range can never reach the allocator.
#[derive(Debug, Clone)]
pub struct ReserveOptions {
    /// The property to reserve.
    pub property_id: Uuid,

    /// The requesting occupant.
    pub occupant_id: Uuid,

    /// The requested stay interval.
    pub dates: StayDates,
}

impl ReserveOptions {
    /// Creates a new `ReserveOptions`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use uuid::Uuid;
    /// use stays::{ReserveOptions, StayDates};
    ///
    /// let dates = StayDates::new(
    ///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
    /// )
    /// .unwrap();
    /// let options = ReserveOptions::new(Uuid::new_v4(), Uuid::new_v4(), dates);
    /// assert_eq!(options.dates.nights(), 4);
    /// ```
    #[must_use]
    pub const fn new(property_id: Uuid, occupant_id: Uuid, dates: StayDates) -> Self {
        Self {
            property_id,
            occupant_id,
            dates,
        }
    }
}

/// A reservation plan generator.
///
/// This struct is responsible for analyzing a reserve request and
/// generating a plan that describes what actions to take.
pub struct ReservePlan {
    options: ReserveOptions,
}

impl ReservePlan {
    /// Creates a new reserve plan with the given options.
    #[must_use]
    pub const fn new(options: ReserveOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this reserve request.
    ///
    /// This method performs all validation and determines what actions are
    /// needed. It does NOT modify the database; the availability check here
    /// is a pre-check that lets doomed requests fail fast, and the executor
    /// re-validates availability inside the store's conditional write.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`Error::NotFound`] if the property does not exist
    /// - [`Error::Validation`] if the requester owns the property
    /// - [`Error::DatesUnavailable`] if an active reservation overlaps the
    ///   requested interval
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::NaiveDate;
    /// use uuid::Uuid;
    /// use stays::{Database, DatabaseConfig, ReserveOptions, ReservePlan, StayDates};
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/stays.db")).unwrap();
    /// let dates = StayDates::new(
    ///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
    /// )
    /// .unwrap();
    /// let options = ReserveOptions::new(Uuid::new_v4(), Uuid::new_v4(), dates);
    /// let plan = ReservePlan::new(options).build_plan(&db);
    /// ```
    pub fn build_plan(&self, db: &Database) -> Result<OperationPlan> {
        let mut plan = OperationPlan::new(format!(
            "Reserve property {} over {}",
            self.options.property_id, self.options.dates
        ));

        // Step 1: the property must exist
        let property = db.get_property(self.options.property_id)?.ok_or_else(|| {
            Error::NotFound {
                resource: format!("property {}", self.options.property_id),
            }
        })?;

        // Step 2: owners cannot book their own property
        if property.owner_id() == self.options.occupant_id {
            return Err(Error::Validation {
                field: "occupant_id".into(),
                message: "property owners cannot reserve their own property".into(),
            });
        }

        // Step 3: availability pre-check against active reservations
        if db.has_overlapping_reservation(self.options.property_id, &self.options.dates)? {
            return Err(Error::DatesUnavailable {
                property_id: self.options.property_id,
                check_in: self.options.dates.check_in(),
                check_out: self.options.dates.check_out(),
            });
        }

        // Step 4: derive the total price from the interval and nightly rate
        let total_price = self.options.dates.nights() * property.price_per_night();

        // Step 5: the pending reservation to insert
        let reservation = Reservation::builder(
            self.options.property_id,
            self.options.occupant_id,
            self.options.dates,
            total_price,
        )
        .build()?;

        plan = plan.add_action(PlanAction::CreateReservation(reservation));

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, sample_dates, sample_property, sample_reservation,
    };
    use crate::ReservationStatus;

    #[test]
    fn test_plan_new_reservation() {
        let mut db = create_test_database();
        let property = sample_property(100);
        db.create_property(&property).unwrap();

        let options = ReserveOptions::new(
            property.id(),
            Uuid::new_v4(),
            sample_dates((2024, 6, 1), (2024, 6, 5)),
        );
        let plan = ReservePlan::new(options).build_plan(&db).unwrap();

        assert_eq!(plan.len(), 1);
        match &plan.actions[0] {
            PlanAction::CreateReservation(r) => {
                assert_eq!(r.property_id(), property.id());
                assert_eq!(r.status(), ReservationStatus::Pending);
                assert_eq!(r.total_price(), 400);
            }
            PlanAction::TransitionStatus { .. } => panic!("expected CreateReservation action"),
        }
    }

    #[test]
    fn test_plan_three_nights_price() {
        let mut db = create_test_database();
        let property = sample_property(100);
        db.create_property(&property).unwrap();

        let options = ReserveOptions::new(
            property.id(),
            Uuid::new_v4(),
            sample_dates((2024, 6, 1), (2024, 6, 4)),
        );
        let plan = ReservePlan::new(options).build_plan(&db).unwrap();

        match &plan.actions[0] {
            PlanAction::CreateReservation(r) => assert_eq!(r.total_price(), 300),
            PlanAction::TransitionStatus { .. } => panic!("expected CreateReservation action"),
        }
    }

    #[test]
    fn test_plan_unknown_property() {
        let db = create_test_database();
        let options = ReserveOptions::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            sample_dates((2024, 6, 1), (2024, 6, 5)),
        );
        let result = ReservePlan::new(options).build_plan(&db);
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_plan_owner_self_booking_rejected() {
        let mut db = create_test_database();
        let property = sample_property(100);
        db.create_property(&property).unwrap();

        let options = ReserveOptions::new(
            property.id(),
            property.owner_id(),
            sample_dates((2024, 6, 1), (2024, 6, 5)),
        );
        let result = ReservePlan::new(options).build_plan(&db);

        assert!(matches!(
            result,
            Err(Error::Validation { ref field, .. }) if field == "occupant_id"
        ));
    }

    #[test]
    fn test_plan_overlap_rejected() {
        let mut db = create_test_database();
        let property = sample_property(100);
        db.create_property(&property).unwrap();

        let existing = sample_reservation(&property, (2024, 6, 1), (2024, 6, 5));
        assert!(db.try_create_reservation(&existing).unwrap());

        let options = ReserveOptions::new(
            property.id(),
            Uuid::new_v4(),
            sample_dates((2024, 6, 4), (2024, 6, 8)),
        );
        let result = ReservePlan::new(options).build_plan(&db);

        assert!(matches!(result, Err(Error::DatesUnavailable { .. })));
    }

    #[test]
    fn test_plan_touching_endpoint_allowed() {
        let mut db = create_test_database();
        let property = sample_property(100);
        db.create_property(&property).unwrap();

        let existing = sample_reservation(&property, (2024, 5, 28), (2024, 6, 1));
        assert!(db.try_create_reservation(&existing).unwrap());

        let options = ReserveOptions::new(
            property.id(),
            Uuid::new_v4(),
            sample_dates((2024, 6, 1), (2024, 6, 5)),
        );
        let plan = ReservePlan::new(options).build_plan(&db).unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_plan_canceled_reservation_does_not_block() {
        let mut db = create_test_database();
        let property = sample_property(100);
        db.create_property(&property).unwrap();

        let existing = sample_reservation(&property, (2024, 6, 1), (2024, 6, 5));
        assert!(db.try_create_reservation(&existing).unwrap());
        db.transition_reservation(existing.id(), ReservationStatus::Canceled)
            .unwrap();

        let options = ReserveOptions::new(
            property.id(),
            Uuid::new_v4(),
            sample_dates((2024, 6, 1), (2024, 6, 5)),
        );
        let plan = ReservePlan::new(options).build_plan(&db).unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_plan_does_not_mutate() {
        let mut db = create_test_database();
        let property = sample_property(100);
        db.create_property(&property).unwrap();

        let options = ReserveOptions::new(
            property.id(),
            Uuid::new_v4(),
            sample_dates((2024, 6, 1), (2024, 6, 5)),
        );
        let _plan = ReservePlan::new(options).build_plan(&db).unwrap();

        // Planning alone must write nothing
        let active = db
            .list_reservations_for_property(property.id(), &ReservationStatus::ACTIVE)
            .unwrap();
        assert!(active.is_empty());
    }
}
