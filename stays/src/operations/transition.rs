//! Status transition planning.
//!
//! This module implements planning for reservation status transitions:
//! confirm and decline by the property owner, cancel by the occupant. The
//! state machine itself is re-enforced inside the store's transactional
//! update; planning validates the actor and target and fails fast on
//! terminal states.

use uuid::Uuid;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::ReservationStatus;

use super::plan::{OperationPlan, PlanAction};

/// Options for a status transition operation.
#[derive(Debug, Clone)]
pub struct TransitionOptions {
    /// The reservation to transition.
    pub reservation_id: Uuid,

    /// The authenticated actor requesting the transition.
    pub actor_id: Uuid,

    /// The target status. Only `Confirmed` and `Canceled` are reachable.
    pub target: ReservationStatus,
}

impl TransitionOptions {
    /// Creates a new `TransitionOptions`.
    #[must_use]
    pub const fn new(reservation_id: Uuid, actor_id: Uuid, target: ReservationStatus) -> Self {
        Self {
            reservation_id,
            actor_id,
            target,
        }
    }
}

/// A transition plan generator.
pub struct TransitionPlan {
    options: TransitionOptions,
}

impl TransitionPlan {
    /// Creates a new transition plan with the given options.
    #[must_use]
    pub const fn new(options: TransitionOptions) -> Self {
        Self { options }
    }

    /// Builds an operation plan for this transition request.
    ///
    /// Permissions:
    /// - `Confirmed` requires the actor to be the property owner (confirm)
    /// - `Canceled` is permitted to the property owner (decline) and to the
    ///   occupant (cancel)
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`Error::NotFound`] if the reservation (or its property) does not
    ///   exist
    /// - [`Error::Validation`] if the target is `Pending` or the actor lacks
    ///   permission
    /// - [`Error::InvalidTransition`] if the reservation is already in a
    ///   terminal state
    pub fn build_plan(&self, db: &Database) -> Result<OperationPlan> {
        let reservation = db.get_reservation(self.options.reservation_id)?.ok_or_else(|| {
            Error::NotFound {
                resource: format!("reservation {}", self.options.reservation_id),
            }
        })?;

        if !matches!(
            self.options.target,
            ReservationStatus::Confirmed | ReservationStatus::Canceled
        ) {
            return Err(Error::Validation {
                field: "status".into(),
                message: format!("cannot request a transition to {}", self.options.target),
            });
        }

        let property = db.get_property(reservation.property_id())?.ok_or_else(|| {
            Error::DatabaseCorruption {
                details: format!(
                    "reservation {} references missing property {}",
                    reservation.id(),
                    reservation.property_id()
                ),
            }
        })?;

        let is_owner = self.options.actor_id == property.owner_id();
        let is_occupant = self.options.actor_id == reservation.occupant_id();
        let permitted = match self.options.target {
            ReservationStatus::Confirmed => is_owner,
            ReservationStatus::Canceled => is_owner || is_occupant,
            ReservationStatus::Pending => false,
        };
        if !permitted {
            return Err(Error::Validation {
                field: "actor_id".into(),
                message: format!(
                    "actor {} may not transition reservation {} to {}",
                    self.options.actor_id,
                    reservation.id(),
                    self.options.target
                ),
            });
        }

        if !reservation.status().can_transition_to(self.options.target) {
            return Err(Error::InvalidTransition {
                from: reservation.status(),
                to: self.options.target,
            });
        }

        let plan = OperationPlan::new(format!(
            "Transition reservation {} to {}",
            reservation.id(),
            self.options.target
        ))
        .add_action(PlanAction::TransitionStatus {
            reservation_id: reservation.id(),
            target: self.options.target,
        });

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, sample_property, sample_reservation};

    fn setup() -> (crate::Database, crate::Property, crate::Reservation) {
        let mut db = create_test_database();
        let property = sample_property(100);
        db.create_property(&property).unwrap();
        let reservation = sample_reservation(&property, (2024, 6, 1), (2024, 6, 5));
        assert!(db.try_create_reservation(&reservation).unwrap());
        (db, property, reservation)
    }

    #[test]
    fn test_owner_can_confirm() {
        let (db, property, reservation) = setup();
        let options = TransitionOptions::new(
            reservation.id(),
            property.owner_id(),
            ReservationStatus::Confirmed,
        );
        let plan = TransitionPlan::new(options).build_plan(&db).unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_owner_can_decline() {
        let (db, property, reservation) = setup();
        let options = TransitionOptions::new(
            reservation.id(),
            property.owner_id(),
            ReservationStatus::Canceled,
        );
        let plan = TransitionPlan::new(options).build_plan(&db).unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_occupant_can_cancel() {
        let (db, _property, reservation) = setup();
        let options = TransitionOptions::new(
            reservation.id(),
            reservation.occupant_id(),
            ReservationStatus::Canceled,
        );
        let plan = TransitionPlan::new(options).build_plan(&db).unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_occupant_cannot_confirm() {
        let (db, _property, reservation) = setup();
        let options = TransitionOptions::new(
            reservation.id(),
            reservation.occupant_id(),
            ReservationStatus::Confirmed,
        );
        let result = TransitionPlan::new(options).build_plan(&db);
        assert!(matches!(
            result,
            Err(Error::Validation { ref field, .. }) if field == "actor_id"
        ));
    }

    #[test]
    fn test_stranger_cannot_cancel() {
        let (db, _property, reservation) = setup();
        let options =
            TransitionOptions::new(reservation.id(), Uuid::new_v4(), ReservationStatus::Canceled);
        let result = TransitionPlan::new(options).build_plan(&db);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_target_pending_rejected() {
        let (db, property, reservation) = setup();
        let options = TransitionOptions::new(
            reservation.id(),
            property.owner_id(),
            ReservationStatus::Pending,
        );
        let result = TransitionPlan::new(options).build_plan(&db);
        assert!(matches!(
            result,
            Err(Error::Validation { ref field, .. }) if field == "status"
        ));
    }

    #[test]
    fn test_terminal_state_rejected() {
        let (mut db, property, reservation) = setup();
        db.transition_reservation(reservation.id(), ReservationStatus::Confirmed)
            .unwrap();

        let options = TransitionOptions::new(
            reservation.id(),
            property.owner_id(),
            ReservationStatus::Canceled,
        );
        let result = TransitionPlan::new(options).build_plan(&db);
        assert!(matches!(result, Err(Error::InvalidTransition { .. })));
    }

    #[test]
    fn test_missing_reservation() {
        let (db, property, _reservation) = setup();
        let options = TransitionOptions::new(
            Uuid::new_v4(),
            property.owner_id(),
            ReservationStatus::Confirmed,
        );
        let result = TransitionPlan::new(options).build_plan(&db);
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
