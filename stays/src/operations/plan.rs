//! Plan types for reservation operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use uuid::Uuid;

use crate::{Reservation, ReservationStatus};

/// A single action to be taken during plan execution.
///
/// Each action corresponds to a specific database operation that will
/// be performed when the plan is executed.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanAction {
    /// Create a new reservation, conditional on its interval still being
    /// free at execution time.
    CreateReservation(Reservation),

    /// Transition a reservation's status, conditional on the state machine
    /// still permitting it at execution time.
    TransitionStatus {
        /// The reservation to transition.
        reservation_id: Uuid,
        /// The target status.
        target: ReservationStatus,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(r) => {
                format!(
                    "Create reservation for property {} over {}",
                    r.property_id(),
                    r.dates()
                )
            }
            Self::TransitionStatus {
                reservation_id,
                target,
            } => {
                format!("Transition reservation {reservation_id} to {target}")
            }
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use stays::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Reserve 2024-06-01 to 2024-06-05");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{sample_property, sample_reservation};

    #[test]
    fn test_plan_action_description_create() {
        let property = sample_property(100);
        let reservation = sample_reservation(&property, (2024, 6, 1), (2024, 6, 5));

        let action = PlanAction::CreateReservation(reservation);
        let desc = action.description();
        assert!(desc.contains("Create reservation"));
        assert!(desc.contains("2024-06-01"));
    }

    #[test]
    fn test_plan_action_description_transition() {
        let id = Uuid::new_v4();
        let action = PlanAction::TransitionStatus {
            reservation_id: id,
            target: ReservationStatus::Confirmed,
        };
        let desc = action.description();
        assert!(desc.contains("Transition"));
        assert!(desc.contains("Confirmed"));
    }

    #[test]
    fn test_operation_plan_new() {
        let plan = OperationPlan::new("Test operation");
        assert_eq!(plan.description, "Test operation");
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_operation_plan_builder_pattern() {
        let property = sample_property(100);
        let reservation = sample_reservation(&property, (2024, 6, 1), (2024, 6, 5));

        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::CreateReservation(reservation))
            .add_warning("Warning 1")
            .add_action(PlanAction::TransitionStatus {
                reservation_id: Uuid::new_v4(),
                target: ReservationStatus::Canceled,
            });

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.warnings.len(), 1);
        assert!(!plan.is_empty());
    }
}
