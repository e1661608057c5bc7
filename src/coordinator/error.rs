//! Error types for coordinator operations.

use thiserror::Error;

use crate::modal::PresentationId;

use super::CoordinatorId;

/// A `present` under `RejectIfActive` found the modal stack occupied.
///
/// This is an expected outcome, not a fault: the caller decides whether to
/// retry with another policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Presentation rejected: {active} modal(s) already active on {coordinator}")]
pub struct RejectedPresentation {
    pub coordinator: CoordinatorId,
    pub active: usize,
}

/// Errors signaled by the coordinator tree.
///
/// Apart from the lookup variants these indicate lifecycle bugs on the
/// caller side rather than conditions to recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    /// Mutation attempted on a coordinator that is tearing down or gone.
    #[error("Coordinator {id} is torn down")]
    InvalidTeardownAccess { id: CoordinatorId },

    #[error("Coordinator {id} does not exist")]
    UnknownCoordinator { id: CoordinatorId },

    #[error("Coordinator {child} is not a child of {parent}")]
    NotAChild {
        parent: CoordinatorId,
        child: CoordinatorId,
    },

    #[error("The root coordinator {id} cannot be torn down")]
    RootTeardown { id: CoordinatorId },

    #[error("Presentation {presentation} is not active on {coordinator}")]
    UnknownPresentation {
        coordinator: CoordinatorId,
        presentation: PresentationId,
    },

    #[error("Presentation {presentation} on {coordinator} is not an alert")]
    NotAnAlert {
        coordinator: CoordinatorId,
        presentation: PresentationId,
    },

    #[error("Alert {presentation} has no action at index {index}")]
    UnknownAction {
        presentation: PresentationId,
        index: usize,
    },
}

impl CoordinatorError {
    /// True for errors caused by touching a coordinator after teardown.
    pub fn is_teardown_access(&self) -> bool {
        matches!(self, CoordinatorError::InvalidTeardownAccess { .. })
    }
}
