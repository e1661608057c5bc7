//! Read-only views handed to renderers and listeners.

use crate::modal::{ModalEntry, PresentationId, ResolutionPolicy};
use crate::route::{Modal, Presentation, PresentationStyle};

use super::CoordinatorId;

/// Which operation produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Pushed,
    Popped,
    PoppedToRoot,
    Reset,
    Presented { policy: ResolutionPolicy },
    Dismissed,
    DismissedAll,
    ChildSpawned(CoordinatorId),
    ChildTornDown(CoordinatorId),
    /// Last notification a coordinator emits; its stacks are already empty.
    TornDown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalSnapshot<M> {
    pub id: PresentationId,
    pub style: PresentationStyle,
    pub presentation: Presentation<M>,
    pub hosted: Option<CoordinatorId>,
}

impl<M: Modal> From<&ModalEntry<M>> for ModalSnapshot<M> {
    fn from(entry: &ModalEntry<M>) -> Self {
        Self {
            id: entry.id(),
            style: entry.style(),
            presentation: entry.presentation().clone(),
            hosted: entry.hosted(),
        }
    }
}

/// Everything needed to re-render one coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot<S, M> {
    pub coordinator: CoordinatorId,
    /// Root first.
    pub screens: Vec<S>,
    /// Bottom first; the last one is frontmost.
    pub modals: Vec<ModalSnapshot<M>>,
    pub children: Vec<CoordinatorId>,
}

impl<S, M> StateSnapshot<S, M> {
    pub fn current_screen(&self) -> Option<&S> {
        self.screens.last()
    }

    pub fn top_modal(&self) -> Option<&ModalSnapshot<M>> {
        self.modals.last()
    }
}
