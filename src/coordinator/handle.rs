//! Per-coordinator handle: the public operations of one coordinator.

use crate::modal::{ModalStack, PresentationId, ResolutionPolicy};
use crate::navigation::{NavIntent, NavigationStack};
use crate::route::{Alert, Modal, Presentation, Screen};

use super::error::CoordinatorError;
use super::navigator::{Navigator, PresentOutcome};
use super::snapshot::{StateChange, StateSnapshot};
use super::CoordinatorId;

/// Mutable view of one coordinator in a [`Navigator`].
///
/// Every mutator re-checks that the coordinator is still live: a dismissal
/// hook can tear the coordinator down while the handle exists, and any later
/// call then fails with [`CoordinatorError::InvalidTeardownAccess`].
pub struct Coordinator<'a, S, M> {
    navigator: &'a mut Navigator<S, M>,
    id: CoordinatorId,
}

impl<'a, S: Screen, M: Modal> Coordinator<'a, S, M> {
    pub(super) fn new(navigator: &'a mut Navigator<S, M>, id: CoordinatorId) -> Self {
        Self { navigator, id }
    }

    pub fn id(&self) -> CoordinatorId {
        self.id
    }

    pub fn parent(&self) -> Option<CoordinatorId> {
        self.navigator.parent(self.id)
    }

    pub fn navigation(&self) -> Result<&NavigationStack<S>, CoordinatorError> {
        self.navigator.navigation(self.id)
    }

    pub fn modals(&self) -> Result<&ModalStack<M>, CoordinatorError> {
        self.navigator.modals(self.id)
    }

    pub fn current(&self) -> Result<&S, CoordinatorError> {
        Ok(self.navigation()?.current())
    }

    pub fn snapshot(&self) -> Result<StateSnapshot<S, M>, CoordinatorError> {
        self.navigator.snapshot(self.id)
    }

    /// Show a screen: sugar for [`Coordinator::push`].
    pub fn show(&mut self, screen: S) -> Result<(), CoordinatorError> {
        self.push(screen)
    }

    pub fn push(&mut self, screen: S) -> Result<(), CoordinatorError> {
        self.navigator
            .navigate(self.id, NavIntent::Push(screen), StateChange::Pushed)
            .map(drop)
    }

    /// Returns whether a screen was removed. The root stays.
    pub fn pop(&mut self) -> Result<bool, CoordinatorError> {
        self.navigator.navigate(self.id, NavIntent::Pop, StateChange::Popped)
    }

    pub fn pop_to_root(&mut self) -> Result<bool, CoordinatorError> {
        self.navigator
            .navigate(self.id, NavIntent::PopToRoot, StateChange::PoppedToRoot)
    }

    /// Replace the history with a single screen.
    pub fn reset(&mut self, screen: S) -> Result<(), CoordinatorError> {
        self.navigator
            .navigate(self.id, NavIntent::Reset(screen), StateChange::Reset)
            .map(drop)
    }

    pub fn present(
        &mut self,
        modal: M,
        policy: ResolutionPolicy,
    ) -> Result<PresentOutcome, CoordinatorError> {
        self.navigator
            .present(self.id, Presentation::Modal(modal), policy)
    }

    /// Present with the default policy (`OverAll`), so user-initiated
    /// requests are never silently dropped.
    pub fn present_default(&mut self, modal: M) -> Result<PresentOutcome, CoordinatorError> {
        self.present(modal, ResolutionPolicy::default())
    }

    /// Alerts are ordinary presentations layered over everything else.
    pub fn present_alert(&mut self, alert: Alert) -> Result<PresentOutcome, CoordinatorError> {
        self.navigator
            .present(self.id, Presentation::Alert(alert), ResolutionPolicy::OverAll)
    }

    /// Present a modal that hosts a new child coordinator starting on
    /// `initial`. The child lives exactly as long as the presentation.
    pub fn present_flow(
        &mut self,
        modal: M,
        initial: S,
        policy: ResolutionPolicy,
    ) -> Result<PresentOutcome, CoordinatorError> {
        self.navigator
            .present_flow(self.id, Presentation::Modal(modal), initial, policy)
    }

    /// Remove the topmost presentation. Returns whether one was removed.
    pub fn dismiss(&mut self) -> Result<bool, CoordinatorError> {
        self.navigator.dismiss(self.id)
    }

    /// Remove one presentation wherever it sits in the stack.
    pub fn dismiss_presentation(
        &mut self,
        presentation: PresentationId,
    ) -> Result<bool, CoordinatorError> {
        self.navigator.dismiss_presentation(self.id, presentation)
    }

    /// Returns how many presentations were removed.
    pub fn dismiss_all(&mut self) -> Result<usize, CoordinatorError> {
        self.navigator.dismiss_all(self.id)
    }

    /// Run `hook` once `presentation` is dismissed or torn down. Replacing the
    /// presentation under `ReplaceCurrent` drops the hook without running it.
    pub fn on_dismiss<F>(
        &mut self,
        presentation: PresentationId,
        hook: F,
    ) -> Result<(), CoordinatorError>
    where
        F: FnOnce(&mut Navigator<S, M>) + Send + 'static,
    {
        self.navigator.on_dismiss(self.id, presentation, Box::new(hook))
    }

    /// Create a child coordinator owned by this one.
    pub fn spawn_child(&mut self, initial: S) -> Result<CoordinatorId, CoordinatorError> {
        self.navigator.spawn_child(self.id, initial)
    }

    /// Tear down a child and everything it presents. A hosted child is
    /// removed together with the presentation hosting it.
    pub fn teardown_child(&mut self, child: CoordinatorId) -> Result<(), CoordinatorError> {
        self.navigator.teardown_child(self.id, child)
    }

    /// Reborrow the navigator as a handle on one of this coordinator's children.
    pub fn child(
        &mut self,
        child: CoordinatorId,
    ) -> Result<Coordinator<'_, S, M>, CoordinatorError> {
        if !self.navigator.children(self.id)?.contains(&child) {
            return Err(CoordinatorError::NotAChild {
                parent: self.id,
                child,
            });
        }
        self.navigator.coordinator(child)
    }

    /// Ask the parent to remove this coordinator. Fails on the root.
    pub fn finish(self) -> Result<(), CoordinatorError> {
        self.navigator.finish(self.id)
    }
}
