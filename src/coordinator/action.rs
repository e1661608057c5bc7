//! Context handed to alert action handlers.

use crate::modal::PresentationId;
use crate::route::AlertResponse;

use super::CoordinatorId;

/// Stack mutations a handler can request. They run after the handler
/// returns and before the alert's entry is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredCommand {
    Pop,
    PopToRoot,
    /// Dismiss the presentation directly beneath the alert.
    Dismiss,
    /// Ask the parent to dismiss whatever hosts this coordinator.
    Finish,
}

/// What a handler sees while it runs. The alert is still on the stack.
#[derive(Debug)]
pub struct ActionContext {
    coordinator: CoordinatorId,
    presentation: PresentationId,
    action: String,
    screen_depth: usize,
    modal_depth: usize,
    commands: Vec<DeferredCommand>,
}

impl ActionContext {
    pub(crate) fn new(
        coordinator: CoordinatorId,
        presentation: PresentationId,
        action: String,
        screen_depth: usize,
        modal_depth: usize,
    ) -> Self {
        Self {
            coordinator,
            presentation,
            action,
            screen_depth,
            modal_depth,
            commands: Vec::new(),
        }
    }

    pub fn coordinator(&self) -> CoordinatorId {
        self.coordinator
    }

    pub fn presentation(&self) -> PresentationId {
        self.presentation
    }

    pub fn action_label(&self) -> &str {
        &self.action
    }

    pub fn screen_depth(&self) -> usize {
        self.screen_depth
    }

    /// Modal depth including the alert itself.
    pub fn modal_depth(&self) -> usize {
        self.modal_depth
    }

    pub fn pop(&mut self) {
        self.commands.push(DeferredCommand::Pop);
    }

    pub fn pop_to_root(&mut self) {
        self.commands.push(DeferredCommand::PopToRoot);
    }

    /// Dismiss whatever the alert was presented over, e.g. the sheet a
    /// "Discard draft?" alert belongs to. The alert itself follows its
    /// [`AlertResponse`].
    pub fn dismiss(&mut self) {
        self.commands.push(DeferredCommand::Dismiss);
    }

    pub fn finish(&mut self) {
        self.commands.push(DeferredCommand::Finish);
    }

    pub fn commands(&self) -> &[DeferredCommand] {
        &self.commands
    }

    pub(crate) fn into_commands(self) -> Vec<DeferredCommand> {
        self.commands
    }
}

/// Result of invoking an alert action.
#[derive(Debug)]
pub struct ActionOutcome {
    pub response: AlertResponse,
    /// The alert's entry was removed from the stack.
    pub dismissed: bool,
    /// Error returned by the handler, if any. The alert is dismissed anyway.
    pub error: Option<anyhow::Error>,
}
