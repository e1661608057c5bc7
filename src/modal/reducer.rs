//! Reducer for the modal stack: resolution policies live here.

use std::marker::PhantomData;

use crate::mvi::Reducer;
use crate::route::Modal;

use super::intent::{ModalIntent, ResolutionPolicy};
use super::state::{ModalEntry, ModalStack, PresentationId};

/// What a modal transition did.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalOutcome<M> {
    /// Id of the entry that was inserted.
    pub presented: Option<PresentationId>,
    /// Entries taken off the stack, topmost first.
    pub removed: Vec<ModalEntry<M>>,
    /// The request was dropped under [`ResolutionPolicy::RejectIfActive`].
    pub rejected: bool,
}

impl<M> Default for ModalOutcome<M> {
    fn default() -> Self {
        Self {
            presented: None,
            removed: Vec::new(),
            rejected: false,
        }
    }
}

impl<M> ModalOutcome<M> {
    pub fn changed(&self) -> bool {
        self.presented.is_some() || !self.removed.is_empty()
    }
}

/// Applies [`ModalIntent`]s.
pub struct ModalReducer<M>(PhantomData<fn() -> M>);

impl<M: Modal> Reducer for ModalReducer<M> {
    type State = ModalStack<M>;
    type Intent = ModalIntent<M>;
    type Outcome = ModalOutcome<M>;

    fn reduce(state: &mut Self::State, intent: Self::Intent) -> ModalOutcome<M> {
        let mut outcome = ModalOutcome::default();
        match intent {
            ModalIntent::Present { entry, policy } => {
                if !state.is_empty() {
                    match policy {
                        ResolutionPolicy::OverAll => {}
                        ResolutionPolicy::ReplaceCurrent => {
                            outcome.removed.extend(state.pop());
                        }
                        ResolutionPolicy::RejectIfActive => {
                            outcome.rejected = true;
                            return outcome;
                        }
                    }
                }
                outcome.presented = Some(entry.id());
                state.push(entry);
            }
            ModalIntent::Dismiss => {
                outcome.removed.extend(state.pop());
            }
            ModalIntent::DismissEntry(id) => {
                outcome.removed.extend(state.remove(id));
            }
            ModalIntent::DismissAll => {
                outcome.removed = state.drain_top_down();
            }
        }
        outcome
    }
}
