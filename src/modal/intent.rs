use serde::{Deserialize, Serialize};

use crate::mvi::Intent;
use crate::route::Modal;

use super::state::{ModalEntry, PresentationId};

/// How a new presentation reconciles with an already non-empty modal stack.
/// An empty stack accepts the presentation under every policy.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Layer on top; earlier presentations stay active underneath.
    #[default]
    OverAll,
    /// Remove the top presentation, then layer the new one.
    ReplaceCurrent,
    /// Drop the request if anything is presented.
    RejectIfActive,
}

#[derive(Debug, Clone)]
pub enum ModalIntent<M> {
    Present {
        entry: ModalEntry<M>,
        policy: ResolutionPolicy,
    },
    /// Remove the topmost entry.
    Dismiss,
    /// Remove one entry wherever it sits in the stack.
    DismissEntry(PresentationId),
    DismissAll,
}

impl<M: Modal> Intent for ModalIntent<M> {}
