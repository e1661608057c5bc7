//! State for the modal stack.

use std::fmt;

use uuid::Uuid;

use crate::coordinator::CoordinatorId;
use crate::mvi::StackState;
use crate::route::{Modal, Presentation, PresentationStyle};

/// Identifies one presentation for as long as it is on a stack.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PresentationId(Uuid);

impl PresentationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PresentationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PresentationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        f.write_str(&simple[..8])
    }
}

/// One active presentation.
///
/// `hosted` names the child coordinator living inside this presentation;
/// removing the entry tears that child down.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalEntry<M> {
    id: PresentationId,
    presentation: Presentation<M>,
    hosted: Option<CoordinatorId>,
}

impl<M: Modal> ModalEntry<M> {
    pub fn new(presentation: Presentation<M>) -> Self {
        Self {
            id: PresentationId::new(),
            presentation,
            hosted: None,
        }
    }

    pub fn hosting(presentation: Presentation<M>, child: CoordinatorId) -> Self {
        Self {
            hosted: Some(child),
            ..Self::new(presentation)
        }
    }

    pub fn id(&self) -> PresentationId {
        self.id
    }

    pub fn presentation(&self) -> &Presentation<M> {
        &self.presentation
    }

    pub fn hosted(&self) -> Option<CoordinatorId> {
        self.hosted
    }

    pub fn style(&self) -> PresentationStyle {
        self.presentation.style()
    }
}

/// Active presentations, bottom first. The last entry is frontmost.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalStack<M> {
    entries: Vec<ModalEntry<M>>,
}

impl<M: Modal> StackState for ModalStack<M> {}

impl<M> Default for ModalStack<M> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<M> ModalStack<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn top(&self) -> Option<&ModalEntry<M>> {
        self.entries.last()
    }

    pub fn get(&self, id: PresentationId) -> Option<&ModalEntry<M>> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entry hosting the given child coordinator, if any.
    pub fn hosting(&self, child: CoordinatorId) -> Option<&ModalEntry<M>> {
        self.entries.iter().find(|e| e.hosted == Some(child))
    }

    /// Entries from bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ModalEntry<M>> + ExactSizeIterator {
        self.entries.iter()
    }

    pub(super) fn push(&mut self, entry: ModalEntry<M>) {
        self.entries.push(entry);
    }

    pub(super) fn pop(&mut self) -> Option<ModalEntry<M>> {
        self.entries.pop()
    }

    pub(super) fn remove(&mut self, id: PresentationId) -> Option<ModalEntry<M>> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Empties the stack, returning entries top first.
    pub(super) fn drain_top_down(&mut self) -> Vec<ModalEntry<M>> {
        let mut drained: Vec<_> = self.entries.drain(..).collect();
        drained.reverse();
        drained
    }
}
