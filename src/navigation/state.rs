//! State for the navigation stack.

use std::iter;

use crate::mvi::StackState;
use crate::route::Screen;

/// Ordered screen history. Never empty: the root is stored apart from the
/// screens pushed above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack<S> {
    root: S,
    above: Vec<S>,
}

impl<S: Screen> StackState for NavigationStack<S> {}

impl<S> NavigationStack<S> {
    pub fn new(root: S) -> Self {
        Self {
            root,
            above: Vec::new(),
        }
    }

    /// The screen currently shown: the last one pushed, or the root.
    pub fn current(&self) -> &S {
        self.above.last().unwrap_or(&self.root)
    }

    pub fn root(&self) -> &S {
        &self.root
    }

    pub fn depth(&self) -> usize {
        self.above.len() + 1
    }

    pub fn is_at_root(&self) -> bool {
        self.above.is_empty()
    }

    /// Screens from root to top.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        iter::once(&self.root).chain(self.above.iter())
    }

    pub fn to_vec(&self) -> Vec<S>
    where
        S: Clone,
    {
        self.iter().cloned().collect()
    }

    pub(super) fn push(&mut self, screen: S) {
        self.above.push(screen);
    }

    pub(super) fn pop(&mut self) -> Option<S> {
        self.above.pop()
    }

    pub(super) fn clear_above_root(&mut self) -> usize {
        let removed = self.above.len();
        self.above.clear();
        removed
    }

    pub(super) fn reset(&mut self, root: S) {
        self.root = root;
        self.above.clear();
    }
}
