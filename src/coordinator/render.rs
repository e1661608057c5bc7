//! Boundary toward the renderer.
//!
//! The core never builds or keeps views; it maps identities to views through
//! a [`Renderer`] supplied by the host UI and hands back a [`Scene`].

use crate::modal::PresentationId;
use crate::route::{Presentation, PresentationStyle};

use super::CoordinatorId;

/// Maps identities to host views. Must be pure with respect to the core.
pub trait Renderer<S, M> {
    type View;

    fn render_screen(&mut self, screen: &S) -> Self::View;

    fn render_modal(&mut self, presentation: &Presentation<M>) -> Self::View;
}

/// Views for one coordinator: its current screen plus one layer per active
/// presentation, bottom first.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<V> {
    pub coordinator: CoordinatorId,
    pub screen: V,
    pub layers: Vec<Layer<V>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer<V> {
    pub id: PresentationId,
    pub style: PresentationStyle,
    pub view: V,
    /// Scene of the child coordinator hosted by this presentation.
    pub content: Option<Box<Scene<V>>>,
}

impl<V> Scene<V> {
    /// The layer receiving input, if any.
    pub fn frontmost(&self) -> Option<&Layer<V>> {
        self.layers.last()
    }

    pub fn is_covered(&self) -> bool {
        !self.layers.is_empty()
    }
}
