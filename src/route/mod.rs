//! Identities of everything a coordinator can show.
//!
//! Applications describe their destinations as closed enums: one enum of
//! screens for the linear history, one enum of modal flows. The core only
//! ever stores and compares these identities; turning them into views is the
//! renderer's job (see [`crate::coordinator::Renderer`]).

pub mod alert;

use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

pub use alert::{
    ActionHandler, ActionRole, Alert, AlertAction, AlertBuilder, AlertError, AlertResponse,
};

/// A navigable destination within a coordinator's linear history.
///
/// Implemented automatically for any value type with equality and hashing;
/// two screens are the same destination iff they compare equal.
pub trait Screen: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Screen for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// A modal flow that can be layered above the current screen.
pub trait Modal: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Visual layering for this modal. Must depend on the identity only.
    fn style(&self) -> PresentationStyle;
}

/// How a presentation is layered visually.
///
/// Style never affects stacking: sheets, covers and overlays share one
/// modal stack per coordinator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationStyle {
    #[default]
    Sheet,
    Cover,
    Overlay,
}

impl PresentationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationStyle::Sheet => "sheet",
            PresentationStyle::Cover => "cover",
            PresentationStyle::Overlay => "overlay",
        }
    }
}

impl fmt::Display for PresentationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a modal stack entry presents: an application modal or an alert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Presentation<M> {
    Modal(M),
    Alert(Alert),
}

impl<M: Modal> Presentation<M> {
    /// Alerts always layer as overlays.
    pub fn style(&self) -> PresentationStyle {
        match self {
            Presentation::Modal(modal) => modal.style(),
            Presentation::Alert(_) => PresentationStyle::Overlay,
        }
    }

    pub fn as_modal(&self) -> Option<&M> {
        match self {
            Presentation::Modal(modal) => Some(modal),
            Presentation::Alert(_) => None,
        }
    }

    pub fn as_alert(&self) -> Option<&Alert> {
        match self {
            Presentation::Alert(alert) => Some(alert),
            Presentation::Modal(_) => None,
        }
    }

    pub fn is_alert(&self) -> bool {
        matches!(self, Presentation::Alert(_))
    }
}
