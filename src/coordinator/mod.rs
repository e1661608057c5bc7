//! Coordinator tree: navigation plus modal stacks, with owned children.
//!
//! ```text
//! Navigator (arena)
//! ├── c0 (root)            nav: [home > detail#4]   modals: [sheet:compose]
//! │   └── c1 (hosted by the compose sheet)
//! │       nav: [draft > attachments]  modals: [overlay:alert]
//! └── ...
//! ```
//!
//! Parents own children through the arena; a child only stores its parent's
//! [`CoordinatorId`] and resolves it through the [`Navigator`]. Dropping the
//! navigator drops the whole tree.

mod action;
mod error;
mod handle;
mod navigator;
mod render;
mod shared;
mod snapshot;

use std::fmt;

pub use action::{ActionContext, ActionOutcome, DeferredCommand};
pub use error::{CoordinatorError, RejectedPresentation};
pub use handle::Coordinator;
pub use navigator::{DismissHook, Navigator, PresentOutcome, SubscriptionId};
pub use render::{Layer, Renderer, Scene};
pub use shared::SharedNavigator;
pub use snapshot::{ModalSnapshot, StateChange, StateSnapshot};

/// Handle of a coordinator inside a [`Navigator`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CoordinatorId(u64);

impl CoordinatorId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CoordinatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Where a live coordinator is in its life.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lifecycle {
    Active,
    /// Teardown has started; every mutation is refused.
    TearingDown,
}
