//! Layered presentations owned by one coordinator.
//!
//! Sheets, covers, overlays and alerts share a single stack: only one
//! presentation is interactively frontmost at a time. A [`ResolutionPolicy`]
//! decides what happens when a new presentation arrives while others are
//! active.

mod intent;
mod reducer;
mod state;

pub use intent::{ModalIntent, ResolutionPolicy};
pub use reducer::{ModalOutcome, ModalReducer};
pub use state::{ModalEntry, ModalStack, PresentationId};
