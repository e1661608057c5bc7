//! Model-View-Intent (MVI) primitives shared by the stacks.
//!
//! Every stack a coordinator owns follows the same unidirectional flow:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Snapshot ──→ Renderer
//!    ↑                                             │
//!    └─────────────────────────────────────────────┘
//! ```
//!
//! - **State**: a stack (navigation or modal) owned by one coordinator
//! - **Intent**: a requested mutation (push, present, dismiss, ...)
//! - **Reducer**: the only place where a stack changes, reporting what happened

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StackState;
