//! Reducer trait for stack transitions.

use super::intent::Intent;
use super::state::StackState;

/// Reducer applies intents to a stack.
///
/// The reducer is the only place where stack transitions happen. It mutates
/// the state in place and returns an outcome describing the transition.
/// Side effects (child teardown, notifications) belong to the caller.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: StackState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// What the caller learns about the transition.
    type Outcome;

    /// Apply an intent to the state.
    ///
    /// Must not have side effects beyond the state itself.
    fn reduce(state: &mut Self::State, intent: Self::Intent) -> Self::Outcome;
}
