//! Base trait for intents (requested stack mutations).

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Navigation requests (push, pop, reset)
/// - Presentation requests (present under a policy, dismiss)
///
/// Intents are processed by reducers to mutate a stack.
pub trait Intent: Send + 'static {}
