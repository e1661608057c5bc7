//! Base trait for stack state.

/// Marker trait for the stacks owned by a coordinator.
///
/// Stacks should be:
/// - Cloneable (snapshots are handed to renderers)
/// - Comparable (PartialEq for detecting changes)
/// - Owned by exactly one coordinator
pub trait StackState: Clone + PartialEq + Send + 'static {}
