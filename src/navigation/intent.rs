use crate::mvi::Intent;
use crate::route::Screen;

#[derive(Debug, Clone)]
pub enum NavIntent<S> {
    /// Append a screen. Consecutive duplicates are allowed.
    Push(S),
    /// Remove the top screen unless only the root is left.
    Pop,
    /// Remove everything above the root.
    PopToRoot,
    /// Replace the whole history with a single screen.
    Reset(S),
}

impl<S: Screen> Intent for NavIntent<S> {}
