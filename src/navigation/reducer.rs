//! Reducer for the navigation stack.

use std::marker::PhantomData;

use crate::mvi::Reducer;
use crate::route::Screen;

use super::intent::NavIntent;
use super::state::NavigationStack;

/// Applies [`NavIntent`]s. The outcome is `true` when the stack changed.
pub struct NavReducer<S>(PhantomData<fn() -> S>);

impl<S: Screen> Reducer for NavReducer<S> {
    type State = NavigationStack<S>;
    type Intent = NavIntent<S>;
    type Outcome = bool;

    fn reduce(state: &mut Self::State, intent: Self::Intent) -> bool {
        match intent {
            NavIntent::Push(screen) => {
                state.push(screen);
                true
            }
            // The root is never popped
            NavIntent::Pop => state.pop().is_some(),
            NavIntent::PopToRoot => state.clear_above_root() > 0,
            NavIntent::Reset(screen) => {
                let unchanged = state.is_at_root() && *state.root() == screen;
                state.reset(screen);
                !unchanged
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    enum Route {
        Home,
        Detail(u32),
        Settings,
    }

    fn reduce(stack: &mut NavigationStack<Route>, intent: NavIntent<Route>) -> bool {
        NavReducer::<Route>::reduce(stack, intent)
    }

    #[test]
    fn push_appends_and_becomes_current() {
        let mut stack = NavigationStack::new(Route::Home);
        assert!(reduce(&mut stack, NavIntent::Push(Route::Detail(1))));
        assert_eq!(stack.depth(), 2);
        assert_eq!(*stack.current(), Route::Detail(1));
    }

    #[test]
    fn push_same_screen_twice_is_kept() {
        let mut stack = NavigationStack::new(Route::Home);
        reduce(&mut stack, NavIntent::Push(Route::Detail(1)));
        reduce(&mut stack, NavIntent::Push(Route::Detail(1)));
        assert_eq!(stack.depth(), 3);
    }

    #[test]
    fn pop_at_root_is_noop() {
        let mut stack = NavigationStack::new(Route::Home);
        reduce(&mut stack, NavIntent::Push(Route::Detail(1)));
        assert!(reduce(&mut stack, NavIntent::Pop));
        assert!(!reduce(&mut stack, NavIntent::Pop));
        assert_eq!(stack.to_vec(), vec![Route::Home]);
    }

    #[test]
    fn pop_to_root_is_idempotent() {
        let mut stack = NavigationStack::new(Route::Home);
        reduce(&mut stack, NavIntent::Push(Route::Detail(1)));
        reduce(&mut stack, NavIntent::Push(Route::Settings));

        assert!(reduce(&mut stack, NavIntent::PopToRoot));
        assert_eq!(stack.to_vec(), vec![Route::Home]);
        assert!(!reduce(&mut stack, NavIntent::PopToRoot));
        assert_eq!(stack.to_vec(), vec![Route::Home]);
    }

    #[test]
    fn reset_replaces_history() {
        let mut stack = NavigationStack::new(Route::Home);
        reduce(&mut stack, NavIntent::Push(Route::Detail(7)));
        assert!(reduce(&mut stack, NavIntent::Reset(Route::Settings)));
        assert_eq!(stack.to_vec(), vec![Route::Settings]);
    }

    #[test]
    fn reset_to_same_root_reports_no_change() {
        let mut stack = NavigationStack::new(Route::Home);
        assert!(!reduce(&mut stack, NavIntent::Reset(Route::Home)));
    }
}
