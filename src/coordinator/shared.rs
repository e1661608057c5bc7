//! Thread-safe navigator container.
//!
//! The core is single-threaded. Hosts that mutate a tree from several threads
//! wrap it here: one lock covers a mutation and the notifications it emits.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::route::{Modal, Screen};

use super::error::CoordinatorError;
use super::navigator::Navigator;
use super::snapshot::StateSnapshot;
use super::CoordinatorId;

#[derive(Clone)]
pub struct SharedNavigator<S, M> {
    inner: Arc<Mutex<Navigator<S, M>>>,
}

impl<S: Screen, M: Modal> SharedNavigator<S, M> {
    pub fn new(navigator: Navigator<S, M>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(navigator)),
        }
    }

    /// Run `f` with exclusive access to the tree.
    pub fn with<R>(&self, f: impl FnOnce(&mut Navigator<S, M>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn snapshot(&self, id: CoordinatorId) -> Result<StateSnapshot<S, M>, CoordinatorError> {
        self.inner.lock().snapshot(id)
    }
}

impl<S: Screen, M: Modal> From<Navigator<S, M>> for SharedNavigator<S, M> {
    fn from(navigator: Navigator<S, M>) -> Self {
        Self::new(navigator)
    }
}
