#[cfg(not(all(test, feature = "loom")))]
use std::sync::RwLock;

#[cfg(all(test, feature = "loom"))]
use loom::sync::RwLock;

use std::sync::{Arc, PoisonError};

/// A read-mostly cell holding an immutable snapshot.
///
/// Readers clone the current `Arc` and drop the lock straight away, so no
/// caller code ever runs while the lock is held. Writers build the next
/// value from the current one and swap it in.
pub(crate) struct Snapshot<T> {
    inner: RwLock<Arc<T>>,
}

impl<T: Clone> Snapshot<T> {
    pub fn new(value: T) -> Self {
        Self { inner: RwLock::new(Arc::new(value)) }
    }

    /// The value as of this call. Later updates do not affect it.
    pub fn load(&self) -> Arc<T> {
        // A writer that panicked mid-swap still left a whole `Arc` behind.
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Applies `f` to a copy of the current value and publishes the copy.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = T::clone(&**guard);
        let out = f(&mut next);
        *guard = Arc::new(next);
        out
    }
}
