use std::sync::{Arc, PoisonError, RwLock};

/// A single-slot, latest-wins cell for shared frame state.
///
/// A writer atomically replaces the stored value; readers take an `Arc`
/// snapshot and keep working against it even if a newer value arrives
/// mid-processing. There is no buffering: storing drops the previous value
/// once the last snapshot of it goes away.
#[derive(Debug, Default)]
pub struct Latest<T> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> Latest<T> {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Replace the stored value with `value`.
    pub fn store(&self, value: T) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::new(value));
    }

    /// Take a snapshot of the latest value, or `None` when nothing has
    /// arrived yet.
    pub fn snapshot(&self) -> Option<Arc<T>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
