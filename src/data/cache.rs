//! Process-lifetime memoization of the loaded dataset.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

/// A single-slot memo cell.
///
/// The slot lock is held for the whole load, so callers that arrive while the
/// first load is running wait for it instead of starting their own.
#[derive(Debug)]
pub struct DatasetCache<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> Default for DatasetCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DatasetCache<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value, running `load` only when the slot is empty.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Arc<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(value) = slot.as_ref() {
            debug!("dataset cache hit");
            return Arc::clone(value);
        }

        let value = Arc::new(load().await);
        *slot = Some(Arc::clone(&value));
        value
    }

    /// The cached value, if a load has completed.
    pub async fn peek(&self) -> Option<Arc<T>> {
        self.slot.lock().await.clone()
    }

    /// Drop the cached value so the next access loads again.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        if slot.take().is_some() {
            debug!("dataset cache invalidated");
        }
    }
}
