//! Atomic state transitions over a shared store.
//!
//! `Ledger::transact` runs a transition against a `StoreOverlay` while holding
//! the write lock. On `Ok` the overlay is committed with one
//! `atomic_batch_write`; on `Err` it is dropped and the store is untouched.

use crate::errors::StoreError;
use crate::storage::{KeyValueStore, StoreOverlay};
use parking_lot::RwLock;
use tracing::trace;

/// Store wrapper serializing state transitions.
pub struct Ledger<S: KeyValueStore> {
    store: RwLock<S>,
}

impl<S: KeyValueStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    /// Runs a read-only query against the committed state.
    pub fn read<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        let store = self.store.read();
        f(&store)
    }

    /// Runs `f` as one all-or-nothing transition.
    pub fn transact<T, E>(
        &self,
        f: impl FnOnce(&mut StoreOverlay<'_, S>) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut store = self.store.write();
        let (value, operations) = {
            let mut overlay = StoreOverlay::new(&*store);
            let value = f(&mut overlay)?;
            (value, overlay.into_operations())
        };
        if !operations.is_empty() {
            trace!("committing {} storage operations", operations.len());
            store
                .atomic_batch_write(operations)
                .map_err(StoreError::from)?;
        }
        Ok(value)
    }

    /// Direct mutable access, for test setup and fault injection.
    pub fn with_store_mut<T>(&self, f: impl FnOnce(&mut S) -> T) -> T {
        let mut store = self.store.write();
        f(&mut store)
    }

    pub fn into_inner(self) -> S {
        self.store.into_inner()
    }
}
