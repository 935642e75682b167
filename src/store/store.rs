//! Immutable record store and its readiness gate

use std::sync::{Arc, OnceLock};

use super::errors::{StoreError, StoreResult};
use super::record::Transaction;

/// Ordered, read-only collection of transactions.
///
/// Insertion order equals source order. Nothing is mutated or removed after
/// construction, so a store can be shared across any number of concurrent
/// queries behind an `Arc`.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Transaction>,
}

impl RecordStore {
    pub fn new(records: Vec<Transaction>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.records.iter()
    }
}

impl FromIterator<Transaction> for RecordStore {
    fn from_iter<T: IntoIterator<Item = Transaction>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One-shot readiness gate guarding first access to the store.
///
/// The loader calls [`StoreGate::set`] exactly once; until then every
/// [`StoreGate::get`] reports `SALES_STORE_NOT_READY`. After that, reads are
/// lock-free.
#[derive(Debug, Default)]
pub struct StoreGate {
    store: OnceLock<Arc<RecordStore>>,
}

impl StoreGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gate that is already open
    pub fn ready(store: RecordStore) -> Self {
        let gate = Self::new();
        let _ = gate.store.set(Arc::new(store));
        gate
    }

    /// Opens the gate. Fails if a store was already published.
    pub fn set(&self, store: RecordStore) -> StoreResult<()> {
        self.store
            .set(Arc::new(store))
            .map_err(|_| StoreError::already_loaded())
    }

    pub fn get(&self) -> StoreResult<Arc<RecordStore>> {
        self.store.get().cloned().ok_or_else(StoreError::not_ready)
    }

    pub fn is_ready(&self) -> bool {
        self.store.get().is_some()
    }
}
