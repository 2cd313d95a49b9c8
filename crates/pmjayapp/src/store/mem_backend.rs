use super::backend::StorageBackend;
use crate::error::{StoreError, StoreResult};
use crate::model::FormRecord;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell`/`Cell` for interior mutability since pmjay is single-threaded,
/// so the `StorageBackend` trait can keep `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<Vec<FormRecord>>,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
    loads: Cell<usize>,
    saves: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds `records`, as if written by an earlier run.
    pub fn with_records(records: Vec<FormRecord>) -> Self {
        let backend = Self::default();
        *backend.records.borrow_mut() = records;
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Overwrite the stored records behind the store's back.
    pub fn replace_records(&self, records: Vec<FormRecord>) {
        *self.records.borrow_mut() = records;
    }

    /// Snapshot of what is currently "on disk".
    pub fn stored(&self) -> Vec<FormRecord> {
        self.records.borrow().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.get()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> StoreResult<Vec<FormRecord>> {
        if self.simulate_read_error.get() {
            return Err(StoreError::Backend("Simulated read error".to_string()));
        }
        self.loads.set(self.loads.get() + 1);
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[FormRecord]) -> StoreResult<()> {
        if self.simulate_write_error.get() {
            return Err(StoreError::Backend("Simulated write error".to_string()));
        }
        self.saves.set(self.saves.get() + 1);
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://records.csv")
    }
}
