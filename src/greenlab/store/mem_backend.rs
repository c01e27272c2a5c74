use super::{StorageBackend, StoreKey};
use crate::error::{GreenlabError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since greenlab is single-threaded,
/// which lets `StorageBackend` take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    blobs: RefCell<HashMap<StoreKey, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Store raw text under `key`, bypassing encoding. Used to plant corrupt data.
    pub fn inject_blob(&self, key: StoreKey, blob: &str) {
        self.blobs.borrow_mut().insert(key, blob.to_string());
    }

    /// The raw text currently stored under `key`.
    pub fn blob(&self, key: StoreKey) -> Option<String> {
        self.blobs.borrow().get(&key).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read_blob(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.blob(key))
    }

    fn write_blob(&self, key: StoreKey, blob: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(GreenlabError::Store("Simulated write error".to_string()));
        }
        self.blobs.borrow_mut().insert(key, blob.to_string());
        Ok(())
    }

    fn remove_blob(&self, key: StoreKey) -> Result<()> {
        self.blobs.borrow_mut().remove(&key);
        Ok(())
    }
}
