//! # Storage Layer
//!
//! greenlab persists exactly three records, each as one whole JSON blob under its
//! own key:
//!
//! ```text
//! <data dir>/
//! ├── savedProjects.json        # ordered list of projects
//! ├── savedJournalEntries.json  # ordered list of journal entries
//! ├── favoritePlantIds.json     # list of catalog plant ids
//! └── config.json               # see config.rs
//! ```
//!
//! There are no partial writes: every save rewrites the full collection.
//!
//! ## Layers
//!
//! - [`StorageBackend`]: raw blob I/O by key. [`fs_backend::FsBackend`] for
//!   production, [`mem_backend::MemBackend`] for tests.
//! - [`BlobStore`]: typed encode/decode on top of a backend.
//!
//! ## Failing Open
//!
//! A missing or unreadable blob must never stop the app from starting, and a failed
//! write must never interrupt the user. `BlobStore` therefore offers two paths:
//!
//! - `try_load` / `try_save` return the real `Result`, for callers and tests that
//!   care about the failure.
//! - `load` / `save` log the failure with `tracing::warn!` and degrade to
//!   `None` / `false`. The facade uses these.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

pub mod fs_backend;
pub mod mem_backend;

/// The three persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Projects,
    JournalEntries,
    Favorites,
}

impl StoreKey {
    pub const ALL: [StoreKey; 3] = [
        StoreKey::Projects,
        StoreKey::JournalEntries,
        StoreKey::Favorites,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Projects => "savedProjects",
            StoreKey::JournalEntries => "savedJournalEntries",
            StoreKey::Favorites => "favoritePlantIds",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract interface for raw blob storage.
pub trait StorageBackend {
    /// Read the blob stored under `key`. `Ok(None)` if nothing was ever written.
    fn read_blob(&self, key: StoreKey) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    /// MUST be atomic so a crash never leaves half a collection behind.
    fn write_blob(&self, key: StoreKey, blob: &str) -> Result<()>;

    /// Remove the blob under `key`. Removing a missing blob is not an error.
    fn remove_blob(&self, key: StoreKey) -> Result<()>;
}

/// Typed, whole-collection persistence over a [`StorageBackend`].
pub struct BlobStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> BlobStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn try_load<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>> {
        let Some(blob) = self.backend.read_blob(key)? else {
            debug!(key = %key, "no stored blob");
            return Ok(None);
        };
        let value = serde_json::from_str(&blob)?;
        debug!(key = %key, bytes = blob.len(), "loaded blob");
        Ok(Some(value))
    }

    pub fn try_save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<()> {
        let blob = serde_json::to_string_pretty(value)?;
        self.backend.write_blob(key, &blob)?;
        debug!(key = %key, bytes = blob.len(), "saved blob");
        Ok(())
    }

    /// Fail-open load: any error is logged and reported as absent.
    pub fn load<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        match self.try_load(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "discarding unreadable blob");
                None
            }
        }
    }

    /// Fail-open save: returns false (after logging) when the write did not happen.
    pub fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> bool {
        match self.try_save(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = %e, "failed to persist blob");
                false
            }
        }
    }

    pub fn clear(&self, key: StoreKey) -> Result<()> {
        self.backend.remove_blob(key)
    }
}
