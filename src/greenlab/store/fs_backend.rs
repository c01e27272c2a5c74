use super::{StorageBackend, StoreKey};
use crate::error::{GreenlabError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores each key as `<root>/<key>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self, key: StoreKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(GreenlabError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_blob(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(GreenlabError::Io)?;
        Ok(Some(content))
    }

    fn write_blob(&self, key: StoreKey, blob: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.blob_path(key);

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key.as_str(), Uuid::new_v4()));
        fs::write(&tmp, blob).map_err(GreenlabError::Io)?;
        fs::rename(&tmp, target).map_err(GreenlabError::Io)?;
        Ok(())
    }

    fn remove_blob(&self, key: StoreKey) -> Result<()> {
        let path = self.blob_path(key);
        if path.exists() {
            fs::remove_file(path).map_err(GreenlabError::Io)?;
        }
        Ok(())
    }
}
