use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StorageConfig;

use super::error::StorageError;
use super::Storage;

/// File-based key-value storage.
///
/// Every key is one JSON file in the data directory:
/// ```text
/// .ingredimap/
///   ingrediMapRecipes.json     # persisted recipe collection
/// ```
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Creates a FileStorage rooted at the given directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Creates a FileStorage rooted at the configured data directory.
    pub fn with_config(config: &StorageConfig) -> Self {
        Self::new(config.data_path())
    }

    /// Returns the root data directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the path of the file backing `key`.
    fn key_file(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    /// Ensures the data directory exists.
    fn ensure_base_dir(&self) -> Result<(), StorageError> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)
                .map_err(|e| StorageError::io(&self.base_path, e))?;
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_file(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_base_dir()?;

        let path = self.key_file(key);
        fs::write(&path, value).map_err(|e| StorageError::io(&path, e))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.key_file(key);
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }

        fs::remove_file(&path).map_err(|e| StorageError::io(&path, e))?;
        Ok(())
    }
}
