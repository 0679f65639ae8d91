mod error;
mod file;
mod seed;

pub use error::StorageError;
pub use file::FileStorage;
pub use seed::{load_all, LoadFailure, LoadOutcome, LoadSource, SeedSource, BUNDLED_SEED};

/// Trait for key-value storage backends.
///
/// The recipe collection is persisted as a single JSON document under one
/// key; implementations only move strings in and out.
pub trait Storage {
    /// Reads the value stored under `key`, `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes the value stored under `key`.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
