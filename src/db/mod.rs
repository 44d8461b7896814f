//! Storage layer (opaque string key-value stores).

pub mod file;
pub mod memory;
pub mod workouts;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use workouts::{load_workouts, save_workouts};

/// Store keys as constants.
pub mod keys {
    /// Serialized workout collection
    pub const WORKOUTS: &str = "workouts";
    /// Last collection that failed to parse, kept for manual recovery
    pub const WORKOUTS_CORRUPT: &str = "workouts_corrupt";
}

/// Durable string-keyed blob storage.
pub trait KeyValueStore {
    /// Read the value under `key`; `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize workouts: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    #[error("Stored workouts were not restored; refusing to overwrite them")]
    NotRestored,
}
