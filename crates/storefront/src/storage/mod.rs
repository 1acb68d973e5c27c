//! Durable key/value slots for store snapshots.
//!
//! A [`Storage`] holds raw strings by key; it knows nothing about the stores
//! or about JSON. [`Persisted`] sits on top and owns one versioned slot:
//! it serializes a store's state on every write and reads it back once at
//! start-up.
//!
//! Bumping a slot's version (e.g. `cart-v2` to `cart-v3`) is the migration
//! mechanism: the old slot is simply never read again.

mod file;
mod persisted;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

pub use file::FileStorage;
pub use persisted::Persisted;

/// Errors raised by storage backends and the snapshot codec.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot in {key} is not valid: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage is unavailable")]
    Unavailable,
}

/// Raw string key/value storage.
///
/// Methods take `&self`; backends use interior mutability where needed so
/// one storage can be shared by several stores.
pub trait Storage {
    /// Read the value under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the slot. Removing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Name and schema version of a storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageKey {
    name: &'static str,
    version: u32,
}

impl StorageKey {
    /// Slot holding the cart lines.
    pub const CART: Self = Self::new("cart", 2);
    /// Slot holding the favorite product IDs.
    pub const FAVORITES: Self = Self::new("favorites", 1);

    /// Create a slot key.
    #[must_use]
    pub const fn new(name: &'static str, version: u32) -> Self {
        Self { name, version }
    }

    /// Slot name without version.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Schema version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-v{}", self.name, self.version)
    }
}

/// In-process storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
