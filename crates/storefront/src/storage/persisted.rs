//! Snapshot adapter between a store's state and a storage slot.

use std::marker::PhantomData;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Storage, StorageError, StorageKey};

/// Snapshot revision inside a slot. The slot key carries the namespace
/// version; this only changes for compatible additions.
const SNAPSHOT_VERSION: u32 = 0;

/// On-disk form of a slot: `{"state": ..., "version": 0}`.
#[derive(serde::Serialize, serde::Deserialize)]
struct Envelope<S> {
    state: S,
    #[serde(default)]
    version: u32,
}

/// One versioned storage slot holding snapshots of `T`.
pub struct Persisted<T> {
    storage: Rc<dyn Storage>,
    key: StorageKey,
    slot: String,
    _state: PhantomData<fn() -> T>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Bind a slot of `storage`.
    #[must_use]
    pub fn new(storage: Rc<dyn Storage>, key: StorageKey) -> Self {
        Self {
            storage,
            key,
            slot: key.to_string(),
            _state: PhantomData,
        }
    }

    /// Slot key.
    #[must_use]
    pub const fn key(&self) -> StorageKey {
        self.key
    }

    /// Read the stored snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or does not decode.
    pub fn try_load(&self) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.storage.read(&self.slot)? else {
            return Ok(None);
        };
        let envelope: Envelope<T> =
            serde_json::from_str(&raw).map_err(|source| StorageError::Json {
                key: self.slot.clone(),
                source,
            })?;
        Ok(Some(envelope.state))
    }

    /// Read the stored snapshot, falling back to the empty state.
    ///
    /// Unreadable or undecodable slots are logged and treated as empty.
    #[must_use]
    pub fn load(&self) -> T {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(slot = %self.slot, error = %e, "Discarding unreadable snapshot");
                T::default()
            }
        }
    }

    /// Write a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or written.
    pub fn try_save(&self, state: &T) -> Result<(), StorageError> {
        let envelope = Envelope {
            state,
            version: SNAPSHOT_VERSION,
        };
        let raw = serde_json::to_string(&envelope).map_err(|source| StorageError::Json {
            key: self.slot.clone(),
            source,
        })?;
        self.storage.write(&self.slot, &raw)
    }

    /// Write a snapshot, logging instead of failing.
    ///
    /// The in-memory state stays authoritative for the session; only
    /// durability is lost.
    pub fn save(&self, state: &T) {
        if let Err(e) = self.try_save(state) {
            tracing::warn!(slot = %self.slot, error = %e, "Failed to persist snapshot");
        }
    }
}

impl<T> std::fmt::Debug for Persisted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persisted")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::storage::MemoryStorage;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        hits: u32,
    }

    const KEY: StorageKey = StorageKey::new("counter", 1);

    #[test]
    fn test_empty_slot_loads_default() {
        let slot: Persisted<Counter> = Persisted::new(Rc::new(MemoryStorage::new()), KEY);
        assert_eq!(slot.try_load().unwrap(), None);
        assert_eq!(slot.load(), Counter::default());
    }

    #[test]
    fn test_save_writes_envelope() {
        let storage = Rc::new(MemoryStorage::new());
        let slot: Persisted<Counter> = Persisted::new(storage.clone(), KEY);
        slot.try_save(&Counter { hits: 3 }).unwrap();

        let raw = storage.read("counter-v1").unwrap().unwrap();
        assert_eq!(raw, r#"{"state":{"hits":3},"version":0}"#);
        assert_eq!(slot.load(), Counter { hits: 3 });
    }

    #[test]
    fn test_corrupt_slot_loads_default() {
        let storage = Rc::new(MemoryStorage::new());
        storage.write("counter-v1", "not json").unwrap();

        let slot: Persisted<Counter> = Persisted::new(storage, KEY);
        assert!(matches!(slot.try_load(), Err(StorageError::Json { .. })));
        assert_eq!(slot.load(), Counter::default());
    }

    #[test]
    fn test_versions_do_not_collide() {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        let old: Persisted<Counter> = Persisted::new(storage.clone(), StorageKey::new("counter", 1));
        let new: Persisted<Counter> = Persisted::new(storage, StorageKey::new("counter", 2));

        old.save(&Counter { hits: 9 });
        assert_eq!(new.load(), Counter::default());
    }
}
