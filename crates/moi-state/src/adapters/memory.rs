use crate::domain::StorageKey;
use crate::errors::StateError;
use crate::ports::StorageReader;
use async_trait::async_trait;
use moi_types::{LogicId, ParticipantId};
use std::collections::HashMap;
use std::sync::RwLock;

type SlotAddress = (String, Option<ParticipantId>, String);

/// In-memory slot store.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    slots: RwLock<HashMap<SlotAddress, Vec<u8>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` at `key` of `logic_id`, under `address` for ephemeral
    /// storage.
    pub fn insert(
        &self,
        logic_id: &LogicId,
        key: StorageKey,
        address: Option<ParticipantId>,
        bytes: Vec<u8>,
    ) -> Result<(), StateError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| StateError::Reader("lock poisoned".into()))?;
        slots.insert((logic_id.to_hex(), address, key.hex()), bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StorageReader for InMemoryStorage {
    async fn storage_at(
        &self,
        logic_id: &LogicId,
        storage_key: &str,
        address: Option<&ParticipantId>,
    ) -> Result<Vec<u8>, StateError> {
        let key = StorageKey::from_hex(storage_key)?;
        let slots = self
            .slots
            .read()
            .map_err(|_| StateError::Reader("lock poisoned".into()))?;
        Ok(slots
            .get(&(logic_id.to_hex(), address.copied(), key.hex()))
            .cloned()
            .unwrap_or_default())
    }
}
