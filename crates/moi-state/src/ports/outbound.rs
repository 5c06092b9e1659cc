//! # Driven Ports (Outbound)
//!
//! Slot reads are owned by the caller's transport. The core hands over the
//! logic id, the `0x`-prefixed storage key and, for ephemeral state, the
//! participant whose storage is read.

use crate::errors::StateError;
use async_trait::async_trait;
use moi_types::{LogicId, ParticipantId};

/// Reads raw POLO bytes stored at a logic storage slot.
#[async_trait]
pub trait StorageReader: Send + Sync {
    /// Bytes at `storage_key`. An unwritten slot yields an empty vector.
    async fn storage_at(
        &self,
        logic_id: &LogicId,
        storage_key: &str,
        address: Option<&ParticipantId>,
    ) -> Result<Vec<u8>, StateError>;
}
