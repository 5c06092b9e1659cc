//! # State Readers
//!
//! Resolve a path through declared state, derive its storage key, fetch the
//! slot through a [`StorageReader`] and decode the bytes with the schema of
//! the resolved type.

use crate::domain::{
    AccessorBuilder, ElementDescriptor, EntityBuilder, ResolvedPath, StateMode,
};
use crate::errors::StateError;
use crate::ports::StorageReader;
use moi_polo::{depolorize, PoloValue};
use moi_types::{LogicId, ParticipantId};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Shared plumbing of the two state readers.
struct StateContext<R: StorageReader> {
    logic_id: LogicId,
    descriptor: Arc<ElementDescriptor>,
    reader: Arc<R>,
    mode: StateMode,
}

impl<R: StorageReader> StateContext<R> {
    fn new(
        logic_id: LogicId,
        descriptor: Arc<ElementDescriptor>,
        reader: Arc<R>,
        mode: StateMode,
    ) -> Result<Self, StateError> {
        if descriptor.state(mode).is_none() {
            return Err(StateError::StateNotPresent(mode));
        }
        Ok(Self {
            logic_id,
            descriptor,
            reader,
            mode,
        })
    }

    fn resolve<F>(&self, path: F) -> Result<ResolvedPath, StateError>
    where
        F: for<'b> FnOnce(EntityBuilder<'b>) -> Result<AccessorBuilder<'b>, StateError>,
    {
        path(EntityBuilder::new(&self.descriptor, self.mode))
            .map(AccessorBuilder::finish)
            .inspect_err(|e| debug!(mode = %self.mode, error = %e, "Path resolution failed"))
    }

    async fn read(
        &self,
        resolved: &ResolvedPath,
        address: Option<&ParticipantId>,
    ) -> Result<PoloValue, StateError> {
        let schema = resolved.storage_type.to_schema(&self.descriptor)?;
        let key = resolved.storage_key();

        let bytes = self
            .reader
            .storage_at(&self.logic_id, &key.hex(), address)
            .await?;

        debug!(
            key = %key,
            storage_type = %resolved.storage_type,
            len = bytes.len(),
            "Read storage slot"
        );

        if bytes.is_empty() {
            return Ok(schema.default_value());
        }
        Ok(depolorize(&bytes, &schema)?)
    }
}

/// Reader for a logic's persistent state.
pub struct PersistentState<R: StorageReader> {
    ctx: StateContext<R>,
}

impl<R: StorageReader> PersistentState<R> {
    /// Fails if the manifest declares no persistent state.
    pub fn new(
        logic_id: LogicId,
        descriptor: Arc<ElementDescriptor>,
        reader: Arc<R>,
    ) -> Result<Self, StateError> {
        Ok(Self {
            ctx: StateContext::new(logic_id, descriptor, reader, StateMode::Persistent)?,
        })
    }

    pub fn logic_id(&self) -> &LogicId {
        &self.ctx.logic_id
    }

    /// Resolve `path` without reading.
    pub fn resolve<F>(&self, path: F) -> Result<ResolvedPath, StateError>
    where
        F: for<'b> FnOnce(EntityBuilder<'b>) -> Result<AccessorBuilder<'b>, StateError>,
    {
        self.ctx.resolve(path)
    }

    /// Read and decode the value at `path`.
    ///
    /// ```ignore
    /// let balance = state.get(|s| s.entity("Balances")?.property(owner)).await?;
    /// ```
    #[instrument(skip(self, path), fields(logic_id = %self.ctx.logic_id))]
    pub async fn get<F>(&self, path: F) -> Result<PoloValue, StateError>
    where
        F: for<'b> FnOnce(EntityBuilder<'b>) -> Result<AccessorBuilder<'b>, StateError>,
    {
        let resolved = self.ctx.resolve(path)?;
        self.ctx.read(&resolved, None).await
    }
}

/// Reader for a logic's ephemeral state, stored per participant.
pub struct EphemeralState<R: StorageReader> {
    ctx: StateContext<R>,
}

impl<R: StorageReader> EphemeralState<R> {
    /// Fails if the manifest declares no ephemeral state.
    pub fn new(
        logic_id: LogicId,
        descriptor: Arc<ElementDescriptor>,
        reader: Arc<R>,
    ) -> Result<Self, StateError> {
        Ok(Self {
            ctx: StateContext::new(logic_id, descriptor, reader, StateMode::Ephemeral)?,
        })
    }

    pub fn logic_id(&self) -> &LogicId {
        &self.ctx.logic_id
    }

    /// Resolve `path` without reading.
    pub fn resolve<F>(&self, path: F) -> Result<ResolvedPath, StateError>
    where
        F: for<'b> FnOnce(EntityBuilder<'b>) -> Result<AccessorBuilder<'b>, StateError>,
    {
        self.ctx.resolve(path)
    }

    /// Read and decode the value at `path` in `address`'s storage.
    #[instrument(skip(self, address, path), fields(logic_id = %self.ctx.logic_id, address = %address))]
    pub async fn get<F>(&self, address: &ParticipantId, path: F) -> Result<PoloValue, StateError>
    where
        F: for<'b> FnOnce(EntityBuilder<'b>) -> Result<AccessorBuilder<'b>, StateError>,
    {
        let resolved = self.ctx.resolve(path)?;
        self.ctx.read(&resolved, Some(address)).await
    }
}
