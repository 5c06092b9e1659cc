//! # Driven Ports (Outbound)
//!
//! The network round trip is owned by the caller's transport. The SDK core
//! hands over a `0x`-prefixed hex encoding of the interaction.

use crate::errors::IxError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of submitting an interaction for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// Interaction hash assigned by the node.
    pub hash: String,
}

/// Result of a dry run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponse {
    /// Fuel consumed.
    pub effort: u64,
    /// Node-reported outcome.
    pub result: Value,
}

/// Submits encoded interactions to a node.
#[async_trait]
pub trait InteractionTransport: Send + Sync {
    /// Submit for execution.
    async fn execute(&self, encoded: &str) -> Result<ExecuteResponse, IxError>;

    /// Submit for simulation.
    async fn simulate(&self, encoded: &str) -> Result<SimulateResponse, IxError>;
}
