//! # Interaction Service
//!
//! Applies SDK defaults, validates, encodes and hands the interaction to an
//! [`InteractionTransport`].

use crate::config::IxDefaults;
use crate::domain::{validate_request, InteractionAssembler, InteractionRequest, ValidationIssue, ValidationMode};
use crate::errors::IxError;
use crate::ports::outbound::{ExecuteResponse, InteractionTransport, SimulateResponse};
use moi_types::hex::bytes_to_hex;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// Counters kept by the service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Interactions handed to the transport for execution.
    pub executed: u64,
    /// Interactions handed to the transport for simulation.
    pub simulated: u64,
    /// Requests rejected before reaching the transport.
    pub rejected: u64,
}

/// Submits interactions through a transport.
pub struct InteractionService<T: InteractionTransport> {
    transport: Arc<T>,
    defaults: IxDefaults,
    stats: Arc<RwLock<ServiceStats>>,
}

impl<T: InteractionTransport> InteractionService<T> {
    /// Create a service, rejecting invalid defaults.
    pub fn new(transport: T, defaults: IxDefaults) -> Result<Self, IxError> {
        defaults.validate()?;
        Ok(Self {
            transport: Arc::new(transport),
            defaults,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        })
    }

    /// Defaults in use.
    pub fn defaults(&self) -> &IxDefaults {
        &self.defaults
    }

    /// Current counters.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    fn prepare(&self, mode: ValidationMode, mut request: InteractionRequest) -> Result<String, IxError> {
        request.fuel_price.get_or_insert(self.defaults.fuel_price);
        if mode == ValidationMode::Execute {
            request.fuel_limit.get_or_insert(self.defaults.fuel_limit);
        }

        if request.operations.len() > self.defaults.max_operations {
            return Err(IxError::InvalidRequest(
                ValidationIssue::new(
                    "operations",
                    format!("At most {} operations are allowed", self.defaults.max_operations),
                )
                .with_value(request.operations.len()),
            ));
        }

        if let Some(issue) = validate_request(mode, &request) {
            return Err(IxError::InvalidRequest(issue));
        }

        let encoded = InteractionAssembler::encode(&request)?;
        Ok(bytes_to_hex(encoded))
    }

    async fn prepare_counted(&self, mode: ValidationMode, request: InteractionRequest) -> Result<String, IxError> {
        match self.prepare(mode, request) {
            Ok(encoded) => Ok(encoded),
            Err(e) => {
                warn!(error = %e, ?mode, "interaction rejected");
                self.stats.write().await.rejected += 1;
                Err(e)
            }
        }
    }

    /// Validate, encode and submit `request` for execution.
    #[instrument(skip(self, request), fields(operations = request.operations.len()))]
    pub async fn execute(&self, request: InteractionRequest) -> Result<ExecuteResponse, IxError> {
        let encoded = self.prepare_counted(ValidationMode::Execute, request).await?;
        let response = self.transport.execute(&encoded).await?;
        self.stats.write().await.executed += 1;
        debug!(hash = %response.hash, "interaction submitted");
        Ok(response)
    }

    /// Validate, encode and submit `request` for simulation.
    #[instrument(skip(self, request), fields(operations = request.operations.len()))]
    pub async fn simulate(&self, request: InteractionRequest) -> Result<SimulateResponse, IxError> {
        let encoded = self.prepare_counted(ValidationMode::Simulate, request).await?;
        let response = self.transport.simulate(&encoded).await?;
        self.stats.write().await.simulated += 1;
        debug!(effort = response.effort, "interaction simulated");
        Ok(response)
    }
}
