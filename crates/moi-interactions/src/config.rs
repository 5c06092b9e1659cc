//! SDK defaults for interaction submission.

use crate::errors::IxError;
use serde::{Deserialize, Serialize};
use std::env;

/// Defaults applied by the interaction service when a request leaves them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IxDefaults {
    /// Fuel price used when the request has none.
    pub fuel_price: u64,
    /// Fuel limit used for execution when the request has none.
    pub fuel_limit: u64,
    /// Upper bound on operations per interaction.
    pub max_operations: usize,
}

impl Default for IxDefaults {
    fn default() -> Self {
        Self {
            fuel_price: 1,
            fuel_limit: 10_000,
            max_operations: 32,
        }
    }
}

impl IxDefaults {
    /// Read defaults from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `MOI_FUEL_PRICE`: default fuel price (default: 1)
    /// - `MOI_FUEL_LIMIT`: default fuel limit (default: 10000)
    /// - `MOI_MAX_OPERATIONS`: operations per interaction (default: 32)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            fuel_price: env::var("MOI_FUEL_PRICE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fuel_price),
            fuel_limit: env::var("MOI_FUEL_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fuel_limit),
            max_operations: env::var("MOI_MAX_OPERATIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_operations),
        }
    }

    /// Reject values no interaction could be built with.
    pub fn validate(&self) -> Result<(), IxError> {
        if self.fuel_limit == 0 {
            return Err(IxError::InvalidConfig("fuel_limit cannot be 0".to_string()));
        }
        if self.max_operations == 0 {
            return Err(IxError::InvalidConfig("max_operations cannot be 0".to_string()));
        }
        Ok(())
    }

    /// Builder-style method to set the fuel price
    #[must_use]
    pub fn with_fuel_price(mut self, fuel_price: u64) -> Self {
        self.fuel_price = fuel_price;
        self
    }

    /// Builder-style method to set the fuel limit
    #[must_use]
    pub fn with_fuel_limit(mut self, fuel_limit: u64) -> Self {
        self.fuel_limit = fuel_limit;
        self
    }

    /// Builder-style method to set the operation cap
    #[must_use]
    pub fn with_max_operations(mut self, max_operations: usize) -> Self {
        self.max_operations = max_operations;
        self
    }
}
