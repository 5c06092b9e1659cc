//! # MOI Telemetry
//!
//! Structured logging for binaries and test harnesses built on the SDK
//! core. Library crates only emit `tracing` events; installing a
//! subscriber is left to the application.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use moi_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MOI_SERVICE_NAME` | `moi-sdk` | Service name on events |
//! | `MOI_LOG_LEVEL` | `info` | Filter directive |
//! | `MOI_JSON_LOGS` | `false` | JSON output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging, init_test_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize subscriber: {0}")]
    Init(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
