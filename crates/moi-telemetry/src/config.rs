//! Telemetry configuration from environment variables.

use std::env;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every event
    pub service_name: String,

    /// Filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression)
    pub log_level: String,

    /// Whether to write to stdout at all
    pub console_output: bool,

    /// Whether to format events as JSON
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "moi-sdk".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MOI_SERVICE_NAME`: Service name (default: moi-sdk)
    /// - `MOI_LOG_LEVEL` or `RUST_LOG`: Filter directive (default: info)
    /// - `MOI_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `MOI_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("MOI_SERVICE_NAME").unwrap_or_else(|_| "moi-sdk".to_string()),

            log_level: env::var("MOI_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("MOI_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("MOI_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }

    /// Same configuration with a different filter directive.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }
}
