//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Network label (mainnet, sepolia, devnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "chainsign".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            network: "sepolia".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// - `CS_SERVICE_NAME`: Service name (default: chainsign)
    /// - `CS_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `CS_JSON_LOGS`: Enable JSON logs (default: true in containers)
    /// - `CS_NETWORK`: Network name (default: sepolia)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("CS_SERVICE_NAME")
                .unwrap_or_else(|_| "chainsign".to_string()),

            log_level: env::var("CS_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("CS_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            network: env::var("CS_NETWORK").unwrap_or_else(|_| "sepolia".to_string()),
        }
    }

    /// Configuration for tests: debug level, plain output.
    pub fn for_testing() -> Self {
        Self {
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }
}
