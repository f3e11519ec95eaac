//! # Runtime Configuration
//!
//! Unified configuration for the gateway, the reconciler and telemetry.
//!
//! ## Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CS_RPC_URL` | public Sepolia endpoint |
//! | `CS_CONTRACT_ADDRESS` | deployed ChainSign contract |
//! | `CS_POLL_INTERVAL_SECS` | `15` |
//! | `CS_EVENT_NAME` | `DocumentSent` |
//! | `CS_START_BLOCK` | latest block |

use cs_03_ledger_gateway::{ConfigError, GatewayConfig};
use cs_04_event_reconciler::{ReconcilerConfig, ReconcilerError};
use cs_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime configuration errors.
#[derive(Debug, Error)]
pub enum RuntimeConfigError {
    /// An environment variable held something unparsable.
    #[error("{var} must be an unsigned integer, got {value:?}")]
    NotANumber {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// Gateway settings rejected.
    #[error("Invalid gateway config: {0}")]
    Gateway(#[from] ConfigError),

    /// Reconciler settings rejected.
    #[error("Invalid reconciler config: {0}")]
    Reconciler(#[from] ReconcilerError),
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Ledger gateway settings.
    pub gateway: GatewayConfig,
    /// Event reconciler settings.
    pub reconciler: ReconcilerConfig,
    /// Logging settings.
    pub telemetry: TelemetryConfig,
}

impl RuntimeConfig {
    /// Load overrides from the process environment.
    pub fn from_env() -> Result<Self, RuntimeConfigError> {
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.telemetry = TelemetryConfig::from_env();
        Ok(config)
    }

    /// Load overrides through `lookup`, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RuntimeConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("CS_RPC_URL") {
            config.gateway.rpc_url = url;
        }
        if let Some(address) = lookup("CS_CONTRACT_ADDRESS") {
            config.gateway.contract_address = address;
        }
        if let Some(secs) = parse_u64(&lookup, "CS_POLL_INTERVAL_SECS")? {
            config.reconciler.poll_interval_secs = secs;
        }
        if let Some(name) = lookup("CS_EVENT_NAME") {
            config.reconciler.event_name = name;
        }
        if let Some(block) = parse_u64(&lookup, "CS_START_BLOCK")? {
            config.reconciler.start_block = Some(block);
        }

        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), RuntimeConfigError> {
        self.gateway.validate()?;
        self.reconciler.validate()?;
        Ok(())
    }
}

fn parse_u64<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, RuntimeConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RuntimeConfigError::NotANumber { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.reconciler.poll_interval_secs, 15);
        assert_eq!(config.reconciler.event_name, "DocumentSent");
        assert_eq!(config.gateway.events_chunk_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("CS_RPC_URL", "http://localhost:5050/rpc"),
            ("CS_POLL_INTERVAL_SECS", "3"),
            ("CS_EVENT_NAME", "DocumentSigned"),
            ("CS_START_BLOCK", " 1200 "),
        ]))
        .unwrap();
        assert_eq!(config.gateway.rpc_url, "http://localhost:5050/rpc");
        assert_eq!(config.reconciler.poll_interval_secs, 3);
        assert_eq!(config.reconciler.event_name, "DocumentSigned");
        assert_eq!(config.reconciler.start_block, Some(1200));
    }

    #[test]
    fn test_bad_number_rejected() {
        let err = RuntimeConfig::from_lookup(lookup(&[("CS_POLL_INTERVAL_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeConfigError::NotANumber { var: "CS_POLL_INTERVAL_SECS", .. }
        ));
    }

    #[test]
    fn test_validate_rejects_bad_sections() {
        let config =
            RuntimeConfig::from_lookup(lookup(&[("CS_CONTRACT_ADDRESS", "0x123")])).unwrap();
        assert!(matches!(config.validate(), Err(RuntimeConfigError::Gateway(_))));

        let config =
            RuntimeConfig::from_lookup(lookup(&[("CS_POLL_INTERVAL_SECS", "0")])).unwrap();
        assert!(matches!(config.validate(), Err(RuntimeConfigError::Reconciler(_))));
    }
}
