//! # Gateway Configuration

use serde::{Deserialize, Serialize};
use shared_types::{parse_address, AddressError, ContractAddress};
use thiserror::Error;

/// Default public Sepolia RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "https://starknet-sepolia.public.blastapi.io/rpc/v0_7";

/// Page size for ranged event queries.
pub const DEFAULT_EVENTS_CHUNK_SIZE: u64 = 100;

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// RPC URL is empty.
    #[error("rpc_url must not be empty")]
    MissingRpcUrl,

    /// Contract address fails the address-format check.
    #[error("contract_address is invalid: {0}")]
    InvalidContractAddress(#[from] AddressError),

    /// Chunk size of zero would never make progress.
    #[error("events_chunk_size must be at least 1")]
    ZeroChunkSize,

    /// An entry-point name is empty.
    #[error("entry point '{0}' must not be empty")]
    EmptyEntrypoint(&'static str),
}

/// Ledger gateway configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// JSON-RPC endpoint.
    pub rpc_url: String,

    /// ChainSign contract address.
    pub contract_address: String,

    /// Events per `starknet_getEvents` page.
    pub events_chunk_size: u64,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Entry point for document submission.
    pub submit_entrypoint: String,

    /// Entry point for signing.
    pub sign_entrypoint: String,

    /// Entry point for declining.
    pub decline_entrypoint: String,

    /// Read-only document lookup.
    pub get_document_entrypoint: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            contract_address: "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef"
                .to_string(),
            events_chunk_size: DEFAULT_EVENTS_CHUNK_SIZE,
            request_timeout_secs: 30,
            submit_entrypoint: "send_document".to_string(),
            sign_entrypoint: "sign_document".to_string(),
            decline_entrypoint: "decline_document".to_string(),
            get_document_entrypoint: "get_document".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Create a config for testing (local endpoint, small pages).
    pub fn for_testing() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:5050/rpc".to_string(),
            contract_address: format!("0x{:0>64}", "c0ffee"),
            events_chunk_size: 2,
            request_timeout_secs: 5,
            ..Self::default()
        }
    }

    /// Check the config and return the parsed contract address.
    pub fn validate(&self) -> Result<ContractAddress, ConfigError> {
        if self.rpc_url.trim().is_empty() {
            return Err(ConfigError::MissingRpcUrl);
        }
        if self.events_chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        for (name, value) in [
            ("submit_entrypoint", &self.submit_entrypoint),
            ("sign_entrypoint", &self.sign_entrypoint),
            ("decline_entrypoint", &self.decline_entrypoint),
            ("get_document_entrypoint", &self.get_document_entrypoint),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyEntrypoint(name));
            }
        }
        Ok(parse_address(&self.contract_address)?)
    }
}
