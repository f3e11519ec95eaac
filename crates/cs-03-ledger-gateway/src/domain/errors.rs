//! # Domain Errors

use cs_01_identity_binder::SignerError;
use cs_02_transaction_encoder::EncodeError;
use thiserror::Error;

use crate::config::ConfigError;

/// Failures of the ledger RPC transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerRpcError {
    /// HTTP layer failure (connect, timeout, status).
    #[error("transport error: {0}")]
    Transport(String),

    /// Node returned a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Response had neither `result` nor `error`.
    #[error("RPC response for {0} is missing a result")]
    MissingResult(String),

    /// Response body could not be decoded.
    #[error("failed to decode RPC response: {0}")]
    Decode(String),
}

/// Ledger gateway error types.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// A write was attempted with no bound identity.
    #[error("No identity bound to the session. Connect a wallet first")]
    NotBound,

    /// Encoder rejected the input; nothing was sent.
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodeError),

    /// Gateway configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `send_document` was not accepted.
    #[error("Document submission failed: {0}")]
    SubmissionFailed(#[source] SignerError),

    /// `sign_document` was not accepted.
    #[error("Document signing failed: {0}")]
    SigningFailed(#[source] SignerError),

    /// `decline_document` was not accepted.
    #[error("Document decline failed: {0}")]
    DeclineFailed(#[source] SignerError),

    /// A ledger read failed.
    #[error("Ledger read failed: {0}")]
    ReadFailed(#[source] LedgerRpcError),
}

impl GatewayError {
    /// The caller must change its input (or bind a wallet) before retrying.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GatewayError::NotBound | GatewayError::Encoding(_) | GatewayError::Config(_)
        )
    }

    /// The ledger call itself failed; resubmitting the same input may succeed.
    pub fn is_ledger_error(&self) -> bool {
        matches!(
            self,
            GatewayError::SubmissionFailed(_)
                | GatewayError::SigningFailed(_)
                | GatewayError::DeclineFailed(_)
                | GatewayError::ReadFailed(_)
        )
    }
}
