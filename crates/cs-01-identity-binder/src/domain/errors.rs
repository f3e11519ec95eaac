//! # Domain Errors
//!
//! Identity/connection layer failures.

use shared_types::AddressError;
use thiserror::Error;

/// Identity binder error types.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// No compatible wallet extension in the environment.
    #[error("No wallet extension found. Install a compatible wallet (e.g. ArgentX or Braavos)")]
    WalletUnavailable,

    /// The enable handshake failed or yielded no address/signer.
    #[error("Wallet connection rejected: {0}")]
    UserRejected(String),

    /// The extension returned a malformed address.
    #[error("Wallet returned an invalid address {address}: {source}")]
    InvalidAddress {
        /// Address as returned by the wallet
        address: String,
        /// Format check failure
        #[source]
        source: AddressError,
    },

    /// An operation needed an identity but none is bound.
    #[error("No identity bound. Connect a wallet first")]
    NotBound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_unavailable_error() {
        let err = IdentityError::WalletUnavailable;
        assert!(err.to_string().contains("No wallet extension"));
    }

    #[test]
    fn test_invalid_address_error() {
        let err = IdentityError::InvalidAddress {
            address: "0x12".to_string(),
            source: AddressError::TooShort { len: 4, min: 66 },
        };
        let text = err.to_string();
        assert!(text.contains("0x12"));
        assert!(text.contains("4 < 66"));
    }

    #[test]
    fn test_user_rejected_error() {
        let err = IdentityError::UserRejected("user closed the modal".to_string());
        assert!(err.to_string().contains("user closed the modal"));
    }
}
