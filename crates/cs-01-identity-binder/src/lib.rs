//! # CS-01 Identity Binder
//!
//! Obtains a signing identity (address + signing capability) from an
//! environment-provided wallet extension and caches it.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Contract
//!
//! | Outcome | When |
//! |---------|------|
//! | `WalletUnavailable` | No compatible extension in the environment |
//! | `UserRejected` | Handshake failed or yielded no address/signer |
//! | `InvalidAddress` | Extension returned a malformed address |
//! | cached `Identity` | Any later call until `clear()` |
//!
//! ## Module Structure
//!
//! ```text
//! cs-01-identity-binder/
//! ├── domain/          # Identity, IdentityError
//! ├── ports/           # WalletEnvironment, WalletExtension, AccountSigner (+ mocks)
//! └── application/     # IdentityBinder service
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use domain::{Identity, IdentityError};
pub use ports::{
    AccountSigner, ContractCall, EnableOptions, MockEnvironment, MockSigner, MockWallet,
    SignerError, WalletEnvironment, WalletError, WalletExtension,
};
pub use application::IdentityBinder;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
