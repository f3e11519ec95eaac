//! # CS-05 Signer Sequence Manager
//!
//! Maintains the ordered list of signers for a document being composed.
//! Pure client-side state, consumed at submission time by the encoder.
//!
//! **Subsystem ID:** 5
//!
//! ## Invariant
//!
//! After every mutation the `order` values are exactly `1..=len` and match
//! list positions. Every mutation renumbers; failed mutations leave the
//! sequence unchanged.
//!
//! ## Module Structure
//!
//! ```text
//! cs-05-signer-sequence/
//! ├── domain/          # SignerSequence, SignerAssignment, invariants, errors
//! ├── ports/           # DocumentTypeCatalog, RoleDirectory
//! └── adapters/        # StaticCatalog (standard types), InMemoryDirectory
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{InMemoryDirectory, StaticCatalog};
pub use domain::{
    DocumentType, SequenceError, SignerAssignment, SignerSequence, SignerUser,
};
pub use ports::{DocumentTypeCatalog, RoleDirectory};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
