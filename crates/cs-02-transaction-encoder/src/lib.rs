//! # CS-02 Transaction Encoder
//!
//! Converts document submissions and document identifiers into ledger
//! calldata. Pure: no I/O, no side effects.
//!
//! **Subsystem ID:** 2
//!
//! ## Wire Layout
//!
//! ```text
//! send_document:  [title, doc_type, signer_count, signer_0 .. signer_{N-1}, content_hash]
//! sign_document:  [doc_id]
//! ```
//!
//! Title, type and hash are short strings (at most 31 bytes each). Under the
//! default `Truncate` policy longer values are cut at a character boundary;
//! under `Reject` they fail with `FieldTooLong`.
//!
//! ## Module Structure
//!
//! ```text
//! cs-02-transaction-encoder/
//! ├── domain/          # EncodeError, SubmissionField
//! ├── encoder.rs       # encode_submission, encode_sign_action, TransactionEncoder
//! └── config.rs        # EncoderConfig, FieldPolicy
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod encoder;

// Re-exports
pub use config::{EncoderConfig, FieldPolicy};
pub use domain::{EncodeError, SubmissionField};
pub use encoder::{encode_sign_action, encode_submission, TransactionEncoder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
