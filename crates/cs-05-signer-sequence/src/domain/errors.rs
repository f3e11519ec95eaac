//! # Domain Errors

use thiserror::Error;

/// Signer sequence error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// User already has a position in the sequence.
    #[error("User {0} is already in the signer sequence")]
    AlreadyAssigned(String),

    /// Index outside `[0, len)`.
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Sequence length
        len: usize,
    },

    /// No entry for this user.
    #[error("User {0} is not in the signer sequence")]
    UnknownUser(String),

    /// Catalog has no such document type.
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),

    /// A signer has no wallet address to submit.
    #[error("Signer {user_id} has no wallet address")]
    MissingAddress {
        /// User without an address
        user_id: String,
    },
}
