//! # Domain Errors
//!
//! Validation failures. None of these ever reach the ledger.

use std::fmt;

use shared_types::{AddressError, FeltError};
use thiserror::Error;

/// Short-string fields of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmissionField {
    /// Document title
    Title,
    /// Document-type identifier
    DocType,
    /// Content hash
    ContentHash,
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionField::Title => "title",
            SubmissionField::DocType => "doc_type_id",
            SubmissionField::ContentHash => "content_hash",
        };
        f.write_str(name)
    }
}

/// Encoder error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Field is empty or whitespace-only.
    #[error("Field '{0}' must not be empty")]
    EmptyField(SubmissionField),

    /// Field exceeds short-string capacity under the `Reject` policy.
    #[error("Field '{field}' is {len} bytes, maximum is {max}")]
    FieldTooLong {
        /// Offending field
        field: SubmissionField,
        /// Byte length
        len: usize,
        /// Capacity
        max: usize,
    },

    /// Signer list is empty.
    #[error("At least one signer is required")]
    NoSigners,

    /// A signer address failed the format check.
    #[error("Invalid signer address at position {index}: {address} ({source})")]
    InvalidSignerAddress {
        /// Position in the signer list
        index: usize,
        /// Address as given
        address: String,
        /// Format check failure
        #[source]
        source: AddressError,
    },

    /// Document id empty or not a field element.
    #[error("Invalid document id '{id}': {reason}")]
    InvalidDocId {
        /// Identifier as given
        id: String,
        /// Parse failure
        reason: FeltError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field_names_field() {
        let err = EncodeError::EmptyField(SubmissionField::DocType);
        assert_eq!(err.to_string(), "Field 'doc_type_id' must not be empty");
    }

    #[test]
    fn test_invalid_signer_reports_position() {
        let err = EncodeError::InvalidSignerAddress {
            index: 2,
            address: "0xabc".to_string(),
            source: AddressError::TooShort { len: 5, min: 66 },
        };
        let text = err.to_string();
        assert!(text.contains("position 2"));
        assert!(text.contains("0xabc"));
    }
}
