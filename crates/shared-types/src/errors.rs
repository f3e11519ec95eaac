//! # Error Types
//!
//! Errors raised while parsing ledger-native values.

use thiserror::Error;

/// Errors produced when building a field element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeltError {
    /// Input string was empty (or only a `0x` prefix).
    #[error("Empty field element literal")]
    Empty,

    /// Input contained characters outside the expected radix.
    #[error("Invalid field element literal: {0}")]
    InvalidDigits(String),

    /// Value does not fit below the Stark field prime.
    #[error("Value exceeds the field prime: {0}")]
    OutOfRange(String),

    /// Short string longer than a single field element can carry.
    #[error("Short string too long: {len} bytes > {max} bytes")]
    StringTooLong {
        /// Actual byte length
        len: usize,
        /// Maximum byte length
        max: usize,
    },
}

/// Errors produced by the address-format check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Address does not start with `0x`.
    #[error("Address must start with 0x: {0}")]
    MissingPrefix(String),

    /// Address shorter than the minimum textual length.
    #[error("Address too short: {len} < {min} characters")]
    TooShort {
        /// Actual length
        len: usize,
        /// Minimum length
        min: usize,
    },

    /// Address body is not a valid field element.
    #[error("Address is not a field element: {0}")]
    NotAFieldElement(#[from] FeltError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_too_long_error() {
        let err = FeltError::StringTooLong { len: 40, max: 31 };
        assert!(err.to_string().contains("40 bytes > 31 bytes"));
    }

    #[test]
    fn test_too_short_error() {
        let err = AddressError::TooShort { len: 10, min: 66 };
        assert!(err.to_string().contains("10 < 66"));
    }

    #[test]
    fn test_address_wraps_felt_error() {
        let err: AddressError = FeltError::Empty.into();
        assert!(matches!(err, AddressError::NotAFieldElement(FeltError::Empty)));
    }
}
