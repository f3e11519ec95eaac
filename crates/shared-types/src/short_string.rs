//! # Short Strings
//!
//! A short string is up to 31 bytes packed big-endian into one felt. Any
//! 31-byte value is below the field prime, so packing never fails on range.

use crate::errors::FeltError;
use crate::felt::Felt;

/// Capacity of a single felt in bytes.
pub const SHORT_STRING_MAX_BYTES: usize = 31;

/// Cut `s` to at most 31 bytes without splitting a UTF-8 character.
///
/// Deterministic and idempotent: truncating an already-truncated string
/// returns it unchanged.
pub fn truncate_short_string(s: &str) -> &str {
    if s.len() <= SHORT_STRING_MAX_BYTES {
        return s;
    }
    let mut end = SHORT_STRING_MAX_BYTES;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Pack a string of at most 31 bytes into a felt.
pub fn encode_short_string(s: &str) -> Result<Felt, FeltError> {
    if s.len() > SHORT_STRING_MAX_BYTES {
        return Err(FeltError::StringTooLong {
            len: s.len(),
            max: SHORT_STRING_MAX_BYTES,
        });
    }
    Felt::from_bytes_be(s.as_bytes())
}

/// Unpack a felt into text. Leading zero bytes are padding; invalid UTF-8 is
/// replaced rather than rejected.
pub fn decode_short_string(felt: &Felt) -> String {
    let bytes = felt.to_bytes_be();
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[start..]).into_owned()
}
