//! # Field Elements
//!
//! `Felt` is the ledger's native value: an integer strictly below the Stark
//! prime `P = 2^251 + 17 * 2^192 + 1`. Calldata, event keys and event data are
//! all sequences of felts.

use std::fmt;
use std::str::FromStr;

use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::errors::FeltError;

/// The Stark field prime, little-endian limbs.
pub const FIELD_PRIME: U256 = U256([1, 0, 0, 0x0800_0000_0000_0011]);

/// A field element below [`FIELD_PRIME`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Felt(U256);

impl Felt {
    /// The zero element.
    pub const ZERO: Felt = Felt(U256([0, 0, 0, 0]));

    /// Build from a raw 256-bit integer, rejecting values `>= P`.
    pub fn from_u256(value: U256) -> Result<Self, FeltError> {
        if value >= FIELD_PRIME {
            let mut bytes = [0u8; 32];
            value.to_big_endian(&mut bytes);
            return Err(FeltError::OutOfRange(format!("0x{}", hex::encode(bytes))));
        }
        Ok(Self(value))
    }

    /// Build from big-endian bytes (at most 32).
    pub fn from_bytes_be(bytes: &[u8]) -> Result<Self, FeltError> {
        if bytes.len() > 32 {
            return Err(FeltError::OutOfRange(hex::encode(bytes)));
        }
        Self::from_u256(U256::from_big_endian(bytes))
    }

    /// Parse a `0x`-prefixed hexadecimal literal.
    pub fn from_hex(s: &str) -> Result<Self, FeltError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() {
            return Err(FeltError::Empty);
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FeltError::InvalidDigits(s.to_string()));
        }
        let significant = digits.trim_start_matches('0');
        if significant.len() > 64 {
            return Err(FeltError::OutOfRange(s.to_string()));
        }
        if significant.is_empty() {
            return Ok(Self::ZERO);
        }
        let value = U256::from_str_radix(significant, 16)
            .map_err(|_| FeltError::InvalidDigits(s.to_string()))?;
        Self::from_u256(value)
    }

    /// Parse a decimal literal.
    pub fn from_dec_str(s: &str) -> Result<Self, FeltError> {
        if s.is_empty() {
            return Err(FeltError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FeltError::InvalidDigits(s.to_string()));
        }
        let value =
            U256::from_dec_str(s).map_err(|_| FeltError::OutOfRange(s.to_string()))?;
        Self::from_u256(value)
    }

    /// Parse either form: `0x`-prefixed hex, otherwise decimal.
    pub fn parse(s: &str) -> Result<Self, FeltError> {
        let s = s.trim();
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex(s)
        } else {
            Self::from_dec_str(s)
        }
    }

    /// Big-endian 32-byte representation.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }

    /// Minimal hex form, e.g. `0x2a`.
    pub fn to_hex(&self) -> String {
        let full = hex::encode(self.to_bytes_be());
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }

    /// Zero-padded 64-digit hex form, e.g. `0x00..2a`.
    pub fn to_fixed_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes_be()))
    }

    /// Value as `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.0.bits() > 64 {
            None
        } else {
            Some(self.0.low_u64())
        }
    }

    /// Underlying integer.
    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<usize> for Felt {
    fn from(value: usize) -> Self {
        Self(U256::from(value as u64))
    }
}

impl FromStr for Felt {
    type Err = FeltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Felt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Felt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Felt::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Entry-point / event selector: `keccak256(name)` masked to 250 bits.
///
/// The two reserved default entry points map to zero.
pub fn get_selector_from_name(name: &str) -> Felt {
    if name == "__default__" || name == "__l1_default__" {
        return Felt::ZERO;
    }
    let mut digest: [u8; 32] = Keccak256::digest(name.as_bytes()).into();
    digest[0] &= 0x03;
    // 250-bit values are always below P.
    Felt(U256::from_big_endian(&digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_and_decimal_agree() {
        assert_eq!(Felt::parse("0x2a").unwrap(), Felt::from(42u64));
        assert_eq!(Felt::parse("42").unwrap(), Felt::from(42u64));
        assert_eq!(Felt::parse(" 0X2A ").unwrap(), Felt::from(42u64));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Felt::parse("abc"), Err(FeltError::InvalidDigits(_))));
        assert!(matches!(Felt::parse("0xzz"), Err(FeltError::InvalidDigits(_))));
        assert!(matches!(Felt::parse(""), Err(FeltError::Empty)));
        assert!(matches!(Felt::parse("0x"), Err(FeltError::Empty)));
        assert!(matches!(Felt::parse("-1"), Err(FeltError::InvalidDigits(_))));
    }

    #[test]
    fn test_prime_is_out_of_range() {
        let p = "0x800000000000011000000000000000000000000000000000000000000000001";
        assert!(matches!(Felt::from_hex(p), Err(FeltError::OutOfRange(_))));

        let p_minus_one = "0x800000000000011000000000000000000000000000000000000000000000000";
        assert!(Felt::from_hex(p_minus_one).is_ok());
    }

    #[test]
    fn test_leading_zeros_are_accepted() {
        let padded = format!("0x{}2a", "0".repeat(70));
        assert_eq!(Felt::from_hex(&padded).unwrap(), Felt::from(42u64));
    }

    #[test]
    fn test_hex_forms() {
        let felt = Felt::from(255u64);
        assert_eq!(felt.to_hex(), "0xff");
        assert_eq!(felt.to_fixed_hex().len(), 66);
        assert!(felt.to_fixed_hex().ends_with("ff"));
        assert_eq!(Felt::ZERO.to_hex(), "0x0");
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(Felt::from(7u64).to_u64(), Some(7));
        let big = Felt::from_hex("0x10000000000000000").unwrap();
        assert_eq!(big.to_u64(), None);
    }

    #[test]
    fn test_serde_round_trip_as_hex_string() {
        let felt = Felt::from(4096u64);
        let json = serde_json::to_string(&felt).unwrap();
        assert_eq!(json, "\"0x1000\"");
        let back: Felt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, felt);
    }

    #[test]
    fn test_selector_for_transfer() {
        let selector = get_selector_from_name("transfer");
        assert_eq!(
            selector.to_hex(),
            "0x83afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e"
        );
    }

    #[test]
    fn test_selector_fits_250_bits() {
        for name in ["DocumentSent", "send_document", "sign_document"] {
            assert!(get_selector_from_name(name).as_u256().bits() <= 250);
        }
    }

    #[test]
    fn test_default_selectors_are_zero() {
        assert_eq!(get_selector_from_name("__default__"), Felt::ZERO);
        assert_eq!(get_selector_from_name("__l1_default__"), Felt::ZERO);
    }
}
