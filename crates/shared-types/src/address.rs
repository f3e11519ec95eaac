//! # Contract Addresses
//!
//! The one address-format check used by every layer: wallet binding, signer
//! encoding and gateway construction.
//!
//! Accepted form: `0x` prefix, at least 64 hex digits, value below the field
//! prime. Leading zeros are allowed beyond the minimum length.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::AddressError;
use crate::felt::Felt;

/// Required textual prefix.
pub const ADDRESS_PREFIX: &str = "0x";

/// Minimum textual length including the prefix (`0x` + 64 hex digits).
pub const ADDRESS_MIN_LEN: usize = 66;

/// A validated contract/account address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractAddress(Felt);

impl ContractAddress {
    /// Wrap a felt without textual validation (for values read from the ledger).
    pub fn from_felt(felt: Felt) -> Self {
        Self(felt)
    }

    /// The address as a field element.
    pub fn felt(&self) -> Felt {
        self.0
    }
}

/// Validate and parse an address string.
pub fn parse_address(raw: &str) -> Result<ContractAddress, AddressError> {
    if !raw.starts_with(ADDRESS_PREFIX) {
        return Err(AddressError::MissingPrefix(raw.to_string()));
    }
    if raw.len() < ADDRESS_MIN_LEN {
        return Err(AddressError::TooShort {
            len: raw.len(),
            min: ADDRESS_MIN_LEN,
        });
    }
    Ok(ContractAddress(Felt::from_hex(raw)?))
}

/// Convenience predicate over [`parse_address`].
pub fn is_valid_address(raw: &str) -> bool {
    parse_address(raw).is_ok()
}

impl FromStr for ContractAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s)
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_fixed_hex())
    }
}

impl Serialize for ContractAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_fixed_hex())
    }
}

impl<'de> Deserialize<'de> for ContractAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_address(&s).map_err(serde::de::Error::custom)
    }
}
