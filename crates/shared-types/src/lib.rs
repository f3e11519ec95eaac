//! # Shared Types Crate
//!
//! Ledger-native primitives and domain entities shared by every ChainSign
//! subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Felt`, `ContractAddress` and the document
//!   entities are defined once, here.
//! - **One Address Validator**: `parse_address` is the only acceptance test
//!   for wallet and signer addresses. The identity binder, the encoder and the
//!   gateway all call it, so their acceptance criteria cannot drift apart.
//! - **Opaque Identifiers**: document ids and content hashes enter the core as
//!   strings and are only interpreted when they are encoded.

pub mod address;
pub mod entities;
pub mod errors;
pub mod felt;
pub mod short_string;

pub use address::{is_valid_address, parse_address, ContractAddress, ADDRESS_MIN_LEN, ADDRESS_PREFIX};
pub use entities::*;
pub use errors::*;
pub use felt::{get_selector_from_name, Felt, FIELD_PRIME};
pub use short_string::{
    decode_short_string, encode_short_string, truncate_short_string, SHORT_STRING_MAX_BYTES,
};
