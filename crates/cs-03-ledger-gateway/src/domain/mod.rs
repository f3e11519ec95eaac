//! # Domain Module
//!
//! Gateway errors and the value objects exchanged with the ledger RPC.

pub mod errors;
pub mod value_objects;

pub use errors::*;
pub use value_objects::*;
