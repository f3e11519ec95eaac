//! # Ports
//!
//! The ledger RPC the gateway drives.

pub mod outbound;

pub use outbound::*;
