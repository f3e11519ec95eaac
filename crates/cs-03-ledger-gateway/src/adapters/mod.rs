//! # Adapters
//!
//! Concrete `LedgerRpc` implementations.

pub mod json_rpc;

pub use json_rpc::JsonRpcLedgerClient;
