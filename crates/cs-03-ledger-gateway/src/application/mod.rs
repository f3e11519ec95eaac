//! # Application Layer
//!
//! The gateway service.

pub mod service;

pub use service::LedgerGateway;
