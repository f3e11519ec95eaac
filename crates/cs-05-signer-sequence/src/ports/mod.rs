//! # Ports
//!
//! Synchronous lookups provided by the surrounding application.

pub mod outbound;

pub use outbound::*;
