//! # Ports
//!
//! Where the reconciler reads events from.

pub mod outbound;

pub use outbound::*;
