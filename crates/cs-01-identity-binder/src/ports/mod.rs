//! # Ports
//!
//! Outbound dependencies of the Identity Binder: the wallet environment,
//! the wallet extension and the signing capability it hands out.

pub mod outbound;

pub use outbound::*;
