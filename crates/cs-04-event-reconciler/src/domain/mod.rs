//! # Domain Module
//!
//! The poll-cycle state machine and its errors. Synchronous; the
//! application layer owns the timer and the awaits.

pub mod errors;
pub mod poll_cycle;

pub use errors::*;
pub use poll_cycle::*;
