//! # Domain Module
//!
//! Encoder errors and the fields they refer to.

pub mod errors;

pub use errors::*;
