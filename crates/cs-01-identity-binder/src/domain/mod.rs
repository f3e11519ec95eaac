//! # Domain Module
//!
//! Core domain types for the Identity Binder.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
