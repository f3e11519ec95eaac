//! # Adapters
//!
//! In-memory implementations of the lookup ports.

pub mod catalog;

pub use catalog::{InMemoryDirectory, StaticCatalog};
