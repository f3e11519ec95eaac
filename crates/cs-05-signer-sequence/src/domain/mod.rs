//! # Domain Module

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod sequence;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use sequence::*;
