//! # Application Layer
//!
//! The binder service.

pub mod service;

pub use service::IdentityBinder;
