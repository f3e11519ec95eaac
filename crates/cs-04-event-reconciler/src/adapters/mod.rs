//! # Adapters

pub mod gateway_source;
