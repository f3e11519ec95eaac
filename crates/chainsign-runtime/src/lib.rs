//! # ChainSign Runtime Library
//!
//! Modules behind the `chainsign` binary, exposed for testing.
//!
//! ## Module Structure
//!
//! - `config` - `RuntimeConfig` assembled from defaults and `CS_*` variables
//! - `runtime` - gateway and reconciler wiring with a shutdown channel
//! - `cli` - clap definitions and the pure `encode`/`selector`/`types` commands

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod runtime;

pub use config::{RuntimeConfig, RuntimeConfigError};
pub use runtime::{log_event, ChainSignRuntime};
