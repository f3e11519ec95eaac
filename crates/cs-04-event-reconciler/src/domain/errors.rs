//! # Domain Errors

use thiserror::Error;

/// Event reconciler error types.
///
/// Poll failures are logged and swallowed; they never reach subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcilerError {
    /// The event source failed (transport, RPC error, decode).
    #[error("event source failed: {0}")]
    Source(String),

    /// Configuration rejected.
    #[error("invalid reconciler config: {0}")]
    InvalidConfig(String),
}
