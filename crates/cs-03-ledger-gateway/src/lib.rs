//! # CS-03 Ledger Gateway
//!
//! Invokes the document lifecycle entry points (`send_document`,
//! `sign_document`, `decline_document`) through the session's bound
//! identity, and exposes read access to the ledger: latest block, ranged
//! event queries and read-only contract calls.
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Error Classes
//!
//! | Error | Class | Caller action |
//! |-------|-------|---------------|
//! | `Encoding`, `NotBound`, `Config` | input | fix input / bind wallet |
//! | `SubmissionFailed`, `SigningFailed`, `DeclineFailed`, `ReadFailed` | ledger | resubmit |
//!
//! Writes are single best-effort calls. There is no automatic retry and no
//! deduplication of ledger writes.
//!
//! ## Module Structure
//!
//! ```text
//! cs-03-ledger-gateway/
//! ├── domain/          # GatewayError, LedgerRpcError, RPC value objects
//! ├── ports/           # LedgerRpc (+ MockLedgerRpc)
//! ├── adapters/        # JsonRpcLedgerClient (reqwest)
//! ├── session.rs       # Session, ContractHandle
//! ├── application/     # LedgerGateway
//! └── config.rs        # GatewayConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod session;

// Re-exports
pub use adapters::JsonRpcLedgerClient;
pub use application::LedgerGateway;
pub use config::{ConfigError, GatewayConfig};
pub use domain::{
    BlockId, BlockRef, EventFilter, EventsPage, FunctionCall, GatewayError, LedgerRpcError,
};
pub use ports::{LedgerRpc, MockLedgerRpc};
pub use session::{ContractHandle, Session};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
