//! # CS-04 Event Reconciler
//!
//! Polls the ledger for new contract events since the last observed block,
//! deduplicates them and delivers normalized [`ChainEvent`]s to subscribers.
//! This is the only read path from the ledger into the rest of the system.
//!
//! **Subsystem ID:** 4
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Poll Cycle
//!
//! ```text
//!   tick ──► Idle ──begin──► Polling ──latest == watermark──► Idle
//!                              │
//!                              ├── read [from, latest], dedup, deliver
//!                              │        watermark = latest ──► Idle
//!                              └── any failure (logged) ─────► Idle
//! ```
//!
//! A tick that arrives while `Polling` is suppressed, not queued. The first
//! subscriber starts the timer; dropping the last one stops it and releases
//! the watermark. An in-flight poll that outlives its session neither
//! advances the watermark nor delivers events.
//!
//! ## Module Structure
//!
//! ```text
//! cs-04-event-reconciler/
//! ├── domain/          # PollCycle, PollWatermark, ReconcilerError
//! ├── ports/           # LedgerEventSource (+ MockEventSource)
//! ├── adapters/        # LedgerEventSource for LedgerGateway
//! ├── application/     # EventReconciler, Subscription
//! └── config.rs        # ReconcilerConfig
//! ```
//!
//! [`ChainEvent`]: shared_types::ChainEvent

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::{EventReconciler, Subscription};
pub use config::ReconcilerConfig;
pub use domain::{PollCycle, PollOutcome, PollPlan, PollState, PollWatermark, ReconcilerError};
pub use ports::{LedgerEventSource, MockEventSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
