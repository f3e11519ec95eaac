//! # ChainSign Telemetry
//!
//! Logging and metrics shared by every ChainSign subsystem.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` registry with an `EnvFilter` and a
//!   pretty or JSON `fmt` layer.
//! - **Metrics**: Prometheus counters and gauges for polls, emitted events,
//!   ledger writes and wallet binds.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cs_telemetry::{TelemetryConfig, init_telemetry};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CS_SERVICE_NAME` | `chainsign` | Service name attached to logs |
//! | `CS_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `CS_JSON_LOGS` | `false` | JSON formatted logs |
//! | `CS_NETWORK` | `sepolia` | Network label |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingGuard};
pub use metrics::{
    gather_metrics, register_metrics, EVENTS_EMITTED, IDENTITY_BINDS, LEDGER_WRITES,
    POLLS_TOTAL, POLL_DURATION, WATERMARK_BLOCK,
};

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and register metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    register_metrics()?;
    let logging = init_logging(&config)?;
    Ok(TelemetryGuard { _logging: logging })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _logging: LoggingGuard,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Log a ledger-related event with standard fields.
#[macro_export]
macro_rules! log_ledger_event {
    ($level:ident, $subsystem:expr, $msg:expr, $tx_hash:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            tx_hash = %$tx_hash,
            $($($field)*,)?
            $msg
        )
    };
}
