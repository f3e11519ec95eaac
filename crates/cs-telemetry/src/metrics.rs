//! Prometheus metrics for the ChainSign subsystems.
//!
//! All metrics follow the naming convention: `cs_<subsystem>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, IntCounter, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // IDENTITY METRICS (Subsystem 1)
    // =========================================================================

    /// Wallet bind attempts
    pub static ref IDENTITY_BINDS: CounterVec = CounterVec::new(
        Opts::new("cs_identity_binds_total", "Wallet bind attempts"),
        &["outcome"]  // outcome: bound/cached/unavailable/rejected/invalid_address
    ).expect("metric creation failed");

    // =========================================================================
    // GATEWAY METRICS (Subsystem 3)
    // =========================================================================

    /// State-changing ledger calls
    pub static ref LEDGER_WRITES: CounterVec = CounterVec::new(
        Opts::new("cs_gateway_ledger_writes_total", "State-changing ledger calls"),
        &["operation", "outcome"]  // operation: submit/sign/decline, outcome: accepted/failed
    ).expect("metric creation failed");

    // =========================================================================
    // RECONCILER METRICS (Subsystem 4)
    // =========================================================================

    /// Poll cycles by outcome
    pub static ref POLLS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("cs_reconciler_polls_total", "Event reconciler poll cycles"),
        &["outcome"]  // outcome: advanced/no_new_blocks/skipped/failed/discarded
    ).expect("metric creation failed");

    /// Events delivered to subscribers
    pub static ref EVENTS_EMITTED: IntCounter = IntCounter::new(
        "cs_reconciler_events_emitted_total",
        "Chain events delivered to subscribers"
    ).expect("metric creation failed");

    /// Last observed block
    pub static ref WATERMARK_BLOCK: Gauge = Gauge::new(
        "cs_reconciler_watermark_block",
        "Last block fully processed by the reconciler"
    ).expect("metric creation failed");

    /// Poll duration
    pub static ref POLL_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "cs_reconciler_poll_duration_seconds",
            "Time spent in one poll cycle"
        ).buckets(exponential_buckets(0.005, 2.0, 12).expect("bucket creation failed"))
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(IDENTITY_BINDS.clone()),
        Box::new(LEDGER_WRITES.clone()),
        Box::new(POLLS_TOTAL.clone()),
        Box::new(EVENTS_EMITTED.clone()),
        Box::new(WATERMARK_BLOCK.clone()),
        Box::new(POLL_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
