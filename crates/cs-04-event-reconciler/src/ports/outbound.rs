//! # Outbound Ports (Driven Ports)

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{BlockNumber, RawEvent};
use tokio::sync::watch;

use crate::domain::ReconcilerError;

/// Side-effect-free ledger reads used by the poll loop.
#[async_trait]
pub trait LedgerEventSource: Send + Sync {
    /// Latest confirmed block number.
    async fn latest_block(&self) -> Result<BlockNumber, ReconcilerError>;

    /// All `event_name` events over `[from, to]`, in ledger order.
    async fn events(
        &self,
        from: BlockNumber,
        to: BlockNumber,
        event_name: &str,
    ) -> Result<Vec<RawEvent>, ReconcilerError>;
}

// =============================================================================
// Mock implementation for testing
// =============================================================================

/// Scriptable event source.
///
/// `events` returns stored events in the requested block range without
/// selector filtering. Reads can be held at a gate to simulate a slow node.
pub struct MockEventSource {
    latest: Mutex<BlockNumber>,
    events: Mutex<Vec<RawEvent>>,
    failure: Mutex<Option<String>>,
    ranges: Mutex<Vec<(BlockNumber, BlockNumber)>>,
    latest_calls: AtomicUsize,
    gate: watch::Sender<bool>,
}

impl Default for MockEventSource {
    fn default() -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            latest: Mutex::new(0),
            events: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            ranges: Mutex::new(Vec::new()),
            latest_calls: AtomicUsize::new(0),
            gate,
        }
    }
}

impl MockEventSource {
    /// Empty source at block zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latest block.
    pub fn set_latest_block(&self, block: BlockNumber) {
        *self.latest.lock() = block;
    }

    /// Append an event.
    pub fn push_event(&self, event: RawEvent) {
        self.events.lock().push(event);
    }

    /// Fail every read until `recover`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    /// Stop failing.
    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    /// Hold event reads until `open_gate`.
    pub fn close_gate(&self) {
        self.gate.send_replace(false);
    }

    /// Release held reads.
    pub fn open_gate(&self) {
        self.gate.send_replace(true);
    }

    /// Ranges requested so far.
    pub fn ranges(&self) -> Vec<(BlockNumber, BlockNumber)> {
        self.ranges.lock().clone()
    }

    /// Latest-block lookups so far.
    pub fn latest_calls(&self) -> usize {
        self.latest_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), ReconcilerError> {
        match self.failure.lock().clone() {
            Some(message) => Err(ReconcilerError::Source(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LedgerEventSource for MockEventSource {
    async fn latest_block(&self) -> Result<BlockNumber, ReconcilerError> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(*self.latest.lock())
    }

    async fn events(
        &self,
        from: BlockNumber,
        to: BlockNumber,
        _event_name: &str,
    ) -> Result<Vec<RawEvent>, ReconcilerError> {
        self.ranges.lock().push((from, to));
        let mut gate = self.gate.subscribe();
        gate.wait_for(|open| *open)
            .await
            .map_err(|_| ReconcilerError::Source("gate closed".to_string()))?;
        self.check_failure()?;

        Ok(self
            .events
            .lock()
            .iter()
            .filter(|e| matches!(e.block_number, Some(b) if b >= from && b <= to))
            .cloned()
            .collect())
    }
}
