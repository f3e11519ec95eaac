//! # Reconciler Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared_types::BlockNumber;

use crate::domain::ReconcilerError;

/// Event reconciler configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Seconds between poll ticks.
    pub poll_interval_secs: u64,

    /// Contract event to watch.
    pub event_name: String,

    /// Remembered events for boundary-block deduplication.
    pub dedup_cache_size: usize,

    /// Drop events whose first key is not the watched event's selector.
    pub verify_event_selector: bool,

    /// First block of a fresh session. `None` starts at the latest block.
    pub start_block: Option<BlockNumber>,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 15,
            event_name: "DocumentSent".to_string(),
            dedup_cache_size: 4096,
            verify_event_selector: true,
            start_block: None,
        }
    }
}

impl ReconcilerConfig {
    /// Create a config for testing (short interval, small cache).
    pub fn for_testing() -> Self {
        Self {
            poll_interval_secs: 1,
            dedup_cache_size: 64,
            ..Self::default()
        }
    }

    /// Tick period.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Reject values the poll loop cannot run with.
    pub fn validate(&self) -> Result<(), ReconcilerError> {
        if self.poll_interval_secs == 0 {
            return Err(ReconcilerError::InvalidConfig(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.event_name.trim().is_empty() {
            return Err(ReconcilerError::InvalidConfig(
                "event_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
