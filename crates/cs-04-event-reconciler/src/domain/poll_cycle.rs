//! # Poll Cycle
//!
//! State of one reconciler session: the Idle/Polling flag, the watermark
//! and the set of recently delivered events.

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use shared_types::{get_selector_from_name, BlockNumber, ChainEvent, Felt, RawEvent};
use tracing::debug;

use crate::config::ReconcilerConfig;

/// Poll state. `Polling` is the only mutual exclusion between polls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollState {
    /// No poll in flight
    Idle,
    /// A poll is in flight
    Polling,
}

/// Last block fully processed. Never decreases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollWatermark {
    /// Block number; zero before the first successful poll.
    pub last_observed_block: BlockNumber,
}

impl PollWatermark {
    /// Move forward to `block`; lower values are ignored.
    pub fn advance(&mut self, block: BlockNumber) {
        self.last_observed_block = self.last_observed_block.max(block);
    }
}

/// What a poll should read once the latest block is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollPlan {
    /// Nothing new; the cycle is back to `Idle`.
    UpToDate,
    /// Read events over `[from, to]`.
    Read {
        /// First block (inclusive)
        from: BlockNumber,
        /// Latest block (inclusive)
        to: BlockNumber,
    },
}

/// Result of one poll attempt, also used as the metrics label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// No active session.
    Inactive,
    /// Tick arrived while a poll was in flight.
    Skipped,
    /// Latest block equals the watermark.
    NoNewBlocks,
    /// Events read and delivered; watermark moved to `to`.
    Advanced {
        /// First block read
        from: BlockNumber,
        /// New watermark
        to: BlockNumber,
        /// Events delivered
        emitted: usize,
    },
    /// Source failed; watermark unchanged.
    Failed,
    /// Session torn down while the poll was in flight.
    Discarded,
}

impl PollOutcome {
    /// Metrics label.
    pub fn label(&self) -> &'static str {
        match self {
            PollOutcome::Inactive => "inactive",
            PollOutcome::Skipped => "skipped",
            PollOutcome::NoNewBlocks => "no_new_blocks",
            PollOutcome::Advanced { .. } => "advanced",
            PollOutcome::Failed => "failed",
            PollOutcome::Discarded => "discarded",
        }
    }
}

/// Per-session poll state machine.
pub struct PollCycle {
    state: PollState,
    watermark: PollWatermark,
    start_block: Option<BlockNumber>,
    selector: Option<Felt>,
    seen: LruCache<ChainEvent, ()>,
}

impl PollCycle {
    /// Fresh session: `Idle`, watermark zero, nothing seen.
    pub fn new(config: &ReconcilerConfig) -> Self {
        let capacity = NonZeroUsize::new(config.dedup_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: PollState::Idle,
            watermark: PollWatermark::default(),
            start_block: config.start_block,
            selector: config
                .verify_event_selector
                .then(|| get_selector_from_name(&config.event_name)),
            seen: LruCache::new(capacity),
        }
    }

    /// Current state.
    pub fn state(&self) -> PollState {
        self.state
    }

    /// Current watermark.
    pub fn watermark(&self) -> BlockNumber {
        self.watermark.last_observed_block
    }

    /// Enter `Polling`. Returns false if a poll is already in flight.
    pub fn try_begin(&mut self) -> bool {
        if self.state == PollState::Polling {
            return false;
        }
        self.state = PollState::Polling;
        true
    }

    /// Decide the read range for `latest`.
    ///
    /// A node reporting a block at or below a nonzero watermark is treated
    /// as "nothing new", so the watermark never moves backwards.
    pub fn plan(&mut self, latest: BlockNumber) -> PollPlan {
        let last = self.watermark.last_observed_block;
        if latest == last || (last != 0 && latest < last) {
            self.state = PollState::Idle;
            return PollPlan::UpToDate;
        }
        let from = if last != 0 {
            last
        } else {
            self.start_block.unwrap_or(latest)
        };
        PollPlan::Read { from, to: latest }
    }

    /// Normalize, verify and deduplicate raw events, keeping ledger order.
    pub fn accept(&mut self, raw: Vec<RawEvent>) -> Vec<ChainEvent> {
        let mut fresh = Vec::with_capacity(raw.len());
        for event in raw {
            if let Some(selector) = self.selector {
                if event.keys.first() != Some(&selector) {
                    debug!(
                        tx_hash = %event.transaction_hash,
                        "[cs-04] Dropping event with unexpected selector"
                    );
                    continue;
                }
            }
            let Some(normalized) = ChainEvent::from_raw(&event) else {
                debug!(
                    tx_hash = %event.transaction_hash,
                    fields = event.data.len(),
                    "[cs-04] Dropping event with short payload"
                );
                continue;
            };
            if self.seen.put(normalized.clone(), ()).is_none() {
                fresh.push(normalized);
            }
        }
        fresh
    }

    /// Successful poll: advance to `latest` and return to `Idle`.
    pub fn complete(&mut self, latest: BlockNumber) {
        self.watermark.advance(latest);
        self.state = PollState::Idle;
    }

    /// Failed poll: back to `Idle`, watermark untouched.
    pub fn abort(&mut self) {
        self.state = PollState::Idle;
    }
}
