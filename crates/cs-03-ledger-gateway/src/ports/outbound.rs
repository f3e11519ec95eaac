//! # Outbound Ports (Driven Ports)
//!
//! Read side of the ledger node. Writes go through the identity's
//! `AccountSigner`, not through this port.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{get_selector_from_name, BlockNumber, Felt, RawEvent};

use crate::domain::{BlockId, BlockRef, EventFilter, EventsPage, FunctionCall, LedgerRpcError};

/// Ledger node RPC.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// `starknet_blockHashAndNumber`
    async fn block_hash_and_number(&self) -> Result<BlockRef, LedgerRpcError>;

    /// `starknet_getEvents`, one page.
    async fn get_events(&self, filter: &EventFilter) -> Result<EventsPage, LedgerRpcError>;

    /// `starknet_call`
    async fn call(&self, request: &FunctionCall, block: BlockId) -> Result<Vec<Felt>, LedgerRpcError>;
}

// =============================================================================
// Mock implementation for testing
// =============================================================================

/// In-memory ledger node.
///
/// Events are filtered by block range, address and selector, then paged with
/// numeric continuation tokens.
#[derive(Default)]
pub struct MockLedgerRpc {
    latest: Mutex<Option<BlockRef>>,
    events: Mutex<Vec<RawEvent>>,
    call_results: Mutex<HashMap<Felt, Vec<Felt>>>,
    failure: Mutex<Option<LedgerRpcError>>,
    filters: Mutex<Vec<EventFilter>>,
    latest_calls: AtomicUsize,
}

impl MockLedgerRpc {
    /// Empty ledger with no blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latest accepted block.
    pub fn set_latest_block(&self, number: BlockNumber) {
        *self.latest.lock() = Some(BlockRef {
            block_hash: Felt::from(number + 0xb000),
            block_number: number,
        });
    }

    /// Append an event.
    pub fn push_event(&self, event: RawEvent) {
        self.events.lock().push(event);
    }

    /// Script the result of a read-only call.
    pub fn set_call_result(&self, entrypoint: &str, result: Vec<Felt>) {
        self.call_results
            .lock()
            .insert(get_selector_from_name(entrypoint), result);
    }

    /// Fail every request until `recover` is called.
    pub fn fail_with(&self, error: LedgerRpcError) {
        *self.failure.lock() = Some(error);
    }

    /// Stop failing.
    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    /// Every event filter received, in order.
    pub fn filters(&self) -> Vec<EventFilter> {
        self.filters.lock().clone()
    }

    /// Number of latest-block lookups.
    pub fn latest_calls(&self) -> usize {
        self.latest_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), LedgerRpcError> {
        match self.failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn block_in_range(block: Option<BlockNumber>, from: BlockId, to: BlockId) -> bool {
    let Some(block) = block else {
        return false;
    };
    let after_start = match from {
        BlockId::Number(n) => block >= n,
        BlockId::Latest => true,
    };
    let before_end = match to {
        BlockId::Number(n) => block <= n,
        BlockId::Latest => true,
    };
    after_start && before_end
}

#[async_trait]
impl LedgerRpc for MockLedgerRpc {
    async fn block_hash_and_number(&self) -> Result<BlockRef, LedgerRpcError> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let latest = *self.latest.lock();
        latest.ok_or_else(|| LedgerRpcError::Rpc {
            code: 32,
            message: "There are no blocks".to_string(),
        })
    }

    async fn get_events(&self, filter: &EventFilter) -> Result<EventsPage, LedgerRpcError> {
        self.filters.lock().push(filter.clone());
        self.check_failure()?;

        let selectors = filter.keys.first().cloned().unwrap_or_default();
        let matching: Vec<RawEvent> = self
            .events
            .lock()
            .iter()
            .filter(|e| e.from_address == filter.address.felt())
            .filter(|e| block_in_range(e.block_number, filter.from_block, filter.to_block))
            .filter(|e| {
                selectors.is_empty() || e.keys.first().map_or(false, |k| selectors.contains(k))
            })
            .cloned()
            .collect();

        let offset = match &filter.continuation_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| LedgerRpcError::Rpc {
                    code: 33,
                    message: "The supplied continuation token is invalid or unknown".to_string(),
                })?,
            None => 0,
        };
        let chunk = filter.chunk_size.max(1) as usize;
        let end = (offset + chunk).min(matching.len());
        let events = matching.get(offset..end).map(<[_]>::to_vec).unwrap_or_default();
        let continuation_token = (end < matching.len()).then(|| end.to_string());

        Ok(EventsPage {
            events,
            continuation_token,
        })
    }

    async fn call(&self, request: &FunctionCall, _block: BlockId) -> Result<Vec<Felt>, LedgerRpcError> {
        self.check_failure()?;
        self.call_results
            .lock()
            .get(&request.entry_point_selector)
            .cloned()
            .ok_or_else(|| LedgerRpcError::Rpc {
                code: 21,
                message: "Invalid message selector".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ContractAddress;

    fn contract() -> ContractAddress {
        format!("0x{:0>64}", "c0ffee").parse().unwrap()
    }

    fn event(block: u64, selector: Felt) -> RawEvent {
        RawEvent {
            from_address: contract().felt(),
            keys: vec![selector],
            data: vec![Felt::from(block), Felt::from(1u64)],
            block_hash: None,
            block_number: Some(block),
            transaction_hash: Felt::from(block * 10),
        }
    }

    #[tokio::test]
    async fn test_mock_pages_events() {
        let rpc = MockLedgerRpc::new();
        let selector = get_selector_from_name("DocumentSent");
        for block in 1..=5 {
            rpc.push_event(event(block, selector));
        }

        let mut filter = EventFilter::range(contract(), selector, 2, 5, 3);
        let first = rpc.get_events(&filter).await.unwrap();
        assert_eq!(first.events.len(), 3);
        assert_eq!(first.continuation_token.as_deref(), Some("3"));

        filter.continuation_token = first.continuation_token;
        let second = rpc.get_events(&filter).await.unwrap();
        assert_eq!(second.events.len(), 1);
        assert!(second.continuation_token.is_none());
    }

    #[tokio::test]
    async fn test_mock_filters_by_selector() {
        let rpc = MockLedgerRpc::new();
        rpc.push_event(event(1, get_selector_from_name("DocumentSent")));
        rpc.push_event(event(1, get_selector_from_name("DocumentSigned")));

        let filter = EventFilter::range(contract(), get_selector_from_name("DocumentSent"), 0, 10, 100);
        let page = rpc.get_events(&filter).await.unwrap();
        assert_eq!(page.events.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_failure_and_recovery() {
        let rpc = MockLedgerRpc::new();
        rpc.set_latest_block(4);
        rpc.fail_with(LedgerRpcError::Transport("connection refused".into()));
        tokio_test::assert_err!(rpc.block_hash_and_number().await);

        rpc.recover();
        assert_eq!(rpc.block_hash_and_number().await.unwrap().block_number, 4);
        assert_eq!(rpc.latest_calls(), 2);
    }
}
