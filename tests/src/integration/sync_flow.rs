//! # Synchronization Flow
//!
//! The reconciler polls through the real gateway, which pages
//! `starknet_getEvents` against the mock node:
//!
//! ```text
//! MockLedgerRpc ──getEvents (chunked)──→ LedgerGateway ──→ EventReconciler ──→ subscribers
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;

    use chainsign_runtime::{ChainSignRuntime, RuntimeConfig};
    use cs_03_ledger_gateway::{GatewayConfig, LedgerGateway, LedgerRpcError, MockLedgerRpc};
    use cs_04_event_reconciler::{EventReconciler, PollOutcome, ReconcilerConfig};
    use cs_telemetry::TelemetryConfig;
    use shared_types::{get_selector_from_name, ChainEvent, ContractAddress, Felt, RawEvent};

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn sent(contract: ContractAddress, block: u64, doc: u64) -> RawEvent {
        RawEvent {
            from_address: contract.felt(),
            keys: vec![get_selector_from_name("DocumentSent")],
            data: vec![Felt::from(doc), Felt::from(0xa11ceu64)],
            block_hash: None,
            block_number: Some(block),
            transaction_hash: Felt::from(doc + 0x1000),
        }
    }

    fn signed(contract: ContractAddress, block: u64, doc: u64) -> RawEvent {
        RawEvent {
            keys: vec![get_selector_from_name("DocumentSigned")],
            ..sent(contract, block, doc)
        }
    }

    type Seen = Arc<Mutex<Vec<ChainEvent>>>;

    struct Harness {
        rpc: Arc<MockLedgerRpc>,
        contract: ContractAddress,
        reconciler: EventReconciler<LedgerGateway<MockLedgerRpc>>,
    }

    fn harness(start_block: Option<u64>) -> Harness {
        let rpc = Arc::new(MockLedgerRpc::new());
        let gateway =
            Arc::new(LedgerGateway::new(GatewayConfig::for_testing(), Arc::clone(&rpc)).unwrap());
        let contract = gateway.contract_address();
        let config = ReconcilerConfig {
            start_block,
            ..ReconcilerConfig::for_testing()
        };
        let reconciler = EventReconciler::new(gateway, config).unwrap();
        Harness {
            rpc,
            contract,
            reconciler,
        }
    }

    fn collector() -> (Seen, impl Fn(&ChainEvent) + Send + Sync + 'static) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |event: &ChainEvent| sink.lock().push(event.clone()))
    }

    fn doc_ids(seen: &Seen) -> Vec<String> {
        seen.lock().iter().map(|e| e.doc_id.clone()).collect()
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    // =========================================================================
    // TESTS
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_backfill_spans_multiple_pages() {
        let h = harness(Some(10));
        for doc in 1..=5 {
            h.rpc.push_event(sent(h.contract, 10 + doc, doc));
        }
        h.rpc.set_latest_block(20);

        let (seen, callback) = collector();
        let _subscription = h.reconciler.subscribe(callback);
        settle().await;

        assert_eq!(doc_ids(&seen), vec!["0x1", "0x2", "0x3", "0x4", "0x5"]);
        assert_eq!(h.reconciler.watermark(), Some(20));
        // Chunk size 2 needs three pages, the later two carrying a token.
        let filters = h.rpc.filters();
        assert_eq!(filters.len(), 3);
        assert!(filters[0].continuation_token.is_none());
        assert!(filters[2].continuation_token.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_boundary_block_is_not_emitted_twice() {
        let h = harness(Some(10));
        h.rpc.push_event(sent(h.contract, 12, 1));
        h.rpc.set_latest_block(12);

        let (seen, callback) = collector();
        let _subscription = h.reconciler.subscribe(callback);
        settle().await;
        assert_eq!(doc_ids(&seen), vec!["0x1"]);

        // Block 12 is re-read as the lower bound of the next range.
        h.rpc.push_event(sent(h.contract, 12, 2));
        h.rpc.push_event(sent(h.contract, 13, 3));
        h.rpc.set_latest_block(13);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(doc_ids(&seen), vec!["0x1", "0x2", "0x3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_events_are_filtered_out() {
        let h = harness(Some(0));
        h.rpc.push_event(signed(h.contract, 3, 1));
        h.rpc.push_event(sent(h.contract, 4, 2));
        h.rpc.set_latest_block(5);

        let (seen, callback) = collector();
        let _subscription = h.reconciler.subscribe(callback);
        settle().await;

        assert_eq!(doc_ids(&seen), vec!["0x2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_node_outage_then_recovery_loses_nothing() {
        let h = harness(None);
        h.rpc.set_latest_block(50);

        let (seen, callback) = collector();
        let _subscription = h.reconciler.subscribe(callback);
        settle().await;
        assert_eq!(h.reconciler.watermark(), Some(50));

        h.rpc.push_event(sent(h.contract, 51, 9));
        h.rpc.set_latest_block(51);
        h.rpc.fail_with(LedgerRpcError::Transport("connection reset".to_string()));
        assert_eq!(h.reconciler.poll_now().await, PollOutcome::Failed);
        assert_eq!(h.reconciler.watermark(), Some(50));

        h.rpc.recover();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(doc_ids(&seen), vec!["0x9"]);
        assert_eq!(h.reconciler.watermark(), Some(51));
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_subscriber_sees_the_same_order() {
        let h = harness(Some(0));
        for doc in 1..=3 {
            h.rpc.push_event(sent(h.contract, doc, doc));
        }
        h.rpc.set_latest_block(3);

        let (first, first_cb) = collector();
        let (second, second_cb) = collector();
        let _a = h.reconciler.subscribe(first_cb);
        let _b = h.reconciler.subscribe(second_cb);
        settle().await;

        assert_eq!(doc_ids(&first), vec!["0x1", "0x2", "0x3"]);
        assert_eq!(doc_ids(&first), doc_ids(&second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_runtime_watch_over_mock_node() {
        let rpc = Arc::new(MockLedgerRpc::new());
        rpc.set_latest_block(7);
        let config = RuntimeConfig {
            gateway: GatewayConfig::for_testing(),
            reconciler: ReconcilerConfig::for_testing(),
            telemetry: TelemetryConfig::for_testing(),
        };
        let runtime = Arc::new(ChainSignRuntime::new(&config, Arc::clone(&rpc)).unwrap());
        let contract = runtime.gateway().contract_address();

        let (seen, callback) = collector();
        let task = {
            let runtime = Arc::clone(&runtime);
            tokio::spawn(async move { runtime.watch(callback).await })
        };
        settle().await;

        rpc.push_event(sent(contract, 8, 0x77));
        rpc.set_latest_block(8);
        tokio::time::sleep(Duration::from_secs(1)).await;

        runtime.shutdown();
        task.await.unwrap().unwrap();
        assert_eq!(doc_ids(&seen), vec!["0x77"]);
        assert_eq!(runtime.reconciler().subscriber_count(), 0);
    }
}
