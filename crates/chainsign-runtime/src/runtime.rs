//! # ChainSign Runtime
//!
//! Owns the gateway and the reconciler built on top of it, plus the
//! shutdown channel shared by long-running commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use cs_03_ledger_gateway::{JsonRpcLedgerClient, LedgerGateway, LedgerRpc};
use cs_04_event_reconciler::EventReconciler;
use shared_types::ChainEvent;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::RuntimeConfig;

/// The runtime wiring one ledger node to one reconciler.
pub struct ChainSignRuntime<R: LedgerRpc + 'static> {
    gateway: Arc<LedgerGateway<R>>,
    reconciler: EventReconciler<LedgerGateway<R>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl ChainSignRuntime<JsonRpcLedgerClient> {
    /// Build against the configured JSON-RPC endpoint.
    pub fn connect(config: &RuntimeConfig) -> Result<Self> {
        let rpc = Arc::new(JsonRpcLedgerClient::from_config(&config.gateway));
        info!(rpc_url = %rpc.rpc_url(), "[chainsign] Using JSON-RPC endpoint");
        Self::new(config, rpc)
    }
}

impl<R: LedgerRpc + 'static> ChainSignRuntime<R> {
    /// Build on an arbitrary ledger RPC.
    pub fn new(config: &RuntimeConfig, rpc: Arc<R>) -> Result<Self> {
        let gateway = Arc::new(
            LedgerGateway::new(config.gateway.clone(), rpc)
                .context("Failed to create ledger gateway")?,
        );
        let reconciler = EventReconciler::new(Arc::clone(&gateway), config.reconciler.clone())
            .context("Failed to create event reconciler")?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            gateway,
            reconciler,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Ledger gateway.
    pub fn gateway(&self) -> &Arc<LedgerGateway<R>> {
        &self.gateway
    }

    /// Event reconciler.
    pub fn reconciler(&self) -> &EventReconciler<LedgerGateway<R>> {
        &self.reconciler
    }

    /// Stream events to `on_event` until [`shutdown`](Self::shutdown).
    ///
    /// Fails early if the node cannot report its head block.
    pub async fn watch<F>(&self, on_event: F) -> Result<()>
    where
        F: Fn(&ChainEvent) + Send + Sync + 'static,
    {
        let head = self
            .gateway
            .latest_block()
            .await
            .context("Failed to reach the ledger node")?;
        info!(
            head = head.block_number,
            contract = %self.gateway.contract_address(),
            event = %self.reconciler.config().event_name,
            "[chainsign] Watching contract events"
        );

        let subscription = self.reconciler.subscribe(on_event);
        let mut shutdown = self.shutdown_rx.clone();
        // The sender lives in `self`, so this only returns once shutdown is set.
        let _ = shutdown.wait_for(|stop| *stop).await;
        let watermark = self.reconciler.watermark();
        subscription.unsubscribe();

        info!(watermark = ?watermark, "[chainsign] Watch stopped");
        Ok(())
    }

    /// Signal long-running commands to stop.
    pub fn shutdown(&self) {
        debug!("[chainsign] Shutdown requested");
        self.shutdown_tx.send_replace(true);
    }
}

/// Default `watch` callback: one log line per event.
pub fn log_event(event: &ChainEvent) {
    info!(
        doc_id = %event.doc_id,
        creator = %event.creator,
        block = event.block_number,
        tx_hash = %event.transaction_hash,
        "[chainsign] Document sent"
    );
}
