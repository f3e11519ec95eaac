//! `LedgerEventSource` backed by the ledger gateway's read side.

use async_trait::async_trait;
use cs_03_ledger_gateway::{LedgerGateway, LedgerRpc};
use shared_types::{BlockNumber, RawEvent};

use crate::domain::ReconcilerError;
use crate::ports::LedgerEventSource;

#[async_trait]
impl<R: LedgerRpc + 'static> LedgerEventSource for LedgerGateway<R> {
    async fn latest_block(&self) -> Result<BlockNumber, ReconcilerError> {
        self.latest_block()
            .await
            .map(|block| block.block_number)
            .map_err(|e| ReconcilerError::Source(e.to_string()))
    }

    async fn events(
        &self,
        from: BlockNumber,
        to: BlockNumber,
        event_name: &str,
    ) -> Result<Vec<RawEvent>, ReconcilerError> {
        self.read_events(from, to, event_name)
            .await
            .map_err(|e| ReconcilerError::Source(e.to_string()))
    }
}
