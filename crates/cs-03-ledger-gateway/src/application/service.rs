//! # Ledger Gateway Service
//!
//! Document lifecycle writes through the session's identity, plus the
//! read side used by the event reconciler.

use std::collections::HashSet;
use std::sync::Arc;

use cs_01_identity_binder::SignerError;
use cs_02_transaction_encoder::{EncoderConfig, TransactionEncoder};
use cs_telemetry::{log_ledger_event, LEDGER_WRITES};
use shared_types::{
    get_selector_from_name, BlockNumber, Calldata, ContractAddress, DocumentSubmission, Felt,
    RawEvent, TransactionHandle,
};
use tracing::{debug, error};

use crate::config::GatewayConfig;
use crate::domain::{BlockId, BlockRef, EventFilter, FunctionCall, GatewayError, LedgerRpcError};
use crate::ports::LedgerRpc;
use crate::session::Session;

/// State-changing entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WriteOp {
    Submit,
    Sign,
    Decline,
}

impl WriteOp {
    fn label(self) -> &'static str {
        match self {
            WriteOp::Submit => "submit",
            WriteOp::Sign => "sign",
            WriteOp::Decline => "decline",
        }
    }

    fn entrypoint(self, config: &GatewayConfig) -> &str {
        match self {
            WriteOp::Submit => &config.submit_entrypoint,
            WriteOp::Sign => &config.sign_entrypoint,
            WriteOp::Decline => &config.decline_entrypoint,
        }
    }

    fn failure(self, cause: SignerError) -> GatewayError {
        match self {
            WriteOp::Submit => GatewayError::SubmissionFailed(cause),
            WriteOp::Sign => GatewayError::SigningFailed(cause),
            WriteOp::Decline => GatewayError::DeclineFailed(cause),
        }
    }
}

/// Ledger Gateway - the only component that talks to the ledger.
pub struct LedgerGateway<R: LedgerRpc> {
    config: GatewayConfig,
    contract: ContractAddress,
    rpc: Arc<R>,
    encoder: TransactionEncoder,
}

impl<R: LedgerRpc> LedgerGateway<R> {
    /// Create a gateway; fails if the config does not validate.
    pub fn new(config: GatewayConfig, rpc: Arc<R>) -> Result<Self, GatewayError> {
        let contract = config.validate()?;
        Ok(Self {
            config,
            contract,
            rpc,
            encoder: TransactionEncoder::default(),
        })
    }

    /// Use a specific encoder configuration.
    pub fn with_encoder_config(mut self, config: EncoderConfig) -> Self {
        self.encoder = TransactionEncoder::new(config);
        self
    }

    /// Target contract.
    pub fn contract_address(&self) -> ContractAddress {
        self.contract
    }

    /// Active configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Underlying RPC port.
    pub fn rpc(&self) -> &Arc<R> {
        &self.rpc
    }

    /// Encode and submit a document (`send_document`).
    pub async fn submit(
        &self,
        session: &mut Session,
        submission: &DocumentSubmission,
    ) -> Result<TransactionHandle, GatewayError> {
        let calldata = self.encoder.encode_submission(submission)?;
        self.write(session, WriteOp::Submit, calldata).await
    }

    /// Sign a document (`sign_document`).
    pub async fn sign(
        &self,
        session: &mut Session,
        doc_id: &str,
    ) -> Result<TransactionHandle, GatewayError> {
        let calldata = self.encoder.encode_sign_action(doc_id)?;
        self.write(session, WriteOp::Sign, calldata).await
    }

    /// Decline a document (`decline_document`).
    pub async fn decline(
        &self,
        session: &mut Session,
        doc_id: &str,
    ) -> Result<TransactionHandle, GatewayError> {
        let calldata = self.encoder.encode_sign_action(doc_id)?;
        self.write(session, WriteOp::Decline, calldata).await
    }

    async fn write(
        &self,
        session: &mut Session,
        op: WriteOp,
        calldata: Calldata,
    ) -> Result<TransactionHandle, GatewayError> {
        let handle = session.contract_handle(self.contract)?;
        let entrypoint = op.entrypoint(&self.config);

        match handle.invoke(entrypoint, calldata).await {
            Ok(tx) => {
                LEDGER_WRITES.with_label_values(&[op.label(), "accepted"]).inc();
                log_ledger_event!(
                    info,
                    "cs-03",
                    "Ledger write accepted",
                    tx.transaction_hash,
                    operation = op.label(),
                    account = %handle.account_address()
                );
                Ok(tx)
            }
            Err(cause) => {
                LEDGER_WRITES.with_label_values(&[op.label(), "failed"]).inc();
                error!(
                    operation = op.label(),
                    "[cs-03] Ledger write failed: {}", cause
                );
                Err(op.failure(cause))
            }
        }
    }

    /// Read-only `get_document` call.
    pub async fn get_document(&self, doc_id: &str) -> Result<Vec<Felt>, GatewayError> {
        let calldata = self.encoder.encode_sign_action(doc_id)?;
        let request = FunctionCall {
            contract_address: self.contract,
            entry_point_selector: get_selector_from_name(&self.config.get_document_entrypoint),
            calldata,
        };
        self.rpc
            .call(&request, BlockId::Latest)
            .await
            .map_err(GatewayError::ReadFailed)
    }

    /// Latest accepted block.
    pub async fn latest_block(&self) -> Result<BlockRef, GatewayError> {
        self.rpc
            .block_hash_and_number()
            .await
            .map_err(GatewayError::ReadFailed)
    }

    /// All `event_name` events over `[from, to]`, in ledger order.
    ///
    /// Follows continuation tokens until the node reports no further page.
    /// A token seen twice in one read means the node is cycling; the read
    /// fails with `ReadFailed` instead of looping.
    pub async fn read_events(
        &self,
        from: BlockNumber,
        to: BlockNumber,
        event_name: &str,
    ) -> Result<Vec<RawEvent>, GatewayError> {
        if from > to {
            return Ok(Vec::new());
        }

        let selector = get_selector_from_name(event_name);
        let mut filter =
            EventFilter::range(self.contract, selector, from, to, self.config.events_chunk_size);
        let mut events = Vec::new();
        let mut pages = 0usize;
        let mut seen_tokens = HashSet::new();

        loop {
            let page = self
                .rpc
                .get_events(&filter)
                .await
                .map_err(GatewayError::ReadFailed)?;
            pages += 1;
            events.extend(page.events);

            match page.continuation_token {
                Some(token) => {
                    if !seen_tokens.insert(token.clone()) {
                        return Err(GatewayError::ReadFailed(LedgerRpcError::Decode(format!(
                            "continuation token {} repeated after {} pages",
                            token, pages
                        ))));
                    }
                    filter.continuation_token = Some(token);
                }
                None => break,
            }
        }

        debug!(
            from,
            to,
            pages,
            count = events.len(),
            "[cs-03] Read {} events",
            event_name
        );
        Ok(events)
    }
}
