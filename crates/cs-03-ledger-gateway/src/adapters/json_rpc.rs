//! JSON-RPC client for a Starknet-compatible ledger node.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared_types::Felt;
use tracing::trace;

use crate::config::GatewayConfig;
use crate::domain::{BlockId, BlockRef, EventFilter, EventsPage, FunctionCall, LedgerRpcError};
use crate::ports::LedgerRpc;

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

/// JSON-RPC response structure.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcErrorObject>,
}

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

/// Params of `starknet_getEvents`.
#[derive(Debug, Serialize)]
struct GetEventsParams<'a> {
    filter: &'a EventFilter,
}

/// Params of `starknet_call`.
#[derive(Debug, Serialize)]
struct CallParams<'a> {
    request: &'a FunctionCall,
    block_id: BlockId,
}

/// `LedgerRpc` over HTTP.
pub struct JsonRpcLedgerClient {
    http_client: reqwest::Client,
    rpc_url: String,
    request_id: AtomicU64,
}

impl JsonRpcLedgerClient {
    /// Create a client with the given request timeout.
    pub fn new(rpc_url: impl Into<String>, timeout_secs: u64) -> Self {
        // reqwest::Client::new() is infallible; fall back to it if the builder fails
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            rpc_url: rpc_url.into(),
            request_id: AtomicU64::new(1),
        }
    }

    /// Create a client from gateway config.
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(config.rpc_url.clone(), config.request_timeout_secs)
    }

    /// Endpoint URL.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn request<P: Serialize + Send, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, LedgerRpcError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };
        trace!(method, id, "[cs-03] RPC request");

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LedgerRpcError::Transport(e.to_string()))?;

        let rpc_response: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| LedgerRpcError::Decode(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(LedgerRpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        rpc_response
            .result
            .ok_or_else(|| LedgerRpcError::MissingResult(method.to_string()))
    }
}

#[async_trait]
impl LedgerRpc for JsonRpcLedgerClient {
    async fn block_hash_and_number(&self) -> Result<BlockRef, LedgerRpcError> {
        self.request("starknet_blockHashAndNumber", Vec::<()>::new())
            .await
    }

    async fn get_events(&self, filter: &EventFilter) -> Result<EventsPage, LedgerRpcError> {
        self.request("starknet_getEvents", GetEventsParams { filter })
            .await
    }

    async fn call(&self, request: &FunctionCall, block: BlockId) -> Result<Vec<Felt>, LedgerRpcError> {
        self.request(
            "starknet_call",
            CallParams {
                request,
                block_id: block,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: "starknet_blockHashAndNumber",
            params: Vec::<()>::new(),
            id: 1,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "method": "starknet_blockHashAndNumber", "params": [], "id": 1})
        );
    }

    #[test]
    fn test_call_params_serialization() {
        let request = FunctionCall {
            contract_address: format!("0x{:0>64}", "c0ffee").parse().unwrap(),
            entry_point_selector: Felt::from(0x5u64),
            calldata: vec![Felt::from(7u64)],
        };
        let value = serde_json::to_value(CallParams {
            request: &request,
            block_id: BlockId::Latest,
        })
        .unwrap();
        assert_eq!(value["block_id"], json!("latest"));
        assert_eq!(value["request"]["calldata"], json!(["0x7"]));
        assert_eq!(value["request"]["entry_point_selector"], json!("0x5"));
    }

    #[test]
    fn test_response_with_error_object() {
        let response: JsonRpcResponse<BlockRef> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 32, "message": "There are no blocks"}
        }))
        .unwrap();
        assert!(response.result.is_none());
        assert_eq!(response.error.map(|e| e.code), Some(32));
    }

    #[test]
    fn test_response_with_block_ref() {
        let response: JsonRpcResponse<BlockRef> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"block_hash": "0x1f", "block_number": 812345}
        }))
        .unwrap();
        let block = response.result.unwrap();
        assert_eq!(block.block_number, 812345);
        assert_eq!(block.block_hash, Felt::from(0x1fu64));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = JsonRpcLedgerClient::new("http://127.0.0.1:9/rpc", 1);
        let err = client.block_hash_and_number().await.unwrap_err();
        assert!(matches!(err, LedgerRpcError::Transport(_)));
    }
}
