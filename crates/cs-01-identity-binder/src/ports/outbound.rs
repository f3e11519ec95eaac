//! # Outbound Ports (Driven Ports)
//!
//! What the binder needs from its host: a way to discover a wallet, the
//! wallet's enable handshake, and the signer it yields.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{get_selector_from_name, Calldata, ContractAddress, Felt, TransactionHandle};
use thiserror::Error;

/// Errors raised by a wallet extension during the handshake.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// User dismissed or denied the connection prompt.
    #[error("user declined the connection request")]
    Declined,

    /// Extension-internal failure.
    #[error("wallet extension failure: {0}")]
    Extension(String),
}

/// Errors raised by a signer when executing a call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
    /// User refused to sign.
    #[error("signature request rejected: {0}")]
    Rejected(String),

    /// Ledger refused or could not be reached.
    #[error("submission failed: {0}")]
    Submission(String),
}

/// Handshake options passed to `enable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnableOptions {
    /// Show the wallet's selection modal.
    pub show_modal: bool,
}

impl Default for EnableOptions {
    fn default() -> Self {
        Self { show_modal: true }
    }
}

/// A single contract invocation to be signed and submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCall {
    /// Target contract
    pub contract_address: ContractAddress,
    /// Entrypoint name, e.g. `send_document`
    pub entrypoint: String,
    /// Encoded arguments
    pub calldata: Calldata,
}

impl ContractCall {
    /// Create a call.
    pub fn new(contract_address: ContractAddress, entrypoint: impl Into<String>, calldata: Calldata) -> Self {
        Self {
            contract_address,
            entrypoint: entrypoint.into(),
            calldata,
        }
    }

    /// Entrypoint selector.
    pub fn selector(&self) -> Felt {
        get_selector_from_name(&self.entrypoint)
    }
}

/// Signing capability handed out by a wallet.
#[async_trait]
pub trait AccountSigner: Send + Sync {
    /// Sign and submit a call, returning the transaction handle.
    async fn execute(&self, call: &ContractCall) -> Result<TransactionHandle, SignerError>;
}

/// A wallet extension present in the environment.
#[async_trait]
pub trait WalletExtension: Send + Sync {
    /// Extension name, for logs.
    fn name(&self) -> &str;

    /// Run the enable handshake; may prompt the user.
    async fn enable(&self, options: EnableOptions) -> Result<(), WalletError>;

    /// Selected account address, as reported by the extension.
    fn selected_address(&self) -> Option<String>;

    /// Signing capability for the selected account.
    fn signer(&self) -> Option<Arc<dyn AccountSigner>>;

    /// Whether the extension currently reports a live connection.
    fn is_connected(&self) -> bool;
}

/// Host environment that may expose a wallet extension.
pub trait WalletEnvironment: Send + Sync {
    /// Discover a compatible extension, if any.
    fn discover(&self) -> Option<Arc<dyn WalletExtension>>;
}

// =============================================================================
// Mock implementations for testing
// =============================================================================

/// Mock signer that records every call it executes.
#[derive(Default)]
pub struct MockSigner {
    calls: Mutex<Vec<ContractCall>>,
    next_hash: AtomicU64,
    reject_with: Mutex<Option<String>>,
}

impl MockSigner {
    /// Create a signer that accepts every call.
    pub fn new() -> Self {
        Self {
            next_hash: AtomicU64::new(0x1000),
            ..Default::default()
        }
    }

    /// Make subsequent calls fail with `Rejected(reason)`.
    pub fn reject_with(&self, reason: impl Into<String>) {
        *self.reject_with.lock() = Some(reason.into());
    }

    /// Calls executed so far.
    pub fn calls(&self) -> Vec<ContractCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AccountSigner for MockSigner {
    async fn execute(&self, call: &ContractCall) -> Result<TransactionHandle, SignerError> {
        if let Some(reason) = self.reject_with.lock().clone() {
            return Err(SignerError::Rejected(reason));
        }
        self.calls.lock().push(call.clone());
        let hash = self.next_hash.fetch_add(1, Ordering::SeqCst);
        Ok(TransactionHandle::new(Felt::from(hash)))
    }
}

/// Mock wallet extension with scriptable handshake behavior.
pub struct MockWallet {
    name: String,
    address: Mutex<Option<String>>,
    signer: Mutex<Option<Arc<MockSigner>>>,
    decline: AtomicBool,
    connected: AtomicBool,
    enable_calls: AtomicUsize,
}

impl MockWallet {
    /// Wallet that approves the handshake for `address`.
    pub fn approving(address: impl Into<String>) -> Self {
        Self {
            name: "mock-wallet".to_string(),
            address: Mutex::new(Some(address.into())),
            signer: Mutex::new(Some(Arc::new(MockSigner::new()))),
            decline: AtomicBool::new(false),
            connected: AtomicBool::new(false),
            enable_calls: AtomicUsize::new(0),
        }
    }

    /// Wallet whose user declines the handshake.
    pub fn declining() -> Self {
        let wallet = Self::approving(String::new());
        wallet.decline.store(true, Ordering::SeqCst);
        wallet
    }

    /// Change the selected account (simulates an account switch).
    pub fn switch_account(&self, address: impl Into<String>) {
        *self.address.lock() = Some(address.into());
        *self.signer.lock() = Some(Arc::new(MockSigner::new()));
    }

    /// Drop the signer so the handshake yields an address only.
    pub fn without_signer(self) -> Self {
        *self.signer.lock() = None;
        self
    }

    /// Toggle whether the user declines future handshakes.
    pub fn set_declining(&self, decline: bool) {
        self.decline.store(decline, Ordering::SeqCst);
    }

    /// Number of enable handshakes performed.
    pub fn enable_calls(&self) -> usize {
        self.enable_calls.load(Ordering::SeqCst)
    }

    /// The concrete signer, for assertions.
    pub fn mock_signer(&self) -> Option<Arc<MockSigner>> {
        self.signer.lock().clone()
    }
}

#[async_trait]
impl WalletExtension for MockWallet {
    fn name(&self) -> &str {
        &self.name
    }

    async fn enable(&self, _options: EnableOptions) -> Result<(), WalletError> {
        self.enable_calls.fetch_add(1, Ordering::SeqCst);
        if self.decline.load(Ordering::SeqCst) {
            return Err(WalletError::Declined);
        }
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn selected_address(&self) -> Option<String> {
        if !self.connected.load(Ordering::SeqCst) {
            return None;
        }
        self.address.lock().clone().filter(|a| !a.is_empty())
    }

    fn signer(&self) -> Option<Arc<dyn AccountSigner>> {
        if !self.connected.load(Ordering::SeqCst) {
            return None;
        }
        self.signer
            .lock()
            .clone()
            .map(|s| s as Arc<dyn AccountSigner>)
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

/// Mock environment exposing at most one wallet.
#[derive(Default)]
pub struct MockEnvironment {
    wallet: Mutex<Option<Arc<MockWallet>>>,
}

impl MockEnvironment {
    /// Environment with no extension installed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Environment exposing `wallet`.
    pub fn with_wallet(wallet: Arc<MockWallet>) -> Self {
        Self {
            wallet: Mutex::new(Some(wallet)),
        }
    }

    /// Install a wallet after construction.
    pub fn install(&self, wallet: Arc<MockWallet>) {
        *self.wallet.lock() = Some(wallet);
    }
}

impl WalletEnvironment for MockEnvironment {
    fn discover(&self) -> Option<Arc<dyn WalletExtension>> {
        self.wallet
            .lock()
            .clone()
            .map(|w| w as Arc<dyn WalletExtension>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> ContractAddress {
        shared_types::parse_address(&format!("0x{}", "0".repeat(62) + "beef")).unwrap()
    }

    #[tokio::test]
    async fn test_mock_signer_records_calls() {
        let signer = MockSigner::new();
        let call = ContractCall::new(contract(), "sign_document", vec![Felt::from(1u64)]);
        let first = signer.execute(&call).await.unwrap();
        let second = signer.execute(&call).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(signer.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_signer_rejects() {
        let signer = MockSigner::new();
        signer.reject_with("user cancelled");
        let call = ContractCall::new(contract(), "sign_document", vec![]);
        assert!(matches!(
            signer.execute(&call).await,
            Err(SignerError::Rejected(_))
        ));
        assert!(signer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mock_wallet_exposes_nothing_before_enable() {
        let wallet = MockWallet::approving("0x1");
        assert!(wallet.selected_address().is_none());
        assert!(wallet.signer().is_none());
        wallet.enable(EnableOptions::default()).await.unwrap();
        assert_eq!(wallet.selected_address().as_deref(), Some("0x1"));
        assert!(wallet.signer().is_some());
    }

    #[test]
    fn test_call_selector_matches_entrypoint() {
        let call = ContractCall::new(contract(), "transfer", vec![]);
        assert_eq!(
            call.selector().to_hex(),
            "0x83afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e"
        );
    }
}
