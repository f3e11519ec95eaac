//! # Identity Binder Service
//!
//! Performs the wallet handshake once and caches the resulting identity
//! until `clear()` is called.

use std::sync::Arc;

use cs_telemetry::IDENTITY_BINDS;
use shared_types::{parse_address, ContractAddress};
use tracing::{debug, info, warn};

use crate::domain::{Identity, IdentityError};
use crate::ports::{EnableOptions, WalletEnvironment, WalletExtension};

/// Identity Binder - owns the cached signing identity.
///
/// `bind` takes `&mut self`, so at most one handshake can be in flight
/// for a given binder.
pub struct IdentityBinder {
    environment: Arc<dyn WalletEnvironment>,
    options: EnableOptions,
    extension: Option<Arc<dyn WalletExtension>>,
    cached: Option<Identity>,
    /// Bumped on every fresh bind and on clear.
    generation: u64,
}

impl IdentityBinder {
    /// Create a binder over a wallet environment.
    pub fn new(environment: Arc<dyn WalletEnvironment>) -> Self {
        Self::with_options(environment, EnableOptions::default())
    }

    /// Create a binder with explicit handshake options.
    pub fn with_options(environment: Arc<dyn WalletEnvironment>, options: EnableOptions) -> Self {
        Self {
            environment,
            options,
            extension: None,
            cached: None,
            generation: 0,
        }
    }

    /// Bind a signing identity, prompting the wallet only if none is cached.
    ///
    /// On failure nothing is cached and a later call retries from scratch.
    pub async fn bind(&mut self) -> Result<Identity, IdentityError> {
        if let Some(identity) = &self.cached {
            debug!("[cs-01] Returning cached identity {}", identity.address);
            IDENTITY_BINDS.with_label_values(&["cached"]).inc();
            return Ok(identity.clone());
        }

        let result = self.handshake().await;
        let outcome = match &result {
            Ok(_) => "bound",
            Err(IdentityError::WalletUnavailable) => "unavailable",
            Err(IdentityError::InvalidAddress { .. }) => "invalid_address",
            Err(_) => "rejected",
        };
        IDENTITY_BINDS.with_label_values(&[outcome]).inc();
        result
    }

    async fn handshake(&mut self) -> Result<Identity, IdentityError> {
        let extension = self.environment.discover().ok_or_else(|| {
            warn!("[cs-01] No wallet extension available");
            IdentityError::WalletUnavailable
        })?;

        debug!("[cs-01] Enabling wallet '{}'", extension.name());
        extension.enable(self.options).await.map_err(|e| {
            warn!("[cs-01] Wallet '{}' handshake failed: {}", extension.name(), e);
            IdentityError::UserRejected(e.to_string())
        })?;

        let raw_address = extension.selected_address().ok_or_else(|| {
            IdentityError::UserRejected("wallet returned no account address".to_string())
        })?;
        let signer = extension.signer().ok_or_else(|| {
            IdentityError::UserRejected("wallet returned no signing capability".to_string())
        })?;

        let address = parse_address(&raw_address).map_err(|source| {
            warn!("[cs-01] Wallet returned malformed address {}", raw_address);
            IdentityError::InvalidAddress {
                address: raw_address.clone(),
                source,
            }
        })?;

        let identity = Identity::new(address, signer, extension.name());
        info!(
            "[cs-01] Bound identity {} via '{}'",
            identity.address, identity.wallet
        );

        self.extension = Some(extension);
        self.cached = Some(identity.clone());
        self.generation += 1;
        Ok(identity)
    }

    /// Forget the cached identity; the next `bind` prompts again.
    pub fn clear(&mut self) {
        if self.cached.take().is_some() {
            info!("[cs-01] Cleared cached identity");
            self.generation += 1;
        }
        self.extension = None;
    }

    /// Cached identity, if bound.
    pub fn identity(&self) -> Option<&Identity> {
        self.cached.as_ref()
    }

    /// Address of the cached identity, if bound.
    pub fn account_address(&self) -> Option<ContractAddress> {
        self.cached.as_ref().map(|i| i.address)
    }

    /// True if an identity is cached and its extension still reports a connection.
    pub fn is_connected(&self) -> bool {
        self.cached.is_some()
            && self
                .extension
                .as_ref()
                .map(|e| e.is_connected())
                .unwrap_or(false)
    }

    /// Changes whenever the cached identity is replaced or cleared.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
