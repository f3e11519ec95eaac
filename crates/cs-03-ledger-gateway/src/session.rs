//! # Session
//!
//! Holds the identity binder and the lazily built contract-call handle.
//! The handle is keyed on the binder's generation, so any new bind or
//! clear invalidates it.

use cs_01_identity_binder::{ContractCall, Identity, IdentityBinder, IdentityError, SignerError};
use shared_types::{Calldata, ContractAddress, TransactionHandle};
use tracing::debug;

use crate::domain::GatewayError;

/// Contract-call handle bound to one identity.
#[derive(Clone, Debug)]
pub struct ContractHandle {
    contract_address: ContractAddress,
    identity: Identity,
    generation: u64,
}

impl ContractHandle {
    /// Contract this handle targets.
    pub fn contract_address(&self) -> ContractAddress {
        self.contract_address
    }

    /// Account that signs through this handle.
    pub fn account_address(&self) -> ContractAddress {
        self.identity.address
    }

    /// Sign and submit one entry-point invocation.
    pub async fn invoke(
        &self,
        entrypoint: &str,
        calldata: Calldata,
    ) -> Result<TransactionHandle, SignerError> {
        let call = ContractCall::new(self.contract_address, entrypoint, calldata);
        self.identity.signer.execute(&call).await
    }
}

/// Per-user session: identity state plus the derived contract handle.
pub struct Session {
    binder: IdentityBinder,
    handle: Option<ContractHandle>,
}

impl Session {
    /// Create a session around a binder.
    pub fn new(binder: IdentityBinder) -> Self {
        Self {
            binder,
            handle: None,
        }
    }

    /// Bind (or return the cached) identity.
    pub async fn connect(&mut self) -> Result<Identity, IdentityError> {
        self.binder.bind().await
    }

    /// Drop the identity and the contract handle.
    pub fn disconnect(&mut self) {
        self.binder.clear();
        self.handle = None;
    }

    /// Bound identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.binder.identity()
    }

    /// True once an identity is bound.
    pub fn is_bound(&self) -> bool {
        self.binder.identity().is_some()
    }

    /// Identity binder.
    pub fn binder(&self) -> &IdentityBinder {
        &self.binder
    }

    /// Identity binder, mutable.
    pub fn binder_mut(&mut self) -> &mut IdentityBinder {
        &mut self.binder
    }

    /// Contract handle for `contract`, rebuilt if the identity changed.
    pub fn contract_handle(
        &mut self,
        contract: ContractAddress,
    ) -> Result<ContractHandle, GatewayError> {
        let identity = self.binder.identity().ok_or(GatewayError::NotBound)?;
        let generation = self.binder.generation();

        let current = self.handle.as_ref().filter(|h| {
            h.generation == generation
                && h.contract_address == contract
                && h.identity.same_as(identity)
        });
        if let Some(handle) = current {
            return Ok(handle.clone());
        }

        debug!(
            "[cs-03] Building contract handle for {} as {}",
            contract, identity.address
        );
        let handle = ContractHandle {
            contract_address: contract,
            identity: identity.clone(),
            generation,
        };
        self.handle = Some(handle.clone());
        Ok(handle)
    }
}
