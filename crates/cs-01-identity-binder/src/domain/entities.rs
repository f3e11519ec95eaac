//! # Domain Entities
//!
//! The bound signing identity.

use std::fmt;
use std::sync::Arc;

use shared_types::ContractAddress;

use crate::ports::AccountSigner;

/// Address plus signing capability, produced by a successful bind.
///
/// Cloning shares the same signer capability.
#[derive(Clone)]
pub struct Identity {
    /// Account address, validated.
    pub address: ContractAddress,
    /// Signing capability handed out by the wallet.
    pub signer: Arc<dyn AccountSigner>,
    /// Name of the wallet extension that produced this identity.
    pub wallet: String,
}

impl Identity {
    /// Create a new identity.
    pub fn new(address: ContractAddress, signer: Arc<dyn AccountSigner>, wallet: impl Into<String>) -> Self {
        Self {
            address,
            signer,
            wallet: wallet.into(),
        }
    }

    /// True if both identities share the address and the very same signer.
    pub fn same_as(&self, other: &Identity) -> bool {
        self.address == other.address && Arc::ptr_eq(&self.signer, &other.signer)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("address", &self.address)
            .field("wallet", &self.wallet)
            .finish_non_exhaustive()
    }
}
