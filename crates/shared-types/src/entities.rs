//! # Domain Entities
//!
//! Types that cross subsystem boundaries: the submission handed to the
//! encoder, the raw ledger event and its normalized form, and the handle
//! returned by ledger writes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::felt::Felt;

/// Block height on the ledger.
pub type BlockNumber = u64;

/// Flat, ordered entry-point arguments.
pub type Calldata = Vec<Felt>;

/// A document ready to be encoded and submitted.
///
/// Transient: built right before encoding and never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSubmission {
    /// Human-readable title.
    pub title: String,
    /// Document-type identifier from the catalog.
    pub doc_type_id: String,
    /// Signer wallet addresses in signing order.
    pub signer_addresses: Vec<String>,
    /// Content hash (e.g. an IPFS CID).
    pub content_hash: String,
}

impl DocumentSubmission {
    /// Create a new submission.
    pub fn new(
        title: impl Into<String>,
        doc_type_id: impl Into<String>,
        signer_addresses: Vec<String>,
        content_hash: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            doc_type_id: doc_type_id.into(),
            signer_addresses,
            content_hash: content_hash.into(),
        }
    }
}

/// An event as returned by a ranged ledger query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Emitting contract.
    pub from_address: Felt,
    /// Indexed keys; `keys[0]` is the event selector.
    #[serde(default)]
    pub keys: Vec<Felt>,
    /// Event payload.
    #[serde(default)]
    pub data: Vec<Felt>,
    /// Block hash; absent for pending blocks.
    #[serde(default)]
    pub block_hash: Option<Felt>,
    /// Block number; absent for pending blocks.
    #[serde(default)]
    pub block_number: Option<BlockNumber>,
    /// Emitting transaction.
    pub transaction_hash: Felt,
}

/// A confirmed "document sent" event in domain form.
///
/// Immutable once emitted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainEvent {
    /// On-chain document id.
    pub doc_id: String,
    /// Creator account.
    pub creator: String,
    /// Block that included the event.
    pub block_number: BlockNumber,
    /// Transaction that emitted the event.
    pub transaction_hash: String,
}

impl ChainEvent {
    /// Normalize a raw event: needs at least two data fields and a block.
    pub fn from_raw(raw: &RawEvent) -> Option<Self> {
        if raw.data.len() < 2 {
            return None;
        }
        let block_number = raw.block_number?;
        Some(Self {
            doc_id: raw.data[0].to_hex(),
            creator: raw.data[1].to_hex(),
            block_number,
            transaction_hash: raw.transaction_hash.to_hex(),
        })
    }
}

/// Handle for a transaction accepted by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionHandle {
    /// Transaction hash.
    pub transaction_hash: Felt,
}

impl TransactionHandle {
    /// Create a new handle.
    pub fn new(transaction_hash: Felt) -> Self {
        Self { transaction_hash }
    }
}

impl fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.transaction_hash)
    }
}
