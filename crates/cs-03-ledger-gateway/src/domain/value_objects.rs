//! # Value Objects
//!
//! Request and response shapes of the ledger RPC (`starknet_*` methods).

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use shared_types::{BlockNumber, ContractAddress, Felt, RawEvent};

/// Latest accepted block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    /// Block hash
    pub block_hash: Felt,
    /// Block number
    pub block_number: BlockNumber,
}

/// Block selector for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockId {
    /// Most recent accepted block
    Latest,
    /// Specific height
    Number(BlockNumber),
}

impl Serialize for BlockId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockId::Latest => serializer.serialize_str("latest"),
            BlockId::Number(number) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("block_number", number)?;
                map.end()
            }
        }
    }
}

/// Filter for one `starknet_getEvents` page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventFilter {
    /// First block (inclusive)
    pub from_block: BlockId,
    /// Last block (inclusive)
    pub to_block: BlockId,
    /// Emitting contract
    pub address: ContractAddress,
    /// Key filter; `keys[0]` holds accepted event selectors
    pub keys: Vec<Vec<Felt>>,
    /// Page size
    pub chunk_size: u64,
    /// Token returned by the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

impl EventFilter {
    /// Filter for one selector over `[from, to]`, first page.
    pub fn range(
        address: ContractAddress,
        selector: Felt,
        from: BlockNumber,
        to: BlockNumber,
        chunk_size: u64,
    ) -> Self {
        Self {
            from_block: BlockId::Number(from),
            to_block: BlockId::Number(to),
            address,
            keys: vec![vec![selector]],
            chunk_size,
            continuation_token: None,
        }
    }
}

/// One page of events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsPage {
    /// Events in ledger order
    #[serde(default)]
    pub events: Vec<RawEvent>,
    /// Present when more pages follow
    #[serde(default)]
    pub continuation_token: Option<String>,
}

/// Read-only contract call request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionCall {
    /// Target contract
    pub contract_address: ContractAddress,
    /// Selector of the entry point
    pub entry_point_selector: Felt,
    /// Arguments
    pub calldata: Vec<Felt>,
}
