//! Cross-crate flows over the mock wallet and mock ledger node.

pub mod submission_flow;
pub mod sync_flow;
