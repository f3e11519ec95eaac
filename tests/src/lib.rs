//! # ChainSign Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── submission_flow.rs   # sequence -> encoder -> wallet -> gateway
//! │   └── sync_flow.rs         # gateway -> reconciler -> subscribers
//! └── benches/                 # encoder and selector throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p chainsign-tests
//! cargo test -p chainsign-tests integration::sync_flow
//! cargo bench -p chainsign-tests
//! ```

pub mod integration;
