//! # qc-04-state-management
//!
//! Genesis state commitment for Quantum-Chain.
//!
//! ## Role in System
//!
//! - **State Commitment Builder**: turns the genesis account map into a single
//!   Keccak-256 state root
//! - **Patricia Merkle Trie**: secure (key-hashed) trie, identical node
//!   encoding on every node of the network
//! - **Account Map Decoding**: reads the `accounts` section of a chain
//!   configuration document
//!
//! ## Flow
//!
//! ```text
//! accounts JSON ──AccountMapDecoder──→ AccountMap
//!                                         │
//!                                         ↓
//!                     commit_state(AccountMap, TrieCollaborator)
//!                                         │
//!                                         ↓
//!                                    state root
//! ```
//!
//! The trie is consumed through the `TrieCollaborator` port, so chain
//! initialization code can plug in its own trie; `SecureTrie` over an
//! `InMemoryTrieDb` is the default.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
