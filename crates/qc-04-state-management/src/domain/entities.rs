//! # Domain Entities for State Management
//!
//! Genesis account records and the precompiled contract registry.
//!
//! ## Type Decisions
//!
//! - `balance` / `nonce`: `U256`. Genesis allocations and start nonces are
//!   read from 256-bit hex or decimal text and encoded as minimal big-endian
//!   integers, so narrower types would silently truncate configuration.
//! - `storage`: `BTreeMap` for stable iteration; trie roots do not depend on
//!   it, but debug output and equality checks stay deterministic.

use std::collections::BTreeMap;

use shared_types::rlp::{encode_u256, RlpStream};
use shared_types::{keccak256, u256_to_word};
pub use shared_types::{Address, Hash, U256};

use super::{SecureTrie, StateError};
use crate::ports::TrieCollaborator;

/// Genesis accounts keyed by address.
pub type AccountMap = BTreeMap<Address, GenesisAccount>;

/// Precompiled contracts keyed by address.
pub type PrecompiledMap = BTreeMap<Address, PrecompiledContract>;

/// Account record at block zero.
///
/// ## Serialization
///
/// Stored in the state trie as RLP `[nonce, balance, storage_root, code_hash]`,
/// matching Ethereum's account encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenesisAccount {
    pub balance: U256,
    pub nonce: U256,
    pub code: Vec<u8>,
    /// Storage slots. Zero-valued slots are not committed.
    pub storage: BTreeMap<U256, U256>,
}

impl GenesisAccount {
    /// Create a new account with the specified balance.
    pub fn new(balance: U256) -> Self {
        Self {
            balance,
            ..Default::default()
        }
    }

    /// Builder method to set nonce.
    pub fn with_nonce(mut self, nonce: U256) -> Self {
        self.nonce = nonce;
        self
    }

    /// Builder method to set contract code.
    pub fn with_code(mut self, code: Vec<u8>) -> Self {
        self.code = code;
        self
    }

    /// Builder method to set one storage slot.
    pub fn with_storage(mut self, key: U256, value: U256) -> Self {
        self.storage.insert(key, value);
        self
    }

    pub fn code_hash(&self) -> Hash {
        keccak256(&self.code)
    }

    /// Root of the account's storage trie.
    pub fn storage_root(&self) -> Result<Hash, StateError> {
        let mut trie = SecureTrie::in_memory();
        trie.init();
        for (key, value) in self.storage.iter().filter(|(_, v)| !v.is_zero()) {
            trie.insert(&u256_to_word(key), &encode_u256(value))?;
        }
        trie.root()
    }

    /// RLP-encode this account for insertion into the state trie.
    pub fn rlp_encode(&self) -> Result<Vec<u8>, StateError> {
        let mut stream = RlpStream::new();
        stream
            .append_u256(&self.nonce)
            .append_u256(&self.balance)
            .append_bytes(&self.storage_root()?)
            .append_bytes(&self.code_hash());
        Ok(stream.out_list())
    }
}

/// A natively implemented contract living at a fixed address.
///
/// Priced linearly: `base_cost + word_cost * ceil(input_len / 32)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrecompiledContract {
    pub name: String,
    pub base_cost: u64,
    pub word_cost: u64,
}

impl PrecompiledContract {
    pub fn new(name: impl Into<String>, base_cost: u64, word_cost: u64) -> Self {
        Self {
            name: name.into(),
            base_cost,
            word_cost,
        }
    }

    /// Gas charged for an input of `input_len` bytes. Saturates at `u64::MAX`.
    pub fn cost(&self, input_len: usize) -> u64 {
        let words = (input_len as u64).div_ceil(32);
        self.base_cost
            .saturating_add(self.word_cost.saturating_mul(words))
    }
}

/// Configuration for the Patricia Merkle Trie.
#[derive(Clone, Debug)]
pub struct TrieConfig {
    /// Maximum key path length in nibbles. Limits path length to prevent DoS.
    /// 64 is sufficient for 256-bit hashed keys.
    pub max_depth: usize,
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}
