//! # Genesis Header Assembly
//!
//! Turns a record's genesis overlay into the canonical block zero encoding:
//!
//! ```text
//! Header := [parentHash, EMPTY_LIST_HASH, author, stateRoot,
//!            EMPTY_TRIE_ROOT, EMPTY_TRIE_ROOT, bloom(256 zero bytes),
//!            difficulty, 0, gasLimit, gasUsed, timestamp, extraData,
//!            seal fields...]
//! Block  := [Header, [], []]
//! ```
//!
//! Integers are minimal big-endian, so zero encodes as the empty string.

use serde_json::Value;
use shared_types::rlp::{encode_bytes, EMPTY_LIST};
use shared_types::{
    keccak256, Address, Hash, RlpStream, SealNonce, EMPTY_LIST_HASH, EMPTY_TRIE_ROOT,
    LOG_BLOOM_SIZE, U256,
};

use super::document::Section;
use super::ChainParams;
use crate::error::Result;

/// Header items preceding the seal suffix.
pub const BASIC_FIELD_COUNT: usize = 13;

/// Engine-specific header suffix: `field_count` RLP items, pre-encoded and
/// concatenated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SealData {
    pub field_count: usize,
    pub rlp: Vec<u8>,
}

impl SealData {
    /// Proof-of-work seal: the mix hash followed by the nonce.
    pub fn ethash(mix_hash: &Hash, nonce: &SealNonce) -> Self {
        let mut rlp = encode_bytes(mix_hash);
        rlp.extend_from_slice(&encode_bytes(nonce));
        Self {
            field_count: 2,
            rlp,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rlp.is_empty()
    }
}

/// Header fields of block zero taken from the `genesis` section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenesisHeaderFields {
    pub parent_hash: Hash,
    pub author: Address,
    pub difficulty: U256,
    pub gas_limit: U256,
    pub gas_used: U256,
    pub timestamp: U256,
    pub extra_data: Vec<u8>,
    pub seal: SealData,
}

impl GenesisHeaderFields {
    /// Read a `genesis` section.
    ///
    /// `coinbase` takes precedence over `author`. A seal is read only when a
    /// nonce and a mix hash (`mixhash`, else `mixHash`) are both present.
    pub fn from_json(genesis: &Value) -> Result<Self> {
        let section = Section::new(genesis, "genesis")?;

        let author_key = if section.has("coinbase") {
            "coinbase"
        } else {
            "author"
        };
        let mut fields = Self {
            parent_hash: section.required_fixed("parentHash")?,
            author: section.required_fixed(author_key)?,
            difficulty: section.optional_u256("difficulty")?.unwrap_or_default(),
            gas_limit: section.required_u256("gasLimit")?,
            gas_used: section.optional_u256("gasUsed")?.unwrap_or_default(),
            timestamp: section.required_u256("timestamp")?,
            extra_data: section.required_bytes("extraData")?,
            seal: SealData::default(),
        };

        let mix_key = ["mixhash", "mixHash"].into_iter().find(|k| section.has(k));
        if let Some(mix_key) = mix_key.filter(|_| section.has("nonce")) {
            let mix_hash: Hash = section.required_fixed(mix_key)?;
            let nonce: SealNonce = section.required_fixed("nonce")?;
            fields.seal = SealData::ethash(&mix_hash, &nonce);
        }

        Ok(fields)
    }
}

impl ChainParams {
    fn header_stream(&self) -> RlpStream {
        let g = &self.genesis;
        let mut header = RlpStream::new();
        header
            .append_bytes(&g.parent_hash)
            .append_bytes(&EMPTY_LIST_HASH)
            .append_bytes(&g.author)
            .append_bytes(&self.state_root())
            .append_bytes(&EMPTY_TRIE_ROOT)
            .append_bytes(&EMPTY_TRIE_ROOT)
            .append_bytes(&[0u8; LOG_BLOOM_SIZE])
            .append_u256(&g.difficulty)
            .append_u64(0)
            .append_u256(&g.gas_limit)
            .append_u256(&g.gas_used)
            .append_u256(&g.timestamp)
            .append_bytes(&g.extra_data)
            .append_raw(&g.seal.rlp, g.seal.field_count);
        header
    }

    /// Canonical encoding of the genesis header list.
    pub fn genesis_header(&self) -> Vec<u8> {
        self.header_stream().out_list()
    }

    /// Canonical encoding of block zero: the header with empty transaction
    /// and uncle lists.
    pub fn genesis_block(&self) -> Vec<u8> {
        let mut block = RlpStream::new();
        block
            .append_list(self.header_stream())
            .append_raw(&[EMPTY_LIST], 1)
            .append_raw(&[EMPTY_LIST], 1);
        block.out_list()
    }

    /// Keccak-256 of the genesis header.
    pub fn genesis_hash(&self) -> Hash {
        keccak256(&self.genesis_header())
    }
}
