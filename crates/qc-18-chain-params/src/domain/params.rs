//! # Chain Parameter Record
//!
//! `ChainParams` is immutable once built. Every overlay is a derive
//! operation taking `&self` and returning a new record, so a base record can
//! be shared while differently configured records are derived from it.
//!
//! ## State Root
//!
//! The root is computed eagerly whenever the genesis state changes, unless
//! the caller supplied a trusted root. A trusted root comes from a previously
//! verified chain and is kept through every later derive operation.

use std::collections::BTreeMap;
use std::sync::Arc;

use qc_04_state_management::{compute_state_root, AccountMap, PrecompiledMap};
use shared_types::{Hash, EMPTY_TRIE_ROOT, U256, ZERO_HASH};
use tracing::{debug, warn};

use super::genesis::{GenesisHeaderFields, SealData};
use crate::error::{ChainParamsError, Result};

/// Seal engine used when a record has not been configured.
pub const DEFAULT_SEAL_ENGINE: &str = "NoProof";

/// Default `maximumExtraDataSize` in bytes.
pub const DEFAULT_MAXIMUM_EXTRA_DATA_SIZE: u64 = 1024;

/// Where a record's state root came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateRoot {
    /// Supplied externally; never recomputed.
    Trusted(Hash),
    /// Committed from the record's genesis state.
    Computed(Hash),
}

impl StateRoot {
    pub fn hash(&self) -> Hash {
        match self {
            Self::Trusted(hash) | Self::Computed(hash) => *hash,
        }
    }

    pub fn is_trusted(&self) -> bool {
        matches!(self, Self::Trusted(_))
    }

    /// A supplied root, ignoring the all-zero "not supplied" value.
    fn supplied(root: Option<Hash>) -> Option<Self> {
        root.filter(|hash| *hash != ZERO_HASH).map(Self::Trusted)
    }
}

/// Parameters of a chain and the description of its genesis block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainParams {
    pub(crate) seal_engine_name: String,
    pub(crate) account_start_nonce: U256,
    pub(crate) maximum_extra_data_size: U256,
    pub(crate) tie_breaking_gas: bool,
    pub(crate) block_reward: U256,
    pub(crate) other_params: BTreeMap<String, String>,
    pub(crate) genesis: GenesisHeaderFields,
    pub(crate) genesis_state: Arc<AccountMap>,
    pub(crate) precompiled: Arc<PrecompiledMap>,
    pub(crate) state_root: StateRoot,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            seal_engine_name: DEFAULT_SEAL_ENGINE.to_string(),
            account_start_nonce: U256::zero(),
            maximum_extra_data_size: U256::from(DEFAULT_MAXIMUM_EXTRA_DATA_SIZE),
            tie_breaking_gas: true,
            block_reward: U256::zero(),
            other_params: BTreeMap::new(),
            genesis: GenesisHeaderFields::default(),
            genesis_state: Arc::new(AccountMap::new()),
            precompiled: Arc::new(PrecompiledMap::new()),
            state_root: StateRoot::Computed(EMPTY_TRIE_ROOT),
        }
    }
}

impl ChainParams {
    pub fn seal_engine_name(&self) -> &str {
        &self.seal_engine_name
    }

    pub fn account_start_nonce(&self) -> U256 {
        self.account_start_nonce
    }

    pub fn maximum_extra_data_size(&self) -> U256 {
        self.maximum_extra_data_size
    }

    pub fn tie_breaking_gas(&self) -> bool {
        self.tie_breaking_gas
    }

    pub fn block_reward(&self) -> U256 {
        self.block_reward
    }

    /// Parameters under `params` that have no typed field.
    pub fn other_params(&self) -> &BTreeMap<String, String> {
        &self.other_params
    }

    pub fn other_param(&self, key: &str) -> Option<&str> {
        self.other_params.get(key).map(String::as_str)
    }

    pub fn genesis(&self) -> &GenesisHeaderFields {
        &self.genesis
    }

    pub fn genesis_state(&self) -> &AccountMap {
        &self.genesis_state
    }

    pub fn precompiled(&self) -> &PrecompiledMap {
        &self.precompiled
    }

    /// State root committed in the genesis header.
    pub fn state_root(&self) -> Hash {
        self.state_root.hash()
    }

    pub fn state_root_source(&self) -> StateRoot {
        self.state_root
    }

    /// Derive a record carrying `accounts` and `precompiled` as genesis state.
    ///
    /// A computed root is refreshed over the new accounts; a trusted root is
    /// kept as is.
    pub fn with_genesis_state(
        &self,
        accounts: AccountMap,
        precompiled: PrecompiledMap,
    ) -> Result<Self> {
        let mut cp = self.clone();
        cp.genesis_state = Arc::new(accounts);
        cp.precompiled = Arc::new(precompiled);
        if !cp.state_root.is_trusted() {
            cp.state_root = StateRoot::Computed(compute_state_root(&cp.genesis_state)?);
        }
        Ok(cp)
    }

    /// Derive a record with `fields` as its genesis overlay.
    ///
    /// A non-zero `state_root` becomes the trusted root. Otherwise the record
    /// keeps its current root, which is already up to date with its state.
    pub fn with_genesis_fields(
        &self,
        fields: GenesisHeaderFields,
        state_root: Option<Hash>,
    ) -> Self {
        let mut cp = self.clone();
        cp.genesis = fields;
        if let Some(trusted) = StateRoot::supplied(state_root) {
            cp.state_root = trusted;
        }
        cp
    }

    /// Derive a record with `seal` as the genesis seal suffix.
    pub fn with_seal(&self, seal: SealData) -> Self {
        let mut cp = self.clone();
        cp.genesis.seal = seal;
        cp
    }

    /// Derive a record whose root is freshly committed from its genesis
    /// state, dropping any trusted root.
    pub fn with_computed_state_root(&self) -> Result<Self> {
        let mut cp = self.clone();
        cp.state_root = StateRoot::Computed(compute_state_root(&cp.genesis_state)?);
        debug!(root = %hex::encode(cp.state_root()), "Recomputed genesis state root");
        Ok(cp)
    }

    /// Check the genesis extra data against `maximumExtraDataSize`.
    pub fn validate_extra_data(&self) -> Result<()> {
        let len = self.genesis.extra_data.len();
        if U256::from(len) > self.maximum_extra_data_size {
            return Err(ChainParamsError::ExtraDataTooLong {
                len,
                max: self.maximum_extra_data_size,
            });
        }
        Ok(())
    }

    pub(crate) fn warn_on_extra_data_size(&self) {
        if let Err(err) = self.validate_extra_data() {
            warn!(error = %err, "Genesis extra data exceeds configured maximum");
        }
    }
}
