//! # Configuration Loading
//!
//! Reads a chain configuration document:
//!
//! ```json
//! {
//!   "sealEngine": "Ethash",
//!   "params": {
//!     "accountStartNonce": "0x00",
//!     "maximumExtraDataSize": "0x20",
//!     "blockReward": "0x4563918244F40000",
//!     "tieBreakingGas": false,
//!     "networkID": "0x01"
//!   },
//!   "genesis": { "...": "see GenesisHeaderFields::from_json" },
//!   "accounts": { "...": "see JsonAccountMapDecoder" }
//! }
//! ```
//!
//! Keys under `params` without a typed field are kept in `other_params`.

use qc_04_state_management::{
    AccountMapDecoder, JsonAccountMapDecoder, PrecompiledMap, StateError,
};
use serde_json::{Map, Value};
use shared_types::Hash;
use tracing::info;

use super::document::Section;
use super::genesis::GenesisHeaderFields;
use super::ChainParams;
use crate::config::LoaderConfig;
use crate::error::{ChainParamsError, Result};

/// `params` keys read into typed fields.
const TYPED_PARAMS: [&str; 4] = [
    "accountStartNonce",
    "maximumExtraDataSize",
    "tieBreakingGas",
    "blockReward",
];

impl ChainParams {
    /// Build a record from a full configuration document, importing its
    /// genesis.
    pub fn from_json(json: &str, state_root: Option<Hash>) -> Result<Self> {
        Self::default().load_config(json, true, state_root)
    }

    /// Derive a record from a configuration document.
    ///
    /// With `import_genesis` false the record keeps its current genesis
    /// overlay and `state_root` is ignored.
    pub fn load_config(
        &self,
        json: &str,
        import_genesis: bool,
        state_root: Option<Hash>,
    ) -> Result<Self> {
        let config = LoaderConfig::default().with_import_genesis(import_genesis);
        self.load_config_with(json, &config, state_root)
    }

    pub fn load_config_with(
        &self,
        json: &str,
        config: &LoaderConfig,
        state_root: Option<Hash>,
    ) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        let root = Section::new(&document, "")?;

        let mut cp = self.clone();
        cp.seal_engine_name = root.required_str("sealEngine")?.to_string();

        let params = root.section("params")?;
        cp.account_start_nonce = params.required_u256("accountStartNonce")?;
        cp.maximum_extra_data_size = params.required_u256("maximumExtraDataSize")?;
        cp.tie_breaking_gas = params.optional_bool("tieBreakingGas")?.unwrap_or(true);
        cp.block_reward = params.required_u256("blockReward")?;

        for (key, value) in params.entries() {
            if TYPED_PARAMS.contains(&key.as_str()) {
                continue;
            }
            let text = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            cp.other_params.insert(key.clone(), text);
        }

        // Accounts go in before the genesis overlay so a computed root covers
        // them.
        let empty = Value::Object(Map::new());
        let accounts = root.get("accounts").unwrap_or(&empty);
        cp = cp.decode_genesis_state(accounts, PrecompiledMap::new(), &JsonAccountMapDecoder)?;

        if config.import_genesis {
            let fields = GenesisHeaderFields::from_json(root.required("genesis")?)?;
            cp = cp.with_genesis_fields(fields, state_root);
            if config.enforce_extra_data_size {
                cp.validate_extra_data()?;
            } else {
                cp.warn_on_extra_data_size();
            }
        }

        info!(
            seal_engine = %cp.seal_engine_name,
            accounts = cp.genesis_state.len(),
            extras = cp.other_params.len(),
            state_root = %hex::encode(cp.state_root()),
            "Loaded chain configuration"
        );
        Ok(cp)
    }

    /// Derive a record with the genesis overlay read from a `genesis`
    /// section given as JSON text.
    pub fn load_genesis(&self, json: &str, state_root: Option<Hash>) -> Result<Self> {
        let genesis: Value = serde_json::from_str(json)?;
        self.with_genesis(&genesis, state_root)
    }

    /// Derive a record whose genesis state is read from an `accounts`
    /// section given as JSON text. Declared precompiled contracts are added
    /// to `precompiled`.
    pub fn load_genesis_state(&self, json: &str, precompiled: PrecompiledMap) -> Result<Self> {
        let accounts: Value = serde_json::from_str(json)?;
        self.decode_genesis_state(&accounts, precompiled, &JsonAccountMapDecoder)
    }

    /// Value-based form of `load_genesis`. Oversized extra data is logged,
    /// not rejected.
    pub fn with_genesis(&self, genesis: &Value, state_root: Option<Hash>) -> Result<Self> {
        let fields = GenesisHeaderFields::from_json(genesis)?;
        let cp = self.with_genesis_fields(fields, state_root);
        cp.warn_on_extra_data_size();
        Ok(cp)
    }

    /// Decode `accounts` with `decoder` and attach the result as genesis
    /// state. Missing nonces default to `account_start_nonce`.
    pub fn decode_genesis_state<D>(
        &self,
        accounts: &Value,
        mut precompiled: PrecompiledMap,
        decoder: &D,
    ) -> Result<Self>
    where
        D: AccountMapDecoder + ?Sized,
    {
        let accounts = decoder
            .decode(accounts, self.account_start_nonce, &mut precompiled)
            .map_err(invalid_accounts)?;
        self.with_genesis_state(accounts, precompiled)
    }
}

fn invalid_accounts(err: StateError) -> ChainParamsError {
    match err {
        StateError::InvalidAccount { address, reason } => ChainParamsError::InvalidField {
            field: format!("accounts.{address}"),
            reason,
        },
        other => ChainParamsError::TrieCommitFailure(other),
    }
}
