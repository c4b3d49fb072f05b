//! # JSON Account Map Decoder
//!
//! Reads the `accounts` object of a chain configuration document:
//!
//! ```json
//! {
//!   "0x0000000000000000000000000000000000000001": {
//!     "precompiled": { "name": "ecrecover", "linear": { "base": 3000, "word": 0 } }
//!   },
//!   "dbdbdb2cbd23b783741e8d7fcf51e459b497e4a6": {
//!     "balance": "1606938044258990275541962092341162602522202993782792835301376",
//!     "nonce": "0x00",
//!     "code": "0x6000",
//!     "storage": { "0x01": "0x2a" }
//!   }
//! }
//! ```
//!
//! Quantities accept `0x` hex text, decimal text or JSON integers. `wei` is
//! accepted as an alias of `balance`.

use serde_json::{Map, Value};
use shared_types::{decode_fixed, decode_hex, decode_u256};
use tracing::debug;

use crate::domain::{
    AccountMap, Address, GenesisAccount, PrecompiledContract, PrecompiledMap, StateError, U256,
};
use crate::ports::AccountMapDecoder;

/// `serde_json::Value` based account map decoder.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonAccountMapDecoder;

impl JsonAccountMapDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl AccountMapDecoder for JsonAccountMapDecoder {
    fn decode(
        &self,
        json: &Value,
        default_nonce: U256,
        precompiled: &mut PrecompiledMap,
    ) -> Result<AccountMap, StateError> {
        let entries = json.as_object().ok_or_else(|| StateError::InvalidAccount {
            address: "<accounts>".to_string(),
            reason: "expected an object keyed by address".to_string(),
        })?;

        let mut accounts = AccountMap::new();
        for (key, value) in entries {
            let invalid = |reason: String| StateError::InvalidAccount {
                address: key.clone(),
                reason,
            };

            let address: Address = decode_fixed(key).map_err(|e| invalid(e.to_string()))?;
            let fields = value
                .as_object()
                .ok_or_else(|| invalid("expected an object".to_string()))?;

            if let Some(contract) = decode_precompiled(fields).map_err(invalid)? {
                debug!(address = %key, name = %contract.name, "Registered precompiled contract");
                precompiled.insert(address, contract);
            }

            if let Some(account) = decode_account(fields, default_nonce).map_err(invalid)? {
                accounts.insert(address, account);
            }
        }

        debug!(
            accounts = accounts.len(),
            precompiled = precompiled.len(),
            "Decoded genesis accounts"
        );
        Ok(accounts)
    }
}

/// Decode the account record, if the entry declares any account field.
fn decode_account(
    fields: &Map<String, Value>,
    default_nonce: U256,
) -> Result<Option<GenesisAccount>, String> {
    let balance = fields.get("balance").or_else(|| fields.get("wei"));
    let nonce = fields.get("nonce");
    let code = fields.get("code");
    let storage = fields.get("storage");

    if balance.is_none() && nonce.is_none() && code.is_none() && storage.is_none() {
        return Ok(None);
    }

    let mut account = GenesisAccount::new(balance.map(quantity).transpose()?.unwrap_or_default())
        .with_nonce(nonce.map(quantity).transpose()?.unwrap_or(default_nonce));

    if let Some(code) = code {
        let text = code
            .as_str()
            .ok_or_else(|| "code must be a hex string".to_string())?;
        account.code = decode_hex(text).map_err(|e| e.to_string())?;
    }

    if let Some(storage) = storage {
        let slots = storage
            .as_object()
            .ok_or_else(|| "storage must be an object".to_string())?;
        for (slot, value) in slots {
            let slot = decode_u256(slot).map_err(|e| format!("storage key {slot}: {e}"))?;
            account.storage.insert(slot, quantity(value)?);
        }
    }

    Ok(Some(account))
}

/// Decode a `precompiled` declaration, if present.
fn decode_precompiled(fields: &Map<String, Value>) -> Result<Option<PrecompiledContract>, String> {
    let Some(spec) = fields.get("precompiled") else {
        return Ok(None);
    };

    let name = spec
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| "precompiled.name must be a string".to_string())?;

    let (base, word) = match spec.get("linear") {
        Some(linear) => (
            linear_cost(linear, "base")?,
            linear_cost(linear, "word")?,
        ),
        None => (0, 0),
    };

    Ok(Some(PrecompiledContract::new(name, base, word)))
}

fn linear_cost(linear: &Value, key: &str) -> Result<u64, String> {
    match linear.get(key) {
        None => Ok(0),
        Some(v) => {
            let cost = quantity(v)?;
            if cost > U256::from(u64::MAX) {
                return Err(format!("precompiled.linear.{key} exceeds u64"));
            }
            Ok(cost.low_u64())
        }
    }
}

/// Parse a quantity: `0x` hex text, decimal text, or a non-negative integer.
fn quantity(value: &Value) -> Result<U256, String> {
    match value {
        Value::String(text) if text.starts_with("0x") || text.starts_with("0X") => {
            decode_u256(text).map_err(|e| e.to_string())
        }
        Value::String(text) => {
            U256::from_dec_str(text).map_err(|e| format!("invalid decimal {text:?}: {e:?}"))
        }
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| format!("invalid quantity {n}")),
        other => Err(format!("invalid quantity {other}")),
    }
}
