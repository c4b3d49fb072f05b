use serde_json::Value;

use crate::domain::{AccountMap, PrecompiledMap, StateError, U256};

/// Decodes the `accounts` section of a chain configuration document.
pub trait AccountMapDecoder {
    /// Decode `json` into genesis accounts.
    ///
    /// Accounts that declare no nonce start at `default_nonce`. Precompiled
    /// contract declarations are added to `precompiled`.
    fn decode(
        &self,
        json: &Value,
        default_nonce: U256,
        precompiled: &mut PrecompiledMap,
    ) -> Result<AccountMap, StateError>;
}
