//! Typed access to one JSON object of a configuration document.
//!
//! Every accessor reports failures against the dotted path of the key, e.g.
//! `params.blockReward` or `genesis.gasLimit`.

use serde_json::{Map, Value};
use shared_types::{decode_fixed, decode_hex, decode_u256, U256};

use crate::error::{ChainParamsError, Result};

pub(crate) struct Section<'a> {
    fields: &'a Map<String, Value>,
    path: String,
}

impl<'a> Section<'a> {
    /// View `value` as an object named `path` (empty for the document root).
    pub fn new(value: &'a Value, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let fields = value.as_object().ok_or_else(|| ChainParamsError::InvalidField {
            field: if path.is_empty() {
                "<root>".to_string()
            } else {
                path.clone()
            },
            reason: "expected a JSON object".to_string(),
        })?;
        Ok(Self { fields, path })
    }

    pub fn field(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.fields.iter()
    }

    pub fn required(&self, key: &str) -> Result<&'a Value> {
        self.get(key)
            .ok_or_else(|| ChainParamsError::MissingField(self.field(key)))
    }

    pub fn section(&self, key: &str) -> Result<Section<'a>> {
        Section::new(self.required(key)?, self.field(key))
    }

    pub fn required_str(&self, key: &str) -> Result<&'a str> {
        let value = self.required(key)?;
        value
            .as_str()
            .ok_or_else(|| self.wrong_type(key, "string", value))
    }

    pub fn optional_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "boolean", value)),
        }
    }

    pub fn required_u256(&self, key: &str) -> Result<U256> {
        let text = self.required_str(key)?;
        decode_u256(text).map_err(|source| self.malformed(key, source))
    }

    pub fn optional_u256(&self, key: &str) -> Result<Option<U256>> {
        if self.has(key) {
            self.required_u256(key).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn required_bytes(&self, key: &str) -> Result<Vec<u8>> {
        let text = self.required_str(key)?;
        decode_hex(text).map_err(|source| self.malformed(key, source))
    }

    pub fn required_fixed<const N: usize>(&self, key: &str) -> Result<[u8; N]> {
        let text = self.required_str(key)?;
        decode_fixed(text).map_err(|source| self.malformed(key, source))
    }

    fn wrong_type(&self, key: &str, expected: &str, found: &Value) -> ChainParamsError {
        ChainParamsError::InvalidField {
            field: self.field(key),
            reason: format!("expected a {expected}, found {found}"),
        }
    }

    fn malformed(&self, key: &str, source: shared_types::HexError) -> ChainParamsError {
        ChainParamsError::MalformedHex {
            field: self.field(key),
            source,
        }
    }
}
