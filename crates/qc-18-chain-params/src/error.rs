//! Error types for chain parameter loading and genesis verification

use qc_04_state_management::StateError;
use shared_types::{HexError, RlpError, U256};
use thiserror::Error;

/// Result type alias for chain parameter operations
pub type Result<T> = std::result::Result<T, ChainParamsError>;

/// Errors that can occur while building a `ChainParams` record.
///
/// Every variant is fatal: a derive operation that fails leaves the record it
/// was called on untouched and returns no partial result.
#[derive(Debug, Error)]
pub enum ChainParamsError {
    /// A required key is absent from the configuration document
    #[error("Missing required field `{0}`")]
    MissingField(String),

    /// A key is present but holds the wrong JSON type or an invalid value
    #[error("Invalid field `{field}`: {reason}")]
    InvalidField {
        /// Dotted path of the offending key
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// A hex field could not be decoded
    #[error("Malformed hex in `{field}`: {source}")]
    MalformedHex {
        /// Dotted path of the offending key
        field: String,
        #[source]
        source: HexError,
    },

    /// No seal engine is registered under this name
    #[error("Unknown seal engine: {0}")]
    UnknownSealEngine(String),

    /// The supplied genesis does not reproduce the locally assembled one
    #[error("Genesis mismatch: local block {expected_hash}, supplied block {actual_hash}")]
    GenesisMismatch {
        /// Hex of the locally assembled encoding
        expected: String,
        /// Hex of the supplied encoding
        actual: String,
        /// Hex Keccak-256 of the local header
        expected_hash: String,
        /// Hex Keccak-256 of the supplied header
        actual_hash: String,
    },

    /// The state trie failed while committing the genesis state
    #[error("Trie commit failed: {0}")]
    TrieCommitFailure(#[from] StateError),

    /// The supplied genesis encoding is not a well-formed header or block
    #[error("Invalid genesis RLP: {0}")]
    InvalidRlp(String),

    /// Genesis extra data exceeds `maximumExtraDataSize`
    #[error("Extra data too long: {len} bytes, maximum {max}")]
    ExtraDataTooLong {
        /// Extra data length in bytes
        len: usize,
        /// Configured maximum
        max: U256,
    },

    /// The configuration document is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<RlpError> for ChainParamsError {
    fn from(err: RlpError) -> Self {
        Self::InvalidRlp(err.to_string())
    }
}
