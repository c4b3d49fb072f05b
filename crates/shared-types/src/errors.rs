//! # Error Types
//!
//! Decoding errors shared by every subsystem that reads hex text or RLP.

use thiserror::Error;

/// Errors raised while decoding hex text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// The text is not valid hexadecimal.
    #[error("Invalid hex {input:?}: {reason}")]
    InvalidHex { input: String, reason: String },

    /// The decoded byte string does not have the required width.
    #[error("Hex length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The value does not fit in 256 bits.
    #[error("Integer overflow: {len} bytes exceed 32")]
    Overflow { len: usize },
}

/// Errors raised while decoding RLP.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RlpError {
    /// The input ends before the announced payload.
    #[error("RLP truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// A list was required but a byte string was found.
    #[error("RLP item is not a list")]
    ExpectedList,

    /// A byte string was required but a list was found.
    #[error("RLP item is not a byte string")]
    ExpectedBytes,

    /// The item is encoded in a non-minimal form.
    #[error("Non-canonical RLP: {0}")]
    NonCanonical(&'static str),

    /// Bytes remain after the top-level item.
    #[error("RLP has {0} trailing bytes")]
    TrailingBytes(usize),

    /// An item index past the end of a list.
    #[error("RLP index {index} out of range for list of {count}")]
    IndexOutOfRange { index: usize, count: usize },

    /// A fixed-width field has the wrong size.
    #[error("RLP length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
