//! Big-endian hex decoding for configuration documents.
//!
//! Accepts `0x`-prefixed or bare text. Odd-length text is read as if it had a
//! leading `0` nibble, so `0x0` and `0x00` decode to the same byte.

use crate::{HexError, U256};

/// Decode hex text into raw bytes.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    };

    decoded.map_err(|e| HexError::InvalidHex {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Decode hex text into an exactly `N`-byte array.
pub fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N], HexError> {
    let bytes = decode_hex(input)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| HexError::LengthMismatch {
        expected: N,
        actual: bytes.len(),
    })
}

/// Decode big-endian hex text into a 256-bit unsigned integer.
pub fn decode_u256(input: &str) -> Result<U256, HexError> {
    u256_from_be(&decode_hex(input)?)
}

/// Interpret big-endian bytes as a 256-bit unsigned integer.
pub fn u256_from_be(bytes: &[u8]) -> Result<U256, HexError> {
    if bytes.len() > 32 {
        return Err(HexError::Overflow { len: bytes.len() });
    }
    Ok(U256::from_big_endian(bytes))
}

/// Full 32-byte big-endian form of `value`.
pub fn u256_to_word(value: &U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// Minimal big-endian bytes of `value`; zero is the empty string.
pub fn u256_to_be_minimal(value: &U256) -> Vec<u8> {
    let word = u256_to_word(value);
    let start = word.iter().position(|&b| b != 0).unwrap_or(word.len());
    word[start..].to_vec()
}
