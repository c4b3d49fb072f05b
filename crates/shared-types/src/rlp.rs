//! # Recursive Length Prefix
//!
//! The canonical encoding of headers, blocks, accounts and trie nodes.
//!
//! - A single byte below `0x80` is its own encoding.
//! - A byte string of 0..=55 bytes is `0x80 + len` followed by the bytes.
//! - Longer strings are `0xb7 + len(len)`, the big-endian length, the bytes.
//! - Lists use `0xc0` / `0xf7` the same way over the concatenated item
//!   encodings.
//!
//! Integers are encoded as their minimal big-endian byte string, so zero is
//! the empty string `0x80`.

use crate::{u256_to_be_minimal, RlpError, U256};

/// Encoding of the empty byte string.
pub const EMPTY_STRING: u8 = 0x80;

/// Encoding of the empty list.
pub const EMPTY_LIST: u8 = 0xc0;

// =============================================================================
// ENCODING
// =============================================================================

/// RLP-encode a byte slice.
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    if data.len() == 1 && data[0] < 0x80 {
        vec![data[0]]
    } else if data.len() < 56 {
        let mut result = Vec::with_capacity(data.len() + 1);
        result.push(0x80 + data.len() as u8);
        result.extend_from_slice(data);
        result
    } else {
        let len_bytes = encode_length(data.len());
        let mut result = Vec::with_capacity(data.len() + len_bytes.len() + 1);
        result.push(0xb7 + len_bytes.len() as u8);
        result.extend_from_slice(&len_bytes);
        result.extend_from_slice(data);
        result
    }
}

/// RLP-encode an unsigned integer.
pub fn encode_u256(value: &U256) -> Vec<u8> {
    encode_bytes(&u256_to_be_minimal(value))
}

/// Wrap already-encoded items in an RLP list header.
pub fn encode_list_payload(payload: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(payload.len() + 9);
    if payload.len() < 56 {
        result.push(0xc0 + payload.len() as u8);
    } else {
        let len_bytes = encode_length(payload.len());
        result.push(0xf7 + len_bytes.len() as u8);
        result.extend_from_slice(&len_bytes);
    }
    result.extend_from_slice(payload);
    result
}

/// Encode a length as minimal big-endian bytes.
fn encode_length(len: usize) -> Vec<u8> {
    let bytes = len.to_be_bytes();
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    bytes[start..].to_vec()
}

/// Incremental builder for one RLP list.
///
/// Items are appended in order; `out_list` wraps them in the list header.
#[derive(Clone, Debug, Default)]
pub struct RlpStream {
    payload: Vec<u8>,
    items: usize,
}

impl RlpStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a byte string item.
    pub fn append_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.payload.extend(encode_bytes(data));
        self.items += 1;
        self
    }

    /// Append an integer item.
    pub fn append_u256(&mut self, value: &U256) -> &mut Self {
        self.payload.extend(encode_u256(value));
        self.items += 1;
        self
    }

    /// Append an integer item.
    pub fn append_u64(&mut self, value: u64) -> &mut Self {
        self.append_u256(&U256::from(value))
    }

    /// Append `item_count` items that are already RLP-encoded, verbatim.
    pub fn append_raw(&mut self, raw: &[u8], item_count: usize) -> &mut Self {
        self.payload.extend_from_slice(raw);
        self.items += item_count;
        self
    }

    /// Append a nested list built by another stream.
    pub fn append_list(&mut self, list: RlpStream) -> &mut Self {
        self.payload.extend(list.out_list());
        self.items += 1;
        self
    }

    /// Number of items appended so far.
    pub fn item_count(&self) -> usize {
        self.items
    }

    /// Finish the list.
    pub fn out_list(self) -> Vec<u8> {
        encode_list_payload(&self.payload)
    }
}

// =============================================================================
// DECODING
// =============================================================================

#[derive(Clone, Copy, Debug)]
struct Header {
    is_list: bool,
    header_len: usize,
    payload_len: usize,
}

impl Header {
    fn total_len(&self) -> usize {
        self.header_len + self.payload_len
    }
}

fn decode_header(bytes: &[u8]) -> Result<Header, RlpError> {
    let first = *bytes.first().ok_or(RlpError::Truncated {
        needed: 1,
        available: 0,
    })?;

    let header = match first {
        0x00..=0x7f => Header {
            is_list: false,
            header_len: 0,
            payload_len: 1,
        },
        0x80..=0xb7 => {
            let len = (first - 0x80) as usize;
            if len == 1 && bytes.get(1).is_some_and(|&b| b < 0x80) {
                return Err(RlpError::NonCanonical("single byte wrapped in a string"));
            }
            Header {
                is_list: false,
                header_len: 1,
                payload_len: len,
            }
        }
        0xb8..=0xbf => {
            let len_of_len = (first - 0xb7) as usize;
            Header {
                is_list: false,
                header_len: 1 + len_of_len,
                payload_len: decode_long_length(bytes, len_of_len)?,
            }
        }
        0xc0..=0xf7 => Header {
            is_list: true,
            header_len: 1,
            payload_len: (first - 0xc0) as usize,
        },
        0xf8..=0xff => {
            let len_of_len = (first - 0xf7) as usize;
            Header {
                is_list: true,
                header_len: 1 + len_of_len,
                payload_len: decode_long_length(bytes, len_of_len)?,
            }
        }
    };

    let needed = header
        .header_len
        .checked_add(header.payload_len)
        .ok_or(RlpError::NonCanonical("length overflows usize"))?;
    if needed > bytes.len() {
        return Err(RlpError::Truncated {
            needed,
            available: bytes.len(),
        });
    }
    Ok(header)
}

fn decode_long_length(bytes: &[u8], len_of_len: usize) -> Result<usize, RlpError> {
    let len_bytes = bytes.get(1..1 + len_of_len).ok_or(RlpError::Truncated {
        needed: 1 + len_of_len,
        available: bytes.len(),
    })?;
    if len_bytes[0] == 0 {
        return Err(RlpError::NonCanonical("length has leading zero"));
    }
    if len_bytes.len() > std::mem::size_of::<usize>() {
        return Err(RlpError::NonCanonical("length overflows usize"));
    }
    let len = len_bytes
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);
    if len < 56 {
        return Err(RlpError::NonCanonical("long form used for short payload"));
    }
    Ok(len)
}

/// A view over exactly one RLP item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rlp<'a> {
    raw: &'a [u8],
    header: (bool, usize),
}

impl<'a> Rlp<'a> {
    /// Decode `bytes` as a single item, rejecting trailing data.
    pub fn new(bytes: &'a [u8]) -> Result<Self, RlpError> {
        let header = decode_header(bytes)?;
        if header.total_len() != bytes.len() {
            return Err(RlpError::TrailingBytes(bytes.len() - header.total_len()));
        }
        Ok(Self::from_header(bytes, header))
    }

    fn from_header(raw: &'a [u8], header: Header) -> Self {
        Self {
            raw,
            header: (header.is_list, header.header_len),
        }
    }

    pub fn is_list(&self) -> bool {
        self.header.0
    }

    /// The full encoding of this item, header included.
    pub fn as_raw(&self) -> &'a [u8] {
        self.raw
    }

    fn payload(&self) -> &'a [u8] {
        &self.raw[self.header.1..]
    }

    /// The bytes of a string item.
    pub fn data(&self) -> Result<&'a [u8], RlpError> {
        if self.is_list() {
            return Err(RlpError::ExpectedBytes);
        }
        Ok(self.payload())
    }

    /// The items of a list.
    pub fn items(&self) -> Result<Vec<Rlp<'a>>, RlpError> {
        if !self.is_list() {
            return Err(RlpError::ExpectedList);
        }
        let payload = self.payload();
        let mut items = Vec::new();
        let mut offset = 0;
        while offset < payload.len() {
            let rest = &payload[offset..];
            let header = decode_header(rest)?;
            let end = header.total_len();
            items.push(Self::from_header(&rest[..end], header));
            offset += end;
        }
        Ok(items)
    }

    pub fn item_count(&self) -> Result<usize, RlpError> {
        Ok(self.items()?.len())
    }

    /// Item `index` of a list.
    pub fn at(&self, index: usize) -> Result<Rlp<'a>, RlpError> {
        let items = self.items()?;
        let count = items.len();
        items
            .into_iter()
            .nth(index)
            .ok_or(RlpError::IndexOutOfRange { index, count })
    }

    /// A string item read as a minimal big-endian integer.
    pub fn as_u256(&self) -> Result<U256, RlpError> {
        let data = self.data()?;
        if data.first() == Some(&0) {
            return Err(RlpError::NonCanonical("integer has leading zero"));
        }
        if data.len() > 32 {
            return Err(RlpError::LengthMismatch {
                expected: 32,
                actual: data.len(),
            });
        }
        Ok(U256::from_big_endian(data))
    }

    /// A string item of exactly `N` bytes.
    pub fn as_fixed<const N: usize>(&self) -> Result<[u8; N], RlpError> {
        let data = self.data()?;
        <[u8; N]>::try_from(data).map_err(|_| RlpError::LengthMismatch {
            expected: N,
            actual: data.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_bytes_boundaries() {
        assert_eq!(encode_bytes(&[]), vec![0x80]);
        assert_eq!(encode_bytes(&[0x7f]), vec![0x7f]);
        assert_eq!(encode_bytes(&[0x80]), vec![0x81, 0x80]);

        let long = vec![0xAA; 56];
        let encoded = encode_bytes(&long);
        assert_eq!(&encoded[..2], &[0xb8, 56]);
        assert_eq!(encoded.len(), 58);
    }

    #[test]
    fn test_encode_integers() {
        assert_eq!(encode_u256(&U256::zero()), vec![0x80]);
        assert_eq!(encode_u256(&U256::from(15)), vec![0x0f]);
        assert_eq!(encode_u256(&U256::from(1024)), vec![0x82, 0x04, 0x00]);
    }

    #[test]
    fn test_stream_builds_nested_lists() {
        // [ [], [[]], [ [], [[]] ] ] from the RLP reference examples
        let empty = RlpStream::new();
        let mut one = RlpStream::new();
        one.append_list(RlpStream::new());
        let mut two = RlpStream::new();
        let mut inner = RlpStream::new();
        inner.append_list(RlpStream::new());
        two.append_list(RlpStream::new()).append_list(inner);

        let mut outer = RlpStream::new();
        outer.append_list(empty).append_list(one).append_list(two);
        assert_eq!(outer.item_count(), 3);
        assert_eq!(
            outer.out_list(),
            vec![0xc7, 0xc0, 0xc1, 0xc0, 0xc3, 0xc0, 0xc1, 0xc0]
        );
    }

    #[test]
    fn test_append_raw_counts_items() {
        let mut stream = RlpStream::new();
        let mut raw = encode_bytes(&[1, 2]);
        raw.extend(encode_bytes(&[3]));
        stream.append_raw(&raw, 2);
        assert_eq!(stream.item_count(), 2);
        assert_eq!(stream.out_list(), vec![0xc4, 0x82, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_decode_list_items() {
        let mut stream = RlpStream::new();
        stream
            .append_bytes(b"cat")
            .append_u64(1024)
            .append_bytes(&vec![0x11; 60]);
        let encoded = stream.out_list();

        let rlp = Rlp::new(&encoded).unwrap();
        assert!(rlp.is_list());
        assert_eq!(rlp.item_count().unwrap(), 3);
        assert_eq!(rlp.at(0).unwrap().data().unwrap(), b"cat");
        assert_eq!(rlp.at(1).unwrap().as_u256().unwrap(), U256::from(1024));
        assert_eq!(rlp.at(2).unwrap().data().unwrap().len(), 60);
        assert_eq!(rlp.at(0).unwrap().as_raw(), &[0x83, b'c', b'a', b't']);
        assert!(matches!(
            rlp.at(3),
            Err(RlpError::IndexOutOfRange { index: 3, count: 3 })
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        assert!(matches!(
            Rlp::new(&[0x83, b'c', b'a']),
            Err(RlpError::Truncated { .. })
        ));
        assert!(matches!(Rlp::new(&[]), Err(RlpError::Truncated { .. })));
    }

    #[test]
    fn test_decode_rejects_non_canonical_input() {
        assert!(matches!(
            Rlp::new(&[0x81, 0x05]),
            Err(RlpError::NonCanonical(_))
        ));

        let mut short_in_long_form = vec![0xb8, 0x02];
        short_in_long_form.extend_from_slice(&[1, 2]);
        assert!(matches!(
            Rlp::new(&short_in_long_form),
            Err(RlpError::NonCanonical(_))
        ));

        let padded_int = Rlp::new(&[0x82, 0x00, 0x01]).unwrap();
        assert!(matches!(
            padded_int.as_u256(),
            Err(RlpError::NonCanonical(_))
        ));
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        assert_eq!(Rlp::new(&[0xc0, 0xc0]), Err(RlpError::TrailingBytes(1)));
    }

    #[test]
    fn test_fixed_width_fields() {
        let encoded = encode_bytes(&[0xAB; 20]);
        let rlp = Rlp::new(&encoded).unwrap();
        assert_eq!(rlp.as_fixed::<20>().unwrap(), [0xAB; 20]);
        assert!(matches!(
            rlp.as_fixed::<32>(),
            Err(RlpError::LengthMismatch {
                expected: 32,
                actual: 20
            })
        ));
    }
}
