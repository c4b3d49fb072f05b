//! # Shared Types Crate
//!
//! Primitive types and encodings shared by the genesis subsystems.
//!
//! ## Contents
//!
//! - **Entities**: `Address`, `Hash`, `U256` and the well-known empty digests.
//! - **Hex**: big-endian hex decoding into byte strings, fixed-width arrays
//!   and 256-bit integers.
//! - **RLP**: the canonical length-prefixed encoding used for hashing and
//!   wire transfer (`RlpStream` to encode, `Rlp` to decode).

pub mod entities;
pub mod errors;
pub mod hex_utils;
pub mod rlp;

pub use entities::*;
pub use errors::*;
pub use hex_utils::*;
pub use rlp::{Rlp, RlpStream};
