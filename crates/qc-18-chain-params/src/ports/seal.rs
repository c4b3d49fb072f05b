//! Seal engine port.
//!
//! A seal engine owns the consensus-specific part of a block header. At
//! genesis it only has to say which seal fields a header carries when the
//! configuration document does not spell them out.

use crate::domain::ChainParams;

/// Consensus engine as seen from genesis construction.
pub trait SealEngine: Send + Sync {
    /// Name the engine is registered under.
    fn name(&self) -> &str;

    /// Hand the engine the record it will operate on.
    fn set_chain_params(&mut self, params: &ChainParams);

    /// Record last handed to `set_chain_params`.
    fn chain_params(&self) -> Option<&ChainParams>;

    /// Number of RLP items in the engine's header seal.
    fn seal_fields(&self) -> usize {
        0
    }

    /// Default seal items, RLP-encoded and concatenated.
    fn seal_rlp(&self) -> Vec<u8> {
        Vec::new()
    }
}
