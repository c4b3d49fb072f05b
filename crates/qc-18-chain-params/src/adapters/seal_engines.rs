//! Built-in seal engines.

use shared_types::rlp::encode_bytes;
use shared_types::{SealNonce, ZERO_HASH};

use crate::domain::ChainParams;
use crate::ports::SealEngine;

/// Engine for chains without a block proof. Headers carry no seal.
#[derive(Clone, Debug, Default)]
pub struct NoProof {
    params: Option<ChainParams>,
}

impl NoProof {
    pub const NAME: &'static str = "NoProof";
}

impl SealEngine for NoProof {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn set_chain_params(&mut self, params: &ChainParams) {
        self.params = Some(params.clone());
    }

    fn chain_params(&self) -> Option<&ChainParams> {
        self.params.as_ref()
    }
}

/// Proof-of-work engine. Headers are sealed with a 32-byte mix hash and an
/// 8-byte nonce, both zero unless the genesis sets them.
#[derive(Clone, Debug, Default)]
pub struct Ethash {
    params: Option<ChainParams>,
}

impl Ethash {
    pub const NAME: &'static str = "Ethash";
}

impl SealEngine for Ethash {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn set_chain_params(&mut self, params: &ChainParams) {
        self.params = Some(params.clone());
    }

    fn chain_params(&self) -> Option<&ChainParams> {
        self.params.as_ref()
    }

    fn seal_fields(&self) -> usize {
        2
    }

    fn seal_rlp(&self) -> Vec<u8> {
        let mut rlp = encode_bytes(&ZERO_HASH);
        rlp.extend_from_slice(&encode_bytes(&SealNonce::default()));
        rlp
    }
}
